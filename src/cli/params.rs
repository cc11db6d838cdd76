//! Stack parameters command.

use std::path::Path;

use crate::core::env::Memory;
use crate::core::lifecycle::Phase;
use crate::error::Result;

/// Print `provider.stackParameters` as they stand after the bootstrap
/// deployment, secret parameters included.
pub fn execute(config_path: &Path, stage: Option<String>) -> Result<()> {
    let (_, session, host) = super::open_session(config_path, stage)?;
    let host = session.run(Phase::AfterBootstrapDeploy, host, &mut Memory::new())?;
    println!("{}", serde_json::to_string_pretty(&host.stack_parameters)?);
    Ok(())
}
