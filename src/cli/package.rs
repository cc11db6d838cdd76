//! Package command.
//!
//! Runs the packaging phase against a compiled template.

use std::path::Path;
use tracing::debug;

use crate::cli::output;
use crate::core::constants::SECRET_NAME_VAR;
use crate::core::env::Memory;
use crate::core::lifecycle::Phase;
use crate::core::template::Template;
use crate::error::{Error, Result};

/// Augment `template_path` and write it to `output_path` or stdout.
pub fn execute(
    config_path: &Path,
    stage: Option<String>,
    template_path: &Path,
    output_path: Option<&Path>,
) -> Result<()> {
    let (_, session, host) = super::open_session(config_path, stage)?;

    let contents = std::fs::read_to_string(template_path)?;
    let compiled = Template::from_value(serde_json::from_str(&contents)?)?;

    let host = session.run(
        Phase::PackageFinalize,
        host.with_template(compiled),
        &mut Memory::new(),
    )?;
    let mut template = host
        .template
        .ok_or_else(|| Error::Other("packaging produced no template".to_string()))?;

    // The host compiles provider.environment into each function; a
    // pre-compiled template predates the marker, so declare it here.
    let functions =
        template.declare_function_variable(SECRET_NAME_VAR, &session.naming().secret_name);
    debug!(functions, "declared runtime marker");

    let rendered = serde_json::to_string_pretty(&template.into_value())?;

    match output_path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))?;
            output::success(&format!(
                "added {} to {}",
                session.naming().secret_name,
                path.display()
            ));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
