//! Lifecycle hook listing.

use crate::cli::output;
use crate::core::lifecycle::{self, Phase};
use crate::error::Result;

/// List every hook the core handles, in lifecycle order.
pub fn execute() -> Result<()> {
    lifecycle::validate_handlers()?;

    output::section("Lifecycle Hooks");
    for phase in Phase::ALL {
        output::kv(&format!("{:<38}", phase.hook()), describe(phase));
    }
    Ok(())
}

fn describe(phase: Phase) -> &'static str {
    match phase {
        Phase::Initialize => "classify entries, declare runtime marker",
        Phase::OfflineStart | Phase::InvokeLocal => "expand local environment",
        Phase::PackageFinalize => "add secret, output and policy statement",
        Phase::AfterBootstrapDeploy => "relay secret stack parameters",
    }
}
