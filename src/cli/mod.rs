//! Command-line interface.
//!
//! Plays the host's part for the phases the core hooks into: loads the
//! service configuration, runs the phase, and writes the result.

pub mod check;
pub mod local;
pub mod output;
pub mod package;
pub mod params;
pub mod phases;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::config::ServiceConfig;
use crate::core::lifecycle::{HostContext, Session};
use crate::error::Result;

/// envsecret - Materialize a service environment as a managed secret.
#[derive(Parser)]
#[command(
    name = "envsecret",
    about = "Materialize a service environment as a managed secret",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Service configuration file (.yml, .yaml, .json or .toml)
    #[arg(
        short,
        long,
        global = true,
        env = "ENVSECRET_CONFIG",
        default_value = "serverless.yml"
    )]
    pub config: PathBuf,

    /// Deployment stage (overrides provider.stage)
    #[arg(short, long, global = true, env = "ENVSECRET_STAGE")]
    pub stage: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate custom.environment and show how each entry is stored
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add the environment secret to a compiled template
    Package {
        /// Compiled CloudFormation template (JSON)
        template: PathBuf,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the stack parameters for the main deployment as JSON
    Params,

    /// Print the local environment in .env format
    Env,

    /// Run a command with the local environment injected
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true)]
        command: Vec<String>,
    },

    /// List the lifecycle hooks handled by the core
    Phases,
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        config,
        stage,
        command,
        ..
    } = cli;

    match command {
        Command::Check { json } => check::execute(&config, stage, json),
        Command::Package { template, output } => {
            package::execute(&config, stage, &template, output.as_deref())
        }
        Command::Params => params::execute(&config, stage),
        Command::Env => local::env(&config, stage),
        Command::Run { command } => local::run(&config, stage, &command),
        Command::Phases => phases::execute(),
    }
}

/// Load the service configuration and run the `initialize` phase.
pub(crate) fn open_session(
    config_path: &Path,
    stage: Option<String>,
) -> Result<(ServiceConfig, Session, HostContext)> {
    let config = ServiceConfig::load(config_path)?.with_stage(stage);
    let (session, host) = Session::initialize(&config, HostContext::from_config(&config))?;
    Ok((config, session, host))
}
