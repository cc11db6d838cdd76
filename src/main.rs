//! envsecret - Materialize a service environment as a managed secret.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envsecret::cli::output;
use envsecret::cli::{execute, Cli};
use envsecret::error::{ConfigError, Error, TemplateError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("ENVSECRET_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envsecret=debug")
        } else {
            EnvFilter::new("envsecret=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::LeakingSecrets { .. }) => {
                Some("declare these as { SecretValue: ... } instead of ${ssm:/...}")
            }
            Error::Config(ConfigError::ReadFile { .. }) => Some("pass --config <path>"),
            Error::Template(TemplateError::MissingPolicy { .. })
            | Error::Template(TemplateError::MissingExecutionRole(_)) => {
                Some("was the template compiled for this service and stage?")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
