//! Local environment commands.
//!
//! Emulates the host's local invocation: the environment is expanded in
//! memory and never fetched from the secret store.

use serde_json::Value;
use std::path::Path;
use zeroize::Zeroizing;

use crate::core::constants::LOCAL_MARKER;
use crate::core::env::{Memory, ProcessEnv};
use crate::core::lifecycle::Phase;
use crate::error::{Error, Result};

/// The environment a locally invoked function sees: the host's mirror,
/// overridden by the expanded entries.
fn expanded(config_path: &Path, stage: Option<String>) -> Result<Memory> {
    let (_, session, host) = super::open_session(config_path, stage)?;
    let mut process = Memory::new();
    let host = session.run(Phase::InvokeLocal, host, &mut process)?;

    let mut function_env = Memory::new();
    for (key, value) in &host.environment {
        if let Value::String(value) = value {
            function_env.set(key, value);
        }
    }
    for (key, value) in process.vars() {
        function_env.set(key, value);
    }
    Ok(function_env)
}

/// Print the local environment in .env format.
pub fn env(config_path: &Path, stage: Option<String>) -> Result<()> {
    let process = expanded(config_path, stage)?;
    print!("{}", to_env_string(&process));
    Ok(())
}

/// Run a command with the local environment injected.
pub fn run(config_path: &Path, stage: Option<String>, command: &[String]) -> Result<()> {
    let exit_code = run_with_environment(config_path, stage, command)?;
    std::process::exit(exit_code);
}

fn run_with_environment(
    config_path: &Path,
    stage: Option<String>,
    command: &[String],
) -> Result<i32> {
    let Some((program, args)) = command.split_first() else {
        return Err(Error::Other("no command specified".to_string()));
    };

    let process = expanded(config_path, stage)?;

    let mut cmd = std::process::Command::new(program);
    cmd.args(args);
    for (key, value) in process.into_vars() {
        let value = Zeroizing::new(value);
        cmd.env(key, value.as_str());
    }
    // Tells the workload to skip fetching its secret.
    cmd.env(LOCAL_MARKER, "true");

    let status = cmd.status()?;
    Ok(status.code().unwrap_or(1))
}

fn to_env_string(process: &Memory) -> String {
    let mut output = String::new();

    for (key, value) in process.vars() {
        if needs_quotes(value) {
            output.push_str(&format!("{}=\"{}\"\n", key, escape_env_value(value)));
        } else {
            output.push_str(&format!("{}={}\n", key, value));
        }
    }

    output
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|ch| ch.is_whitespace())
        || value.contains(&['#', '=', '"', '\'', '\\', '$'][..])
}

fn escape_env_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_string_quoting() {
        let mut process = Memory::new();
        process.set("SIMPLE", "value");
        process.set("SPACED", "two words");
        process.set("QUOTED", r#"say "hi""#);
        process.set("EMPTY", "");
        process.set("DOLLAR", "pa$$word");

        let rendered = to_env_string(&process);

        assert!(rendered.contains("SIMPLE=value\n"));
        assert!(rendered.contains("SPACED=\"two words\"\n"));
        assert!(rendered.contains("QUOTED=\"say \\\"hi\\\"\"\n"));
        assert!(rendered.contains("EMPTY=\"\"\n"));
        assert!(rendered.contains("DOLLAR=\"pa$$word\"\n"));
    }

    #[test]
    fn test_run_requires_command() {
        let err = run_with_environment(Path::new("serverless.yml"), None, &[]).unwrap_err();
        assert!(err.to_string().contains("no command specified"));
    }
}
