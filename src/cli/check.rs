//! Configuration check command.

use serde_json::json;
use std::path::Path;

use crate::cli::output;
use crate::core::domain::EnvValue;
use crate::error::Result;

/// Validate the configuration and summarize each entry.
pub fn execute(config_path: &Path, stage: Option<String>, json: bool) -> Result<()> {
    let (config, session, _) = super::open_session(config_path, stage)?;
    let naming = session.naming();
    let env = session.environment();

    if json {
        let entries: Vec<_> = env
            .entries()
            .iter()
            .map(|entry| json!({ "key": entry.key, "kind": kind(&entry.value) }))
            .collect();
        let summary = json!({
            "service": config.service,
            "stage": naming.stage,
            "stack": naming.stack_name,
            "secret": naming.secret_name,
            "entries": entries,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::section("Environment Secret");
    output::kv("service", &config.service);
    output::kv("stage", &naming.stage);
    output::kv("stack", &naming.stack_name);
    output::kv("secret", &naming.secret_name);

    if env.is_empty() {
        println!();
        println!("{}", output::muted("custom.environment is empty"));
    } else {
        output::section("Entries");
        for entry in env.entries() {
            output::list_item(&format!(
                "{} {}",
                output::key(&entry.key),
                output::muted(kind(&entry.value))
            ));
        }
    }

    println!();
    output::success(&format!(
        "configuration valid ({} entries, {} secret)",
        env.len(),
        session.collected().definitions.len()
    ));
    Ok(())
}

fn kind(value: &EnvValue) -> &'static str {
    match value {
        EnvValue::Literal(_) => "literal",
        EnvValue::Secret(_) => "secret",
        EnvValue::Deferred(_) => "intrinsic",
    }
}
