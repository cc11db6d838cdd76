//! Local environment expansion.
//!
//! For offline and local invocation nothing is deployed, so the resolved
//! environment is merged straight into the process environment and the
//! host's environment mirror. The secret store is never contacted.

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::domain::{EnvValue, Environment};
use crate::core::env::ProcessEnv;
use crate::core::secrets::Collected;
use crate::core::types::EnvironmentMirror;

/// Merge declared entries, then secret values, into `process` and `mirror`.
///
/// Secret values override same-named declarations. Deferred expressions
/// cannot be resolved without a deployment: they are copied to the mirror
/// as-is and left out of the process environment.
///
/// Returns the number of variables written to the process environment.
pub fn expand(
    env: &Environment,
    collected: &Collected,
    process: &mut dyn ProcessEnv,
    mirror: &mut EnvironmentMirror,
) -> usize {
    let mut written = 0;

    for entry in env.entries() {
        match &entry.value {
            EnvValue::Literal(value) => {
                process.set(&entry.key, value);
                mirror.insert(entry.key.clone(), Value::String(value.clone()));
                written += 1;
            }
            EnvValue::Deferred(expr) => {
                warn!(key = %entry.key, "cannot resolve intrinsic function locally, skipping");
                mirror.insert(entry.key.clone(), expr.clone());
            }
            // Written below from the collected definitions.
            EnvValue::Secret(_) => {}
        }
    }

    for def in &collected.definitions {
        let value = def.parameter_value.expose();
        process.set(&def.parameter_key, value);
        mirror.insert(def.parameter_key.clone(), Value::String(value.to_string()));
        written += 1;
    }

    debug!(variables = written, "expanded local environment");
    written
}
