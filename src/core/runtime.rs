//! Workload-side secret expansion.
//!
//! A deployed function finds its secret through the runtime marker, decodes
//! the stored JSON object and merges it into its own environment. Fetching
//! is delegated to a [`SecretSource`]; this crate ships no store client.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::constants::{OFFLINE_MARKERS, SECRET_NAME_VAR};
use crate::core::env::ProcessEnv;
use crate::error::{Result, RuntimeError};

/// Something that can return a secret's string value by name.
pub trait SecretSource {
    /// Fetch the `SecretString` of the named secret.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Fetch` if the secret cannot be retrieved.
    fn secret_string(&self, name: &str) -> Result<Zeroizing<String>>;
}

/// Whether the workload runs under an offline or local invoker.
pub fn is_offline(env: &impl ProcessEnv) -> bool {
    OFFLINE_MARKERS.iter().any(|marker| env.get(marker).is_some())
}

/// Decode a stored secret as a flat object of strings.
///
/// # Errors
///
/// Returns `RuntimeError::Decode` for invalid JSON, a non-object root, or
/// non-string members.
pub fn decode_secret_string(name: &str, raw: &str) -> Result<BTreeMap<String, Zeroizing<String>>> {
    let decode_err = |reason: String| RuntimeError::Decode {
        name: name.to_string(),
        reason,
    };

    let parsed: Map<String, Value> =
        serde_json::from_str(raw).map_err(|e| decode_err(e.to_string()))?;

    let mut vars = BTreeMap::new();
    for (key, value) in parsed {
        match value {
            Value::String(s) => {
                vars.insert(key, Zeroizing::new(s));
            }
            other => {
                return Err(decode_err(format!(
                    "member '{}' is {}, expected a string",
                    key,
                    kind(&other)
                ))
                .into());
            }
        }
    }
    Ok(vars)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fetch the secret named by the runtime marker and merge it into `env`.
///
/// Does nothing when running offline. Returns the number of variables set.
///
/// # Errors
///
/// Returns `RuntimeError::MissingSecretName` if the marker is unset, or any
/// error from the source or from decoding.
pub fn expand_runtime_environment(
    source: &impl SecretSource,
    env: &mut impl ProcessEnv,
) -> Result<usize> {
    if is_offline(&*env) {
        debug!("offline workload, skipping secret fetch");
        return Ok(0);
    }

    let name = env
        .get(SECRET_NAME_VAR)
        .ok_or(RuntimeError::MissingSecretName(SECRET_NAME_VAR))?;

    let raw = source.secret_string(&name)?;
    let vars = decode_secret_string(&name, &raw)?;

    for (key, value) in &vars {
        env.set(key, value);
    }

    info!(secret = %name, variables = vars.len(), "expanded environment from secret");
    Ok(vars.len())
}
