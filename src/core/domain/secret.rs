//! Secret definition types.
//!
//! Each `{ SecretValue: ... }` entry becomes one deployment parameter and
//! one `NoEcho` parameter declaration in the template.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{json, Value};

use crate::core::domain::environment::SecretValue;
use crate::core::types::EnvKey;

/// A secret carried out-of-band as a deployment parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretDefinition {
    /// Parameter key, equal to the environment key.
    pub parameter_key: EnvKey,
    /// Plaintext supplied to the deployment executor.
    pub parameter_value: SecretValue,
}

impl SecretDefinition {
    pub fn new(key: impl Into<EnvKey>, value: SecretValue) -> Self {
        Self {
            parameter_key: key.into(),
            parameter_value: value,
        }
    }
}

/// Serializes in the deployment executor's `stackParameters` shape.
impl Serialize for SecretDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StackParameter", 2)?;
        state.serialize_field("ParameterKey", &self.parameter_key)?;
        state.serialize_field("ParameterValue", self.parameter_value.expose())?;
        state.end()
    }
}

/// Parameter declaration for the template's `Parameters` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParameterDeclaration;

impl ParameterDeclaration {
    /// Always an opaque string that CloudFormation never echoes back.
    pub fn to_template(self) -> Value {
        json!({ "Type": "String", "NoEcho": true })
    }
}
