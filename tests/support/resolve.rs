//! A minimal CloudFormation resolver for the intrinsics envsecret emits.

use serde_json::Value;
use std::collections::BTreeMap;

/// Resolve `Fn::Join`, `Ref` and strings the way CloudFormation would.
///
/// Panics on anything else.
pub fn resolve(value: &Value, params: &BTreeMap<String, String>) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) if obj.contains_key("Ref") => {
            let name = obj["Ref"].as_str().expect("Ref takes a string");
            params
                .get(name)
                .cloned()
                .unwrap_or_else(|| panic!("unresolved Ref: {}", name))
        }
        Value::Object(obj) if obj.contains_key("Fn::Join") => {
            let args = obj["Fn::Join"].as_array().expect("Fn::Join takes a list");
            let delimiter = args[0].as_str().expect("delimiter is a string");
            let parts: Vec<String> = args[1]
                .as_array()
                .expect("Fn::Join parts is a list")
                .iter()
                .map(|part| resolve(part, params))
                .collect();
            parts.join(delimiter)
        }
        other => panic!("cannot resolve {}", other),
    }
}

/// Parameters as a key/value map from stack parameter objects.
pub fn parameter_map(stack_parameters: &[Value]) -> BTreeMap<String, String> {
    stack_parameters
        .iter()
        .map(|p| {
            (
                p["ParameterKey"].as_str().unwrap().to_string(),
                p["ParameterValue"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}
