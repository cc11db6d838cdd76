//! Compiled template augmentation.
//!
//! Builds the secret resource, its output, the parameter declarations and
//! the read-access statement, then merges them into the host's compiled
//! CloudFormation template.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::core::constants::{
    EXECUTION_ROLE_ID, READ_SECRET_ACTION, SECRET_LOGICAL_ID, SECRET_RESOURCE_TYPE,
};
use crate::core::domain::{EnvValue, Environment};
use crate::core::expr::{json_string_content, Expr};
use crate::core::naming::Naming;
use crate::core::secrets::Collected;
use crate::core::types::TemplateObject;
use crate::error::{Result, TemplateError};

/// A compiled CloudFormation template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    root: TemplateObject,
}

impl Template {
    /// Wrap a parsed template.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NotAnObject` if the root is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(TemplateError::NotAnObject.into()),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// A top-level section, if present and an object.
    pub fn section(&self, name: &str) -> Option<&TemplateObject> {
        self.root.get(name).and_then(Value::as_object)
    }

    /// A top-level section, created when absent.
    fn section_mut(&mut self, name: &'static str) -> Result<&mut TemplateObject> {
        self.root
            .entry(name)
            .or_insert_with(|| Value::Object(TemplateObject::new()))
            .as_object_mut()
            .ok_or_else(|| TemplateError::InvalidSection(name).into())
    }

    /// Merge a fragment.
    ///
    /// Parameters and resources overwrite same-named entries. An output that
    /// already exists is kept as-is, so users can override the export.
    ///
    /// # Errors
    ///
    /// Returns a `TemplateError` if the execution role's policy cannot be
    /// located or a section has the wrong shape.
    pub fn merge(mut self, fragment: TemplateFragment) -> Result<Self> {
        let TemplateFragment {
            parameters,
            resources,
            outputs,
            statement,
            policy_name,
        } = fragment;

        // Policy lookup runs before any section is touched.
        let statement_list = self.policy_statements(&policy_name)?;
        statement_list.push(serde_json::to_value(&statement)?);

        self.section_mut("Parameters")?.extend(parameters);

        let existing_resources = self.section_mut("Resources")?;
        for (id, resource) in resources {
            if existing_resources.insert(id.clone(), resource).is_some() {
                warn!(resource = %id, "replaced existing resource");
            }
        }

        let existing_outputs = self.section_mut("Outputs")?;
        for (id, output) in outputs {
            if existing_outputs.contains_key(&id) {
                debug!(output = %id, "keeping user-defined output");
                continue;
            }
            existing_outputs.insert(id, output);
        }

        Ok(self)
    }

    /// The statement list of the execution role policy named `expected`.
    fn policy_statements(&mut self, expected: &PolicyName) -> Result<&mut Vec<Value>> {
        let rendered = expected.render().unwrap_or_default();

        let policies = self
            .root
            .get_mut("Resources")
            .and_then(|r| r.get_mut(EXECUTION_ROLE_ID))
            .and_then(|role| role.pointer_mut("/Properties/Policies"))
            .and_then(Value::as_array_mut)
            .ok_or_else(|| TemplateError::MissingExecutionRole(EXECUTION_ROLE_ID.to_string()))?;

        let mut matching: Vec<&mut Value> = policies
            .iter_mut()
            .filter(|policy| {
                policy
                    .get("PolicyName")
                    .and_then(PolicyName::parse)
                    .is_some_and(|name| name.matches(expected))
            })
            .collect();

        let policy = match matching.len() {
            0 => {
                return Err(TemplateError::MissingPolicy { expected: rendered }.into());
            }
            1 => matching.remove(0),
            count => {
                return Err(TemplateError::AmbiguousPolicy {
                    expected: rendered,
                    count,
                }
                .into());
            }
        };

        policy
            .pointer_mut("/PolicyDocument/Statement")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| TemplateError::MissingStatementList(rendered).into())
    }

    /// Declare a variable on every function that does not already set it.
    ///
    /// Returns the number of functions updated.
    pub fn declare_function_variable(&mut self, key: &str, value: &str) -> usize {
        let Some(resources) = self.root.get_mut("Resources").and_then(Value::as_object_mut) else {
            return 0;
        };

        let mut updated = 0;
        for resource in resources.values_mut() {
            if resource.get("Type").and_then(Value::as_str) != Some("AWS::Lambda::Function") {
                continue;
            }
            let Some(properties) = resource.get_mut("Properties").and_then(Value::as_object_mut)
            else {
                continue;
            };
            let variables = properties
                .entry("Environment")
                .or_insert_with(|| json!({}))
                .as_object_mut()
                .map(|env| env.entry("Variables").or_insert_with(|| json!({})));
            if let Some(Value::Object(vars)) = variables {
                if !vars.contains_key(key) {
                    vars.insert(key.to_string(), Value::String(value.to_string()));
                    updated += 1;
                }
            }
        }
        updated
    }
}

/// A structured policy name: `{ "Fn::Join": [delimiter, parts] }` or a plain
/// string (one part, empty delimiter).
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyName {
    delimiter: String,
    parts: Vec<Value>,
}

impl PolicyName {
    pub fn from_parts(delimiter: &str, parts: &[&str]) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            parts: parts.iter().map(|p| Value::String(p.to_string())).collect(),
        }
    }

    /// Parse a template `PolicyName` value.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self {
                delimiter: String::new(),
                parts: vec![Value::String(s.clone())],
            }),
            Value::Object(obj) => {
                let args = obj.get("Fn::Join")?.as_array()?;
                match args.as_slice() {
                    [Value::String(delimiter), Value::Array(parts)] => Some(Self {
                        delimiter: delimiter.clone(),
                        parts: parts.clone(),
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// The joined name, or `None` if any part is itself an expression.
    pub fn render(&self) -> Option<String> {
        let parts: Option<Vec<&str>> = self.parts.iter().map(Value::as_str).collect();
        parts.map(|p| p.join(&self.delimiter))
    }

    /// Names match when both render to the same string.
    pub fn matches(&self, other: &PolicyName) -> bool {
        match (self.render(), other.render()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// An allow statement in an IAM policy document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub effect: String,
    pub action: Vec<String>,
    pub resource: Vec<Value>,
}

impl PolicyStatement {
    /// Read access to every version of the named secret.
    pub fn read_secret(naming: &Naming) -> Self {
        Self {
            effect: "Allow".to_string(),
            action: vec![READ_SECRET_ACTION.to_string()],
            resource: vec![json!({ "Fn::Sub": naming.secret_arn_pattern() })],
        }
    }
}

/// Everything the augmenter adds to a template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFragment {
    pub parameters: TemplateObject,
    pub resources: TemplateObject,
    pub outputs: TemplateObject,
    pub statement: PolicyStatement,
    pub policy_name: PolicyName,
}

impl TemplateFragment {
    pub fn build(env: &Environment, collected: &Collected, naming: &Naming) -> Self {
        let mut resources = TemplateObject::new();
        resources.insert(
            SECRET_LOGICAL_ID.to_string(),
            json!({
                "Type": SECRET_RESOURCE_TYPE,
                "Properties": {
                    "Name": naming.secret_name,
                    "Description": format!("Environment for {}", naming.stack_name),
                    "SecretString": secret_string(env).to_template(),
                },
            }),
        );

        let mut outputs = TemplateObject::new();
        outputs.insert(
            SECRET_LOGICAL_ID.to_string(),
            json!({
                "Description": format!("ARN of the {} SecretId", SECRET_LOGICAL_ID),
                "Value": { "Ref": SECRET_LOGICAL_ID },
                "Export": { "Name": { "Fn::Sub": naming.export_name() } },
            }),
        );

        Self {
            parameters: collected.declarations_object(),
            resources,
            outputs,
            statement: PolicyStatement::read_secret(naming),
            policy_name: naming.policy_name(),
        }
    }
}

/// The secret's stored value: a JSON object with one member per stored
/// entry, whose secret members are `Ref`s to their `NoEcho` parameters.
pub fn secret_string(env: &Environment) -> Expr {
    let members = env
        .stored_entries()
        .map(|entry| {
            let value = match &entry.value {
                EnvValue::Literal(s) => Expr::literal(json_string_content(s)),
                EnvValue::Deferred(v) => Expr::Passthrough(v.clone()),
                EnvValue::Secret(_) => Expr::reference(entry.key.as_str()),
            };
            Expr::concat(vec![
                Expr::literal(format!("\"{}\": ", json_string_content(&entry.key))),
                Expr::concat(vec![Expr::literal("\""), value, Expr::literal("\"")]),
            ])
        })
        .collect();

    Expr::concat(vec![
        Expr::literal("{"),
        Expr::join(",", members),
        Expr::literal("}"),
    ])
}

/// Build the fragment for `env` and merge it into `template`.
///
/// # Errors
///
/// Returns a `TemplateError` if the template lacks the execution role policy.
pub fn augment(
    template: Template,
    env: &Environment,
    collected: &Collected,
    naming: &Naming,
) -> Result<Template> {
    let fragment = TemplateFragment::build(env, collected, naming);
    let template = template.merge(fragment)?;

    info!(
        secret = %naming.secret_name,
        parameters = collected.declarations.len(),
        "added environment secret to template"
    );

    Ok(template)
}
