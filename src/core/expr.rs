//! Deferred template expressions.
//!
//! A small expression tree that is serialized to CloudFormation intrinsic
//! functions and resolved by CloudFormation at deployment time. Nothing here
//! ever evaluates a `Reference`.

use serde_json::{json, Value};

/// A late-bound string expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal string.
    Literal(String),
    /// `{ "Ref": name }` to a parameter or resource.
    Reference(String),
    /// An intrinsic function supplied by the user, emitted unchanged.
    Passthrough(Value),
    /// `{ "Fn::Join": [delimiter, parts] }`.
    Join { delimiter: String, parts: Vec<Expr> },
}

impl Expr {
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Join with an empty delimiter.
    pub fn concat(parts: Vec<Expr>) -> Self {
        Self::join("", parts)
    }

    pub fn join(delimiter: impl Into<String>, parts: Vec<Expr>) -> Self {
        Self::Join {
            delimiter: delimiter.into(),
            parts,
        }
    }

    /// Serialize to CloudFormation JSON.
    pub fn to_template(&self) -> Value {
        match self {
            Self::Literal(s) => Value::String(s.clone()),
            Self::Reference(name) => json!({ "Ref": name }),
            Self::Passthrough(value) => value.clone(),
            Self::Join { delimiter, parts } => {
                let parts: Vec<Value> = parts.iter().map(Expr::to_template).collect();
                json!({ "Fn::Join": [delimiter, parts] })
            }
        }
    }
}

/// Escape a string for use inside a JSON string literal, without the quotes.
pub fn json_string_content(s: &str) -> String {
    let quoted = Value::String(s.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
