//! Schema Conformance Adapter
//!
//! Wraps a generic JSON Schema (Draft 7) validator behind
//! [`SchemaConformance`]. A check collects every violation, never just
//! the first.

use std::fmt;

use jsonschema::{Draft, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Configuration error raised while preparing a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema must be a JSON object or boolean, found {0}")]
    NotASchema(&'static str),

    #[error("Failed to compile schema: {0}")]
    Compile(String),
}

/// One structural non-conformance, located by instance path segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralViolation {
    pub path: Vec<String>,
    pub message: String,
}

impl StructuralViolation {
    /// Segments joined with `" > "`; the document root renders as `(root)`.
    pub fn render_path(&self) -> String {
        if self.path.is_empty() {
            "(root)".to_string()
        } else {
            self.path.join(" > ")
        }
    }
}

impl fmt::Display for StructuralViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.render_path(), self.message)
    }
}

/// Pluggable structural checker.
pub trait SchemaConformance: Send + Sync {
    fn check(&self, document: &Value) -> Vec<StructuralViolation>;
}

/// [`SchemaConformance`] backed by the `jsonschema` crate.
pub struct JsonSchemaChecker {
    validator: Validator,
}

impl JsonSchemaChecker {
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        match schema {
            Value::Object(_) | Value::Bool(_) => {}
            Value::Null => return Err(SchemaError::NotASchema("null")),
            Value::Number(_) => return Err(SchemaError::NotASchema("number")),
            Value::String(_) => return Err(SchemaError::NotASchema("string")),
            Value::Array(_) => return Err(SchemaError::NotASchema("array")),
        }

        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft7);
        let validator = opts
            .build(schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;

        Ok(Self { validator })
    }
}

impl SchemaConformance for JsonSchemaChecker {
    fn check(&self, document: &Value) -> Vec<StructuralViolation> {
        self.validator
            .iter_errors(document)
            .map(|e| StructuralViolation {
                path: pointer_segments(&e.instance_path.to_string()),
                message: e.to_string(),
            })
            .collect()
    }
}

/// One-shot check: compile `schema`, then collect all violations in `document`.
pub fn check(schema: &Value, document: &Value) -> Result<Vec<StructuralViolation>, SchemaError> {
    Ok(JsonSchemaChecker::compile(schema)?.check(document))
}

/// Split an RFC 6901 pointer into unescaped segments.
fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}
