//! Document Fingerprints - SHA-256 over canonical JSON
//!
//! Lets a batch report be tied to the exact documents it judged,
//! independent of key order or whitespace in the source file.

use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Canonical JSON: object keys sorted, no whitespace.
pub fn canonical_json(value: &Value) -> Result<String, serde_json::Error> {
    to_string(&sort_value(value))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// `sha256:<hex>` fingerprint of a recipe document.
pub fn document_fingerprint(document: &Value) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(document)?;
    Ok(format!("sha256:{}", sha256_hex(canonical.as_bytes())))
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
