//! Validation Session - Single Entry Point
//!
//! Every document goes through schema conformance, then the rule engine,
//! then the report assembler. The session owns the only mutable state:
//! its pass/fail counters.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::document::Recipe;
use crate::hashing::document_fingerprint;
use crate::loader::{self, LoadError, LoadedDocument};
use crate::report::{assemble, ValidationResult};
use crate::schema::{JsonSchemaChecker, SchemaConformance, SchemaError};
use crate::validation::{RuleContext, RuleEngine};
use crate::{DEFAULT_SCHEMA_VERSION, ENGINE_VERSION};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Validator not initialized. Call init() first.")]
    NotInitialized,

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Schema file error: {0}")]
    SchemaLoad(#[source] LoadError),

    #[error("{0}")]
    Load(#[from] LoadError),
}

fn default_schema_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Report duplicate ingredient/step identifiers as errors.
    #[serde(default)]
    pub enforce_unique_ids: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            enforce_unique_ids: false,
        }
    }
}

impl SessionConfig {
    fn schema_file_name(&self) -> String {
        format!("rcip-v{}.json", self.schema_version)
    }

    /// Schema locations in lookup order: `schemas/` under the working
    /// directory, then the `schemas/` directory shipped with this crate.
    pub fn schema_candidates(&self) -> [PathBuf; 2] {
        let file = self.schema_file_name();
        [
            PathBuf::from("schemas").join(&file),
            Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas").join(&file),
        ]
    }

    /// First existing candidate; the working-directory path when none exists.
    pub fn default_schema_path(&self) -> PathBuf {
        let [local, bundled] = self.schema_candidates();
        if !local.is_file() && bundled.is_file() {
            bundled
        } else {
            local
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub validated: u32,
    pub passed: u32,
    pub failed: u32,
}

impl SessionStats {
    fn record(&mut self, valid: bool) {
        self.validated += 1;
        if valid {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Percentage of validated documents that passed, if any were validated.
    pub fn pass_rate(&self) -> Option<f64> {
        (self.validated > 0).then(|| f64::from(self.passed) / f64::from(self.validated) * 100.0)
    }

    pub fn fail_rate(&self) -> Option<f64> {
        (self.validated > 0).then(|| f64::from(self.failed) / f64::from(self.validated) * 100.0)
    }
}

/// The validation session - orchestrates all stages for one pipeline.
///
/// Counter updates take `&mut self`; share a session across threads only
/// behind a lock, or give each worker its own.
pub struct ValidationSession {
    config: SessionConfig,
    ctx: RuleContext,
    checker: Option<Box<dyn SchemaConformance>>,
    engine: RuleEngine,
    stats: SessionStats,
}

impl ValidationSession {
    pub fn new(config: SessionConfig) -> Self {
        let mut ctx = RuleContext::new(config.schema_version.clone());
        ctx.enforce_unique_ids = config.enforce_unique_ids;
        Self {
            config,
            ctx,
            checker: None,
            engine: RuleEngine::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn schema_version(&self) -> &str {
        &self.config.schema_version
    }

    pub fn is_initialized(&self) -> bool {
        self.checker.is_some()
    }

    /// Compile `schema` and make the session ready.
    pub fn init(&mut self, schema: &Value) -> Result<(), SessionError> {
        let checker = JsonSchemaChecker::compile(schema)?;
        self.init_with_checker(Box::new(checker));
        Ok(())
    }

    /// Load the schema from `path`, or from the configured default location.
    pub fn init_from_path(&mut self, path: Option<&Path>) -> Result<(), SessionError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.default_schema_path());
        debug!(path = %path.display(), "loading schema");
        let schema = loader::load_json(&path).map_err(SessionError::SchemaLoad)?;
        self.init(&schema)
    }

    /// Use an externally supplied structural checker.
    pub fn init_with_checker(&mut self, checker: Box<dyn SchemaConformance>) {
        self.checker = Some(checker);
        info!(schema_version = %self.config.schema_version, "RCIP validator initialized");
    }

    /// Run every stage on `document` without touching the counters.
    pub fn evaluate(&self, document: &Value) -> Result<ValidationResult, SessionError> {
        let checker = self.checker.as_ref().ok_or(SessionError::NotInitialized)?;

        let violations = checker.check(document);
        let recipe = Recipe::new(document);
        let findings = self.engine.run(&recipe, &self.ctx);
        Ok(assemble(&recipe, &violations, findings))
    }

    pub fn validate_one(&mut self, document: &Value) -> Result<ValidationResult, SessionError> {
        let result = self.evaluate(document)?;
        self.stats.record(result.valid);
        debug!(
            valid = result.valid,
            errors = result.error_count(),
            warnings = result.warning_count(),
            "validated document"
        );
        Ok(result)
    }

    /// Validate named documents in order.
    pub fn validate_many<'d, I, N>(
        &mut self,
        documents: I,
    ) -> Result<Vec<(String, ValidationResult)>, SessionError>
    where
        I: IntoIterator<Item = (N, &'d Value)>,
        N: Into<String>,
    {
        documents
            .into_iter()
            .map(|(name, doc)| Ok((name.into(), self.validate_one(doc)?)))
            .collect()
    }

    /// Validate a loaded file. A load failure becomes a failed result for that
    /// document only and is not counted.
    pub fn validate_loaded(&mut self, loaded: &LoadedDocument) -> Result<BatchEntry, SessionError> {
        if !self.is_initialized() {
            return Err(SessionError::NotInitialized);
        }

        match &loaded.document {
            Ok(document) => Ok(BatchEntry {
                name: loaded.name.clone(),
                fingerprint: document_fingerprint(document).ok(),
                result: self.validate_one(document)?,
            }),
            Err(e) => {
                warn!(name = %loaded.name, error = %e, "could not load recipe");
                Ok(BatchEntry {
                    name: loaded.name.clone(),
                    fingerprint: None,
                    result: ValidationResult::input_error(e.to_string()),
                })
            }
        }
    }

    pub fn validate_file(&mut self, path: &Path) -> Result<BatchEntry, SessionError> {
        self.validate_loaded(&loader::load_document(path))
    }

    /// Validate every recipe file directly inside `dir`.
    pub fn validate_directory(&mut self, dir: &Path) -> Result<Vec<BatchEntry>, SessionError> {
        if !self.is_initialized() {
            return Err(SessionError::NotInitialized);
        }
        let files = loader::discover_recipe_files(dir)?;
        info!(count = files.len(), dir = %dir.display(), "found recipe files");
        files.iter().map(|path| self.validate_file(path)).collect()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }
}

impl Default for ValidationSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub name: String,
    /// Absent when the document could not be loaded.
    pub fingerprint: Option<String>,
    pub result: ValidationResult,
}

/// Machine-readable record of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub schema_version: String,
    pub stats: SessionStats,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn new(session: &ValidationSession, entries: Vec<BatchEntry>) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            schema_version: session.schema_version().to_string(),
            stats: session.stats(),
            entries,
        }
    }

    pub fn all_valid(&self) -> bool {
        self.entries.iter().all(|e| e.result.valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn permissive_session() -> ValidationSession {
        let mut session = ValidationSession::default();
        session.init(&json!({})).unwrap();
        session
    }

    #[test]
    fn test_uninitialized_session_is_usage_error() {
        let mut session = ValidationSession::default();
        let err = session.validate_one(&json!({})).unwrap_err();
        assert!(matches!(err, SessionError::NotInitialized));
        assert_eq!(session.stats(), SessionStats::default());
    }

    #[test]
    fn test_malformed_schema_fails_init() {
        let mut session = ValidationSession::default();
        let err = session.init(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, SessionError::Schema(_)));
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_counters() {
        let mut session = permissive_session();
        session.validate_one(&json!({"ingredients": [{"id": "ing-1", "allergens": []}]})).unwrap();
        session.validate_one(&json!({"id": "bogus"})).unwrap();

        let stats = session.stats();
        assert_eq!(stats, SessionStats { validated: 2, passed: 1, failed: 1 });
        assert_eq!(stats.pass_rate(), Some(50.0));

        session.reset_stats();
        assert_eq!(session.stats(), SessionStats::default());
        assert_eq!(session.stats().pass_rate(), None);
    }

    #[test]
    fn test_evaluate_does_not_count() {
        let session = permissive_session();
        session.evaluate(&json!({})).unwrap();
        assert_eq!(session.stats().validated, 0);
    }

    #[test]
    fn test_load_failure_is_per_document() {
        let mut session = permissive_session();
        let loaded = LoadedDocument {
            name: "gone.rcip".into(),
            document: Err(LoadError::NotFound(PathBuf::from("gone.rcip"))),
        };
        let entry = session.validate_loaded(&loaded).unwrap();
        assert!(!entry.result.valid);
        assert_eq!(entry.result.errors, vec!["File not found: gone.rcip"]);
        assert!(entry.fingerprint.is_none());
        assert_eq!(session.stats().validated, 0);
    }

    #[test]
    fn test_config_defaults() {
        let config: SessionConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, SessionConfig::default());
        let [local, bundled] = config.schema_candidates();
        assert_eq!(local, PathBuf::from("schemas/rcip-v0.1.json"));
        assert!(bundled.starts_with(env!("CARGO_MANIFEST_DIR")));
        assert!(bundled.is_file());
    }

    #[test]
    fn test_default_schema_falls_back_to_bundled() {
        let config = SessionConfig::default();
        assert!(config.default_schema_path().is_file());

        let mut session = ValidationSession::new(config);
        session.init_from_path(None).unwrap();
        assert!(session.is_initialized());
    }

    #[test]
    fn test_unknown_schema_version_resolves_to_working_directory() {
        let config = SessionConfig {
            schema_version: "9.9".into(),
            ..SessionConfig::default()
        };
        assert_eq!(config.default_schema_path(), PathBuf::from("schemas/rcip-v9.9.json"));

        let mut session = ValidationSession::new(config);
        assert!(matches!(
            session.init_from_path(None),
            Err(SessionError::SchemaLoad(_))
        ));
    }
}
