//! RCIP Core - Recipe Interchange Validation Engine
//!
//! A document is valid when it conforms to the declared schema AND passes
//! the domain rules a schema cannot express.
//!
//! # Pipeline
//! 1. Schema conformance (all structural violations, never just the first)
//! 2. Semantic rules (identifiers, vocabularies, amounts)
//! 3. Reference integrity (step targets, device profiles)
//! 4. Advisories (warnings only, never affect validity)
//! 5. Report assembly

pub mod vocabulary;
pub mod identifiers;
pub mod document;
pub mod schema;
pub mod validation;
pub mod semantic;
pub mod references;
pub mod advisory;
pub mod report;
pub mod session;
pub mod loader;
pub mod hashing;
pub mod print;

pub use vocabulary::{Allergen, CookingAction, DietLabel, HazardTag, Unit, Vocabulary};
pub use document::{Recipe, TargetRef};
pub use schema::{JsonSchemaChecker, SchemaConformance, SchemaError, StructuralViolation};
pub use validation::{Finding, RecipeRule, RuleContext, RuleEngine, Severity};
pub use report::{RecipeInfo, ValidationResult};
pub use session::{
    BatchEntry, BatchReport, SessionConfig, SessionError, SessionStats, ValidationSession,
};
pub use loader::LoadError;
pub use hashing::document_fingerprint;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_SCHEMA_VERSION: &str = "0.1";
