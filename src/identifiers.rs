//! Identifier Grammar
//!
//! Stateless predicates over identifier strings.

use regex::Regex;
use std::sync::LazyLock;

/// Prefix that marks a step target as an ingredient reference.
pub const INGREDIENT_PREFIX: &str = "ing-";

/// Suffix that marks a step target as another step's output.
pub const STEP_RESULT_MARKER: &str = ":result";

static RECIPE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rcip-[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

static INGREDIENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ing-[0-9a-zA-Z]+$").unwrap());

static STEP_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^s-[0-9a-zA-Z]+$").unwrap());

static SEMANTIC_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").unwrap());

/// `rcip-` followed by a lowercase UUID body.
pub fn is_recipe_id(id: &str) -> bool {
    RECIPE_ID_RE.is_match(id)
}

pub fn is_ingredient_id(id: &str) -> bool {
    INGREDIENT_ID_RE.is_match(id)
}

pub fn is_step_id(id: &str) -> bool {
    STEP_ID_RE.is_match(id)
}

/// Plain `MAJOR.MINOR.PATCH` digits; leading zeros are accepted, pre-release
/// and build suffixes are not.
pub fn is_semantic_version(version: &str) -> bool {
    SEMANTIC_VERSION_RE.is_match(version)
}
