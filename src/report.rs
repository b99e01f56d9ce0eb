//! Report Assembler
//!
//! Merges structural violations, rule findings and the derived summary
//! into one immutable [`ValidationResult`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::document::{AllergenField, Recipe};
use crate::schema::StructuralViolation;
use crate::validation::RuleFindings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// False iff `errors` is non-empty.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: RecipeInfo,
}

impl ValidationResult {
    /// Result for a document that could not be read or decoded.
    pub fn input_error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
            warnings: vec![],
            info: RecipeInfo::default(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Summary derived from the document, independent of findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeInfo {
    pub name: String,
    pub rcip_version: Option<String>,
    pub recipe_version: Option<String>,
    pub ingredient_count: usize,
    pub step_count: usize,
    pub has_device_profiles: bool,
    pub has_sensors: bool,
    /// Union over all ingredients, sorted and deduplicated.
    pub allergens: Vec<String>,
    pub diet_labels: Vec<String>,
    pub difficulty: Option<String>,
    pub total_time_minutes: Option<f64>,
}

impl Default for RecipeInfo {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            rcip_version: None,
            recipe_version: None,
            ingredient_count: 0,
            step_count: 0,
            has_device_profiles: false,
            has_sensors: false,
            allergens: vec![],
            diet_labels: vec![],
            difficulty: None,
            total_time_minutes: None,
        }
    }
}

const UNKNOWN_NAME: &str = "Unknown";

impl RecipeInfo {
    pub fn from_recipe(recipe: &Recipe<'_>) -> Self {
        let meta = recipe.meta();

        let allergens: BTreeSet<&str> = recipe
            .ingredients()
            .filter_map(|i| match i.allergens() {
                AllergenField::Tags(tags) => Some(tags),
                _ => None,
            })
            .flatten()
            .filter_map(|tag| tag.as_str())
            .collect();

        Self {
            name: meta.name().unwrap_or(UNKNOWN_NAME).to_string(),
            rcip_version: recipe.rcip_version().map(str::to_string),
            recipe_version: meta.version().map(str::to_string),
            ingredient_count: recipe.ingredient_count(),
            step_count: recipe.step_count(),
            has_device_profiles: recipe.has_device_profiles(),
            has_sensors: recipe.has_sensors(),
            allergens: allergens.into_iter().map(str::to_string).collect(),
            diet_labels: meta
                .diet_labels()
                .iter()
                .filter_map(|l| l.as_str())
                .map(str::to_string)
                .collect(),
            difficulty: meta.difficulty().map(str::to_string),
            total_time_minutes: meta.total_time_minutes(),
        }
    }
}

/// Build the final result.
///
/// Error order: schema summary line, schema violations, rule errors.
/// Warnings keep rule order.
pub fn assemble(
    recipe: &Recipe<'_>,
    violations: &[StructuralViolation],
    findings: RuleFindings,
) -> ValidationResult {
    let mut errors = Vec::with_capacity(violations.len() + 1 + findings.errors.len());

    if let Some(first) = violations.first() {
        errors.push(format!("Schema validation failed: {}", first.message));
        errors.extend(violations.iter().map(ToString::to_string));
    }
    errors.extend(findings.errors);

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings: findings.warnings,
        info: RecipeInfo::from_recipe(recipe),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_violations_get_summary_line() {
        let doc = json!({});
        let violations = vec![
            StructuralViolation { path: vec![], message: "\"id\" is a required property".into() },
            StructuralViolation {
                path: vec!["steps".into(), "0".into()],
                message: "bad step".into(),
            },
        ];
        let result = assemble(&Recipe::new(&doc), &violations, RuleFindings::default());
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Schema validation failed: \"id\" is a required property",
                "(root): \"id\" is a required property",
                "steps > 0: bad step",
            ]
        );
    }

    #[test]
    fn test_warnings_never_invalidate() {
        let doc = json!({});
        let findings = RuleFindings { errors: vec![], warnings: vec!["hmm".into()] };
        let result = assemble(&Recipe::new(&doc), &[], findings);
        assert!(result.valid);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_info_summary() {
        let doc = json!({
            "rcip_version": "0.1",
            "meta": {"name": "Pancakes", "version": "1.0.0", "difficulty": "easy",
                     "total_time_minutes": 25, "diet_labels": ["vegetarian"]},
            "ingredients": [
                {"id": "ing-1", "allergens": ["milk", "eggs"]},
                {"id": "ing-2", "allergens": ["wheat", "milk"]},
                {"id": "ing-3"}
            ],
            "steps": [{"step_id": "s-1"}],
            "device_profiles": [{"id": "pan"}]
        });
        let info = RecipeInfo::from_recipe(&Recipe::new(&doc));
        assert_eq!(info.name, "Pancakes");
        assert_eq!(info.rcip_version.as_deref(), Some("0.1"));
        assert_eq!(info.recipe_version.as_deref(), Some("1.0.0"));
        assert_eq!(info.ingredient_count, 3);
        assert_eq!(info.step_count, 1);
        assert!(info.has_device_profiles);
        assert!(!info.has_sensors);
        assert_eq!(info.allergens, vec!["eggs", "milk", "wheat"]);
        assert_eq!(info.diet_labels, vec!["vegetarian"]);
        assert_eq!(info.difficulty.as_deref(), Some("easy"));
        assert_eq!(info.total_time_minutes, Some(25.0));
    }

    #[test]
    fn test_info_sensor_flag() {
        let doc = json!({"sensors": [{"id": "thermo-1", "type": "temperature"}]});
        let info = RecipeInfo::from_recipe(&Recipe::new(&doc));
        assert!(info.has_sensors);
        assert!(!info.has_device_profiles);

        let empty = json!({"sensors": []});
        assert!(!RecipeInfo::from_recipe(&Recipe::new(&empty)).has_sensors);
    }

    #[test]
    fn test_input_error() {
        let result = ValidationResult::input_error("Invalid JSON: eof");
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Invalid JSON: eof"]);
        assert_eq!(result.info.name, "Unknown");
    }
}
