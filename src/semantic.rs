//! Semantic Rules
//!
//! Domain rules a generic schema cannot express. Safety and structure
//! problems (allergen disclosure, identifier shape, amounts, actions) are
//! errors; unknown entries in extensible vocabularies (units, hazards) are
//! warnings.

use crate::document::{display_tag, AllergenField, Ingredient, Recipe, Step};
use crate::identifiers::{is_ingredient_id, is_recipe_id, is_step_id};
use crate::validation::{Finding, RecipeRule, RuleContext};
use crate::vocabulary::{Allergen, CookingAction, HazardTag, Unit, Vocabulary};

pub fn rules() -> Vec<Box<dyn RecipeRule>> {
    vec![
        Box::new(RecipeIdRule),
        Box::new(IngredientRule),
        Box::new(StepRule),
        Box::new(VersionCompatibilityRule),
    ]
}

pub struct RecipeIdRule;

impl RecipeRule for RecipeIdRule {
    fn name(&self) -> &'static str {
        "recipe_id"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        match recipe.id_field() {
            Some(id) if !id.as_str().is_some_and(is_recipe_id) => vec![Finding::error(
                self.name(),
                format!("Invalid recipe ID format: {}", display_tag(id)),
            )],
            _ => vec![],
        }
    }
}

pub struct IngredientRule;

impl IngredientRule {
    fn check_one(&self, index: usize, ingredient: &Ingredient<'_>, out: &mut Vec<Finding>) {
        if let Some(id) = ingredient.id_field() {
            if !id.as_str().is_some_and(is_ingredient_id) {
                out.push(Finding::error(
                    self.name(),
                    format!("Ingredient {}: Invalid ID format: {}", index, display_tag(id)),
                ));
            }
        }

        match ingredient.allergens() {
            AllergenField::Missing => out.push(Finding::error(
                self.name(),
                format!("Ingredient {}: Missing required allergens field", index),
            )),
            AllergenField::NotASequence => out.push(Finding::error(
                self.name(),
                format!("Ingredient {}: allergens must be an array", index),
            )),
            AllergenField::Tags(tags) => {
                for tag in tags {
                    if !tag.as_str().is_some_and(Allergen::contains) {
                        out.push(Finding::error(
                            self.name(),
                            format!("Ingredient {}: Invalid allergen '{}'", index, display_tag(tag)),
                        ));
                    }
                }
            }
        }

        if let Some(amount) = ingredient.machine_amount() {
            if amount.non_negative_value().is_none() {
                out.push(Finding::error(
                    self.name(),
                    format!("Ingredient {}: machine_amount.value must be non-negative number", index),
                ));
            }
            match amount.unit() {
                None => out.push(Finding::error(
                    self.name(),
                    format!("Ingredient {}: machine_amount.unit is required", index),
                )),
                Some(unit) if !unit.as_str().is_some_and(Unit::contains) => {
                    out.push(Finding::warning(
                        self.name(),
                        format!("Ingredient {}: Non-standard unit '{}'", index, display_tag(unit)),
                    ))
                }
                Some(_) => {}
            }
        }
    }
}

impl RecipeRule for IngredientRule {
    fn name(&self) -> &'static str {
        "ingredient"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        let mut out = vec![];
        for (index, ingredient) in recipe.ingredients().enumerate() {
            self.check_one(index, &ingredient, &mut out);
        }
        out
    }
}

pub struct StepRule;

impl StepRule {
    fn check_one(&self, index: usize, step: &Step<'_>, out: &mut Vec<Finding>) {
        if let Some(id) = step.step_id_field() {
            if !id.as_str().is_some_and(is_step_id) {
                out.push(Finding::error(
                    self.name(),
                    format!("Step {}: Invalid ID format: {}", index, display_tag(id)),
                ));
            }
        }

        if let Some(action) = step.action() {
            if !action.as_str().is_some_and(CookingAction::contains) {
                out.push(Finding::error(
                    self.name(),
                    format!("Step {}: Invalid action '{}'", index, display_tag(action)),
                ));
            }
        }

        for hazard in step.hazards().unwrap_or(&[]) {
            if !hazard.as_str().is_some_and(HazardTag::contains) {
                out.push(Finding::warning(
                    self.name(),
                    format!("Step {}: Non-standard hazard '{}'", index, display_tag(hazard)),
                ));
            }
        }
    }
}

impl RecipeRule for StepRule {
    fn name(&self) -> &'static str {
        "step"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        let mut out = vec![];
        for (index, step) in recipe.steps().enumerate() {
            self.check_one(index, &step, &mut out);
        }
        out
    }
}

/// Declared `rcip_version` differs from the configured schema version.
pub struct VersionCompatibilityRule;

impl RecipeRule for VersionCompatibilityRule {
    fn name(&self) -> &'static str {
        "version_compatibility"
    }

    fn check(&self, recipe: &Recipe<'_>, ctx: &RuleContext) -> Vec<Finding> {
        match recipe.rcip_version_field() {
            Some(v) if v.as_str() != Some(ctx.schema_version.as_str()) => vec![Finding::warning(
                self.name(),
                format!(
                    "Recipe version {} may not be fully compatible with validator version {}",
                    display_tag(v),
                    ctx.schema_version
                ),
            )],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Severity;
    use serde_json::{json, Value};

    fn run(rule: &dyn RecipeRule, doc: &Value) -> Vec<Finding> {
        rule.check(&Recipe::new(doc), &RuleContext::new("0.1"))
    }

    fn messages(findings: &[Finding], severity: Severity) -> Vec<&str> {
        findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(|f| f.message.as_str())
            .collect()
    }

    #[test]
    fn test_recipe_id() {
        assert!(run(&RecipeIdRule, &json!({"id": "rcip-123e4567-e89b-12d3-a456-426614174000"})).is_empty());
        assert!(run(&RecipeIdRule, &json!({})).is_empty());

        let findings = run(&RecipeIdRule, &json!({"id": "invalid-id"}));
        assert_eq!(messages(&findings, Severity::Error), vec!["Invalid recipe ID format: invalid-id"]);
    }

    #[test]
    fn test_non_string_identifiers_are_invalid() {
        let findings = run(&RecipeIdRule, &json!({"id": 42}));
        assert_eq!(messages(&findings, Severity::Error), vec!["Invalid recipe ID format: 42"]);

        let doc = json!({"ingredients": [{"id": 7, "allergens": []}]});
        let findings = run(&IngredientRule, &doc);
        assert_eq!(messages(&findings, Severity::Error), vec!["Ingredient 0: Invalid ID format: 7"]);

        let doc = json!({"steps": [{"step_id": ["s-1"], "action": "mix"}]});
        let findings = run(&StepRule, &doc);
        assert_eq!(messages(&findings, Severity::Error), vec![r#"Step 0: Invalid ID format: ["s-1"]"#]);
    }

    #[test]
    fn test_allergen_field_is_required() {
        let doc = json!({"ingredients": [
            {"id": "ing-1", "allergens": []},
            {"id": "ing-2"},
            {"id": "ing-3", "allergens": {"milk": true}}
        ]});
        let findings = run(&IngredientRule, &doc);
        assert_eq!(
            messages(&findings, Severity::Error),
            vec![
                "Ingredient 1: Missing required allergens field",
                "Ingredient 2: allergens must be an array",
            ]
        );
    }

    #[test]
    fn test_unknown_allergen_is_error() {
        let doc = json!({"ingredients": [{"id": "ing-1", "allergens": ["milk", "pollen", 3]}]});
        let findings = run(&IngredientRule, &doc);
        assert_eq!(
            messages(&findings, Severity::Error),
            vec![
                "Ingredient 0: Invalid allergen 'pollen'",
                "Ingredient 0: Invalid allergen '3'",
            ]
        );
    }

    #[test]
    fn test_machine_amount_severity_split() {
        let doc = json!({"ingredients": [
            {"id": "ing-1", "allergens": [], "machine_amount": {"value": 1, "unit": "smidgen"}},
            {"id": "ing-2", "allergens": [], "machine_amount": {"value": -2}},
            {"id": "ing-3", "allergens": [], "machine_amount": {"unit": "g"}}
        ]});
        let findings = run(&IngredientRule, &doc);
        assert_eq!(
            messages(&findings, Severity::Warning),
            vec!["Ingredient 0: Non-standard unit 'smidgen'"]
        );
        assert_eq!(
            messages(&findings, Severity::Error),
            vec![
                "Ingredient 1: machine_amount.value must be non-negative number",
                "Ingredient 1: machine_amount.unit is required",
                "Ingredient 2: machine_amount.value must be non-negative number",
            ]
        );
    }

    #[test]
    fn test_ingredient_id_format() {
        let doc = json!({"ingredients": [{"id": "flour", "allergens": []}]});
        let findings = run(&IngredientRule, &doc);
        assert_eq!(messages(&findings, Severity::Error), vec!["Ingredient 0: Invalid ID format: flour"]);
    }

    #[test]
    fn test_step_rules() {
        let doc = json!({"steps": [
            {"step_id": "s-1", "action": "mix", "hazards": ["hot-surface"]},
            {"step_id": "step1", "action": "teleport", "hazards": ["lasers"]}
        ]});
        let findings = run(&StepRule, &doc);
        assert_eq!(
            messages(&findings, Severity::Error),
            vec!["Step 1: Invalid ID format: step1", "Step 1: Invalid action 'teleport'"]
        );
        assert_eq!(messages(&findings, Severity::Warning), vec!["Step 1: Non-standard hazard 'lasers'"]);
    }

    #[test]
    fn test_non_string_step_entries() {
        let doc = json!({"steps": [{"step_id": "s-1", "action": 5, "hazards": [1, "hot-surface"]}]});
        let findings = run(&StepRule, &doc);
        assert_eq!(messages(&findings, Severity::Error), vec!["Step 0: Invalid action '5'"]);
        assert_eq!(messages(&findings, Severity::Warning), vec!["Step 0: Non-standard hazard '1'"]);
    }

    #[test]
    fn test_version_compatibility_is_warning() {
        assert!(run(&VersionCompatibilityRule, &json!({"rcip_version": "0.1"})).is_empty());
        let findings = run(&VersionCompatibilityRule, &json!({"rcip_version": "0.2"}));
        assert_eq!(
            messages(&findings, Severity::Warning),
            vec!["Recipe version 0.2 may not be fully compatible with validator version 0.1"]
        );

        let findings = run(&VersionCompatibilityRule, &json!({"rcip_version": 0.1}));
        assert_eq!(
            messages(&findings, Severity::Warning),
            vec!["Recipe version 0.1 may not be fully compatible with validator version 0.1"]
        );
    }
}
