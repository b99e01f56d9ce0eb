//! Advisory Rules
//!
//! Completeness and quality recommendations. Every finding here is a
//! warning; none of them affect validity.

use crate::document::{display_tag, Recipe};
use crate::identifiers::is_semantic_version;
use crate::validation::{Finding, RecipeRule, RuleContext};
use crate::vocabulary::{DietLabel, Vocabulary};

/// Cooking times above this many minutes (24h) are flagged.
pub const LONG_COOKING_MINUTES: f64 = 1440.0;

const RECOMMENDED_META_FIELDS: [&str; 3] = ["description", "servings", "difficulty"];

pub fn rules() -> Vec<Box<dyn RecipeRule>> {
    vec![
        Box::new(RecommendedMetadataRule),
        Box::new(NutritionRule),
        Box::new(ExternalIdRule),
        Box::new(SensorCoverageRule),
        Box::new(CookingTimeRule),
        Box::new(ImageRule),
        Box::new(DietLabelRule),
        Box::new(RecipeVersionRule),
    ]
}

pub struct RecommendedMetadataRule;

impl RecipeRule for RecommendedMetadataRule {
    fn name(&self) -> &'static str {
        "recommended_metadata"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        let meta = recipe.meta();
        RECOMMENDED_META_FIELDS
            .iter()
            .filter(|field| !meta.has_field(field))
            .map(|field| {
                Finding::warning(self.name(), format!("Missing recommended field: meta.{}", field))
            })
            .collect()
    }
}

pub struct NutritionRule;

impl RecipeRule for NutritionRule {
    fn name(&self) -> &'static str {
        "nutrition"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        if recipe.ingredients().any(|i| i.has_nutritional()) {
            vec![]
        } else {
            vec![Finding::warning(self.name(), "No nutritional data provided for any ingredient")]
        }
    }
}

pub struct ExternalIdRule;

impl RecipeRule for ExternalIdRule {
    fn name(&self) -> &'static str {
        "external_ids"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        if recipe.ingredients().any(|i| i.has_external_ids()) {
            vec![]
        } else {
            vec![Finding::warning(self.name(), "No external IDs (USDA, GTIN, etc.) provided")]
        }
    }
}

pub struct SensorCoverageRule;

impl RecipeRule for SensorCoverageRule {
    fn name(&self) -> &'static str {
        "sensor_coverage"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        if recipe.has_device_profiles() && !recipe.has_sensors() {
            vec![Finding::warning(self.name(), "Device profiles defined but no sensors specified")]
        } else {
            vec![]
        }
    }
}

pub struct CookingTimeRule;

impl RecipeRule for CookingTimeRule {
    fn name(&self) -> &'static str {
        "cooking_time"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        match recipe.meta().total_time_minutes() {
            Some(minutes) if minutes > LONG_COOKING_MINUTES => vec![Finding::warning(
                self.name(),
                format!(
                    "Very long cooking time ({} min / {:.1} hours)",
                    minutes,
                    minutes / 60.0
                ),
            )],
            _ => vec![],
        }
    }
}

pub struct ImageRule;

impl RecipeRule for ImageRule {
    fn name(&self) -> &'static str {
        "images"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        if recipe.has_images() {
            vec![]
        } else {
            vec![Finding::warning(self.name(), "No images provided for recipe")]
        }
    }
}

/// Diet labels are an extensible vocabulary, so unknown ones only warn.
pub struct DietLabelRule;

impl RecipeRule for DietLabelRule {
    fn name(&self) -> &'static str {
        "diet_labels"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        recipe
            .meta()
            .diet_labels()
            .iter()
            .filter(|label| !label.as_str().is_some_and(DietLabel::contains))
            .map(|label| {
                Finding::warning(
                    self.name(),
                    format!("Non-standard diet label '{}'", display_tag(label)),
                )
            })
            .collect()
    }
}

pub struct RecipeVersionRule;

impl RecipeRule for RecipeVersionRule {
    fn name(&self) -> &'static str {
        "recipe_version"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        match recipe.meta().version() {
            Some(v) if !is_semantic_version(v) => vec![Finding::warning(
                self.name(),
                format!("Recipe version '{}' is not a MAJOR.MINOR.PATCH version", v),
            )],
            _ => vec![],
        }
    }
}
