//! Reference Integrity
//!
//! Step targets and device profile links must resolve inside the same
//! document. Findings are attributed to the step identifier, or `"?"`.

use std::collections::HashSet;

use crate::document::{display_tag, Recipe, TargetRef};
use crate::validation::{Finding, RecipeRule, RuleContext};

pub fn rules() -> Vec<Box<dyn RecipeRule>> {
    vec![
        Box::new(TargetReferenceRule),
        Box::new(DeviceProfileReferenceRule),
        Box::new(UniqueIdentifierRule),
    ]
}

/// `ing-…` targets must name a declared ingredient and `<step>:result`
/// targets a declared step. Other forms pass unchecked.
pub struct TargetReferenceRule;

impl RecipeRule for TargetReferenceRule {
    fn name(&self) -> &'static str {
        "target_reference"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        let ingredient_ids = recipe.ingredient_ids();
        let step_ids = recipe.step_ids();
        let mut out = vec![];

        for step in recipe.steps() {
            for target in step.targets() {
                match target {
                    TargetRef::Ingredient(id) if !ingredient_ids.contains(id) => {
                        out.push(Finding::error(
                            self.name(),
                            format!("Step {}: Invalid ingredient reference '{}'", step.label(), id),
                        ));
                    }
                    TargetRef::StepResult { raw, step_id } if !step_ids.contains(step_id) => {
                        out.push(Finding::error(
                            self.name(),
                            format!("Step {}: Invalid step reference '{}'", step.label(), raw),
                        ));
                    }
                    _ => {}
                }
            }
        }

        out
    }
}

/// An unresolved `device_profile_ref` is advisory only.
pub struct DeviceProfileReferenceRule;

impl RecipeRule for DeviceProfileReferenceRule {
    fn name(&self) -> &'static str {
        "device_profile_reference"
    }

    fn check(&self, recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
        let profile_ids = recipe.device_profile_ids();

        recipe
            .steps()
            .filter_map(|step| {
                let reference = step.device_profile_ref()?;
                let resolved = reference.as_str().is_some_and(|r| profile_ids.contains(r));
                (!resolved).then(|| {
                    Finding::warning(
                        self.name(),
                        format!(
                            "Step {}: Unknown device profile '{}'",
                            step.label(),
                            display_tag(reference)
                        ),
                    )
                })
            })
            .collect()
    }
}

/// Duplicate ingredient or step identifiers. Only active when
/// [`RuleContext::enforce_unique_ids`] is set.
pub struct UniqueIdentifierRule;

impl UniqueIdentifierRule {
    fn duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        ids.filter(|id| !seen.insert(*id) && reported.insert(*id))
            .collect()
    }
}

impl RecipeRule for UniqueIdentifierRule {
    fn name(&self) -> &'static str {
        "unique_identifier"
    }

    fn check(&self, recipe: &Recipe<'_>, ctx: &RuleContext) -> Vec<Finding> {
        if !ctx.enforce_unique_ids {
            return vec![];
        }

        let mut out: Vec<Finding> = Self::duplicates(recipe.ingredients().filter_map(|i| i.id()))
            .into_iter()
            .map(|id| Finding::error(self.name(), format!("Duplicate ingredient ID '{}'", id)))
            .collect();
        out.extend(
            Self::duplicates(recipe.steps().filter_map(|s| s.step_id()))
                .into_iter()
                .map(|id| Finding::error(self.name(), format!("Duplicate step ID '{}'", id))),
        );
        out
    }
}
