//! Recipe Document Model
//!
//! Borrowed, read-only views over a decoded RCIP document. Views never fail:
//! absent or mistyped fields read as `None`/empty so that rules decide what
//! a missing field means.

use serde_json::Value;
use std::collections::HashSet;

use crate::identifiers::{INGREDIENT_PREFIX, STEP_RESULT_MARKER};

/// Label used for a step that carries no identifier.
pub const UNKNOWN_STEP: &str = "?";

fn array_of<'a>(value: Option<&'a Value>) -> &'a [Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Render a vocabulary entry for a message; non-strings render as JSON.
pub fn display_tag(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Recipe<'a> {
    root: &'a Value,
}

impl<'a> Recipe<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// `id` as written, whatever its type.
    pub fn id_field(&self) -> Option<&'a Value> {
        self.root.get("id")
    }

    pub fn rcip_version(&self) -> Option<&'a str> {
        self.root.get("rcip_version").and_then(Value::as_str)
    }

    pub fn rcip_version_field(&self) -> Option<&'a Value> {
        self.root.get("rcip_version")
    }

    pub fn meta(&self) -> Meta<'a> {
        Meta {
            value: self.root.get("meta"),
        }
    }

    pub fn ingredients(&self) -> impl Iterator<Item = Ingredient<'a>> + 'a {
        array_of(self.root.get("ingredients"))
            .iter()
            .map(|value| Ingredient { value })
    }

    pub fn steps(&self) -> impl Iterator<Item = Step<'a>> + 'a {
        array_of(self.root.get("steps"))
            .iter()
            .map(|value| Step { value })
    }

    pub fn device_profiles(&self) -> impl Iterator<Item = DeviceProfile<'a>> + 'a {
        array_of(self.root.get("device_profiles"))
            .iter()
            .map(|value| DeviceProfile { value })
    }

    pub fn ingredient_count(&self) -> usize {
        array_of(self.root.get("ingredients")).len()
    }

    pub fn step_count(&self) -> usize {
        array_of(self.root.get("steps")).len()
    }

    pub fn has_device_profiles(&self) -> bool {
        !array_of(self.root.get("device_profiles")).is_empty()
    }

    pub fn has_sensors(&self) -> bool {
        !array_of(self.root.get("sensors")).is_empty()
    }

    pub fn has_images(&self) -> bool {
        !array_of(self.root.get("images")).is_empty()
    }

    pub fn ingredient_ids(&self) -> HashSet<&'a str> {
        self.ingredients().filter_map(|i| i.id()).collect()
    }

    pub fn step_ids(&self) -> HashSet<&'a str> {
        self.steps().filter_map(|s| s.step_id()).collect()
    }

    pub fn device_profile_ids(&self) -> HashSet<&'a str> {
        self.device_profiles().filter_map(|d| d.id()).collect()
    }
}

/// The `meta` block. An absent block behaves as an empty one.
#[derive(Debug, Clone, Copy)]
pub struct Meta<'a> {
    value: Option<&'a Value>,
}

impl<'a> Meta<'a> {
    pub fn has_field(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.value.and_then(|m| m.get(field))
    }

    pub fn name(&self) -> Option<&'a str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&'a str> {
        self.get("version").and_then(Value::as_str)
    }

    pub fn difficulty(&self) -> Option<&'a str> {
        self.get("difficulty").and_then(Value::as_str)
    }

    pub fn total_time_minutes(&self) -> Option<f64> {
        self.get("total_time_minutes").and_then(Value::as_f64)
    }

    pub fn diet_labels(&self) -> &'a [Value] {
        array_of(self.get("diet_labels"))
    }
}

/// State of an ingredient's `allergens` field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllergenField<'a> {
    Missing,
    NotASequence,
    Tags(&'a [Value]),
}

#[derive(Debug, Clone, Copy)]
pub struct Ingredient<'a> {
    value: &'a Value,
}

impl<'a> Ingredient<'a> {
    pub fn id(&self) -> Option<&'a str> {
        self.value.get("id").and_then(Value::as_str)
    }

    pub fn id_field(&self) -> Option<&'a Value> {
        self.value.get("id")
    }

    pub fn allergens(&self) -> AllergenField<'a> {
        match self.value.get("allergens") {
            None => AllergenField::Missing,
            Some(Value::Array(tags)) => AllergenField::Tags(tags),
            Some(_) => AllergenField::NotASequence,
        }
    }

    pub fn machine_amount(&self) -> Option<MachineAmount<'a>> {
        self.value
            .get("machine_amount")
            .map(|value| MachineAmount { value })
    }

    pub fn has_nutritional(&self) -> bool {
        self.value.get("nutritional").is_some()
    }

    /// True when `external_ids` is a non-empty mapping.
    pub fn has_external_ids(&self) -> bool {
        self.value
            .get("external_ids")
            .and_then(Value::as_object)
            .is_some_and(|ids| !ids.is_empty())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MachineAmount<'a> {
    value: &'a Value,
}

impl<'a> MachineAmount<'a> {
    /// `Some` only for a number that is zero or greater.
    pub fn non_negative_value(&self) -> Option<f64> {
        self.value
            .get("value")
            .and_then(Value::as_f64)
            .filter(|v| *v >= 0.0)
    }

    pub fn unit(&self) -> Option<&'a Value> {
        self.value.get("unit")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    value: &'a Value,
}

impl<'a> Step<'a> {
    pub fn step_id(&self) -> Option<&'a str> {
        self.value.get("step_id").and_then(Value::as_str)
    }

    pub fn step_id_field(&self) -> Option<&'a Value> {
        self.value.get("step_id")
    }

    /// Identifier used to attribute findings, `"?"` when absent.
    pub fn label(&self) -> &'a str {
        self.step_id().unwrap_or(UNKNOWN_STEP)
    }

    pub fn action(&self) -> Option<&'a Value> {
        self.value.get("action")
    }

    pub fn hazards(&self) -> Option<&'a [Value]> {
        self.value
            .get("hazards")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// String entries of `target`; other entry types are skipped.
    pub fn targets(&self) -> impl Iterator<Item = TargetRef<'a>> + 'a {
        array_of(self.value.get("target"))
            .iter()
            .filter_map(Value::as_str)
            .map(TargetRef::parse)
    }

    pub fn device_profile_ref(&self) -> Option<&'a Value> {
        self.value.get("device_profile_ref")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeviceProfile<'a> {
    value: &'a Value,
}

impl<'a> DeviceProfile<'a> {
    pub fn id(&self) -> Option<&'a str> {
        self.value.get("id").and_then(Value::as_str)
    }
}

/// A step target, classified by form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRef<'a> {
    /// `ing-…`
    Ingredient(&'a str),
    /// `<step_id>:result`; `step_id` is the text before the first `:`.
    StepResult { raw: &'a str, step_id: &'a str },
    /// Any other form, accepted as-is.
    Other(&'a str),
}

impl<'a> TargetRef<'a> {
    pub fn parse(raw: &'a str) -> Self {
        if raw.starts_with(INGREDIENT_PREFIX) {
            TargetRef::Ingredient(raw)
        } else if raw.contains(STEP_RESULT_MARKER) {
            let step_id = raw.split(':').next().unwrap_or(raw);
            TargetRef::StepResult { raw, step_id }
        } else {
            TargetRef::Other(raw)
        }
    }
}
