//! Validation System - Rules and Stages
//!
//! Rules produce findings. The engine runs rules stage by stage;
//! severity decides what a finding does to validity.

use serde::{Deserialize, Serialize};

use crate::advisory;
use crate::document::Recipe;
use crate::references;
use crate::semantic;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Settings a rule may consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    /// Schema version the session was configured for.
    pub schema_version: String,
    /// Treat duplicate ingredient/step identifiers as errors.
    pub enforce_unique_ids: bool,
}

impl RuleContext {
    pub fn new(schema_version: impl Into<String>) -> Self {
        Self {
            schema_version: schema_version.into(),
            enforce_unique_ids: false,
        }
    }
}

/// Validation rule trait - produces findings
pub trait RecipeRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, recipe: &Recipe<'_>, ctx: &RuleContext) -> Vec<Finding>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Semantic,
    Reference,
    Advisory,
}

/// Findings of one engine run, in stage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFindings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RuleFindings {
    fn absorb(&mut self, stage: Stage, findings: Vec<Finding>) {
        for finding in findings {
            match (stage, finding.severity) {
                // Advisories never affect validity.
                (Stage::Advisory, _) | (_, Severity::Warning) => {
                    self.warnings.push(finding.message)
                }
                (_, Severity::Error) => self.errors.push(finding.message),
            }
        }
    }
}

/// Runs rule stages in order: semantic, reference, advisory.
pub struct RuleEngine {
    stages: Vec<(Stage, Vec<Box<dyn RecipeRule>>)>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            stages: vec![
                (Stage::Semantic, semantic::rules()),
                (Stage::Reference, references::rules()),
                (Stage::Advisory, advisory::rules()),
            ],
        }
    }

    /// Names of all registered rules, in execution order.
    pub fn rule_names(&self) -> Vec<(Stage, &'static str)> {
        self.stages
            .iter()
            .flat_map(|(stage, rules)| rules.iter().map(move |r| (*stage, r.name())))
            .collect()
    }

    pub fn run(&self, recipe: &Recipe<'_>, ctx: &RuleContext) -> RuleFindings {
        let mut out = RuleFindings::default();
        for (stage, rules) in &self.stages {
            for rule in rules {
                out.absorb(*stage, rule.check(recipe, ctx));
            }
        }
        out
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct AlwaysError;

    impl RecipeRule for AlwaysError {
        fn name(&self) -> &'static str {
            "always_error"
        }

        fn check(&self, _recipe: &Recipe<'_>, _ctx: &RuleContext) -> Vec<Finding> {
            vec![Finding::error(self.name(), "boom")]
        }
    }

    #[test]
    fn test_advisory_stage_never_yields_errors() {
        let engine = RuleEngine {
            stages: vec![(Stage::Advisory, vec![Box::new(AlwaysError)])],
        };
        let doc = json!({});
        let out = engine.run(&Recipe::new(&doc), &RuleContext::new("0.1"));
        assert!(out.errors.is_empty());
        assert_eq!(out.warnings, vec!["boom".to_string()]);
    }

    #[test]
    fn test_stage_order() {
        let engine = RuleEngine::new();
        let stages: Vec<Stage> = engine.rule_names().into_iter().map(|(s, _)| s).collect();
        let mut sorted = stages.clone();
        sorted.sort_by_key(|s| match s {
            Stage::Semantic => 0,
            Stage::Reference => 1,
            Stage::Advisory => 2,
        });
        assert_eq!(stages, sorted);
        assert!(!stages.is_empty());
    }
}
