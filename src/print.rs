//! Text Report Rendering
//!
//! Human-readable output for the CLI. The error list is capped for display
//! only; results always carry every finding.

use std::fmt::Write;

use crate::report::ValidationResult;
use crate::session::SessionStats;

/// Errors listed per document before the rest are summarized.
pub const MAX_LISTED_ERRORS: usize = 10;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn render_result(file_name: &str, result: &ValidationResult) -> String {
    let info = &result.info;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "File: {}", file_name);
    let _ = writeln!(out, "Recipe: {}", info.name);
    let _ = writeln!(out, "Status: {}", if result.valid { "VALID" } else { "INVALID" });

    let _ = writeln!(out, "\nRecipe Info:");
    let _ = writeln!(
        out,
        "  - RCIP Version: {}",
        info.rcip_version.as_deref().unwrap_or("not specified")
    );
    let _ = writeln!(out, "  - Ingredients: {}", info.ingredient_count);
    let _ = writeln!(out, "  - Steps: {}", info.step_count);
    let _ = writeln!(
        out,
        "  - Difficulty: {}",
        info.difficulty.as_deref().unwrap_or("not specified")
    );
    match info.total_time_minutes {
        Some(minutes) => {
            let _ = writeln!(out, "  - Total Time: {} minutes", minutes);
        }
        None => {
            let _ = writeln!(out, "  - Total Time: not specified");
        }
    }
    if !info.allergens.is_empty() {
        let _ = writeln!(out, "  - Allergens: {}", info.allergens.join(", "));
    }
    if !info.diet_labels.is_empty() {
        let _ = writeln!(out, "  - Diet Labels: {}", info.diet_labels.join(", "));
    }

    if !result.errors.is_empty() {
        let _ = writeln!(out, "\nErrors ({}):", result.errors.len());
        for (i, error) in result.errors.iter().take(MAX_LISTED_ERRORS).enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, error);
        }
        if result.errors.len() > MAX_LISTED_ERRORS {
            let _ = writeln!(
                out,
                "  ... and {} more errors",
                result.errors.len() - MAX_LISTED_ERRORS
            );
        }
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings ({}):", result.warnings.len());
        for warning in &result.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    let _ = writeln!(out, "{}", rule());
    out
}

pub fn render_summary(stats: &SessionStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "VALIDATION SUMMARY");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Total Validated: {}", stats.validated);
    if let (Some(pass), Some(fail)) = (stats.pass_rate(), stats.fail_rate()) {
        let _ = writeln!(out, "Passed: {} ({:.0}%)", stats.passed, pass);
        let _ = writeln!(out, "Failed: {} ({:.0}%)", stats.failed, fail);
    }
    let _ = writeln!(out, "{}", rule());
    out
}
