//! Built-in regression cases: labelled name pairs with the expected match decision.
//!
//! Loaded from `config/builtin-cases.json` (embedded at compile time, validated by `build.rs`).

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::matching::MatchReport;

/// A labelled pair of names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinCase {
    pub description: String,
    pub name1: String,
    pub name2: String,
    pub expected_match: bool,
}

/// Outcome of running one case at a given threshold.
#[derive(Clone, Debug, Serialize)]
pub struct CaseOutcome {
    pub case: BuiltinCase,
    pub report: MatchReport,
    pub passed: bool,
}

fn load_builtin_cases() -> Vec<BuiltinCase> {
    let json = include_str!("../../config/builtin-cases.json");
    serde_json::from_str(json).expect("builtin-cases.json must be valid")
}

static BUILTIN_CASES: OnceLock<Vec<BuiltinCase>> = OnceLock::new();

/// Returns all built-in cases, parsing them on first access.
pub fn builtin_cases() -> &'static [BuiltinCase] {
    BUILTIN_CASES.get_or_init(load_builtin_cases)
}

/// Run every built-in case against `threshold`.
pub fn run_cases(threshold: f64) -> Vec<CaseOutcome> {
    builtin_cases()
        .iter()
        .map(|case| {
            let report = MatchReport::new(&case.name1, &case.name2, threshold);
            let passed = report.is_match == case.expected_match;
            if !passed {
                log::warn!(
                    "case {:?} failed: similarity {:.4} at threshold {}",
                    case.description,
                    report.similarity,
                    threshold
                );
            }
            CaseOutcome {
                case: case.clone(),
                report,
                passed,
            }
        })
        .collect()
}
