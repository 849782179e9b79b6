//! Build script: validates builtin-cases.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let cases_path: PathBuf = [&manifest_dir, "config", "builtin-cases.json"]
        .iter()
        .collect();
    println!("cargo:rerun-if-changed={}", cases_path.display());
    let json = std::fs::read_to_string(&cases_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. builtin-cases.json must exist and be valid.",
            cases_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct BuiltinCaseEntry {
        description: String,
        name1: String,
        name2: String,
        expected_match: bool,
    }
    let entries: Vec<BuiltinCaseEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "builtin-cases.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    if entries.is_empty() {
        panic!("builtin-cases.json must contain at least one case");
    }
}
