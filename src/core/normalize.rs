//! Name normalization: collapse naming conventions into lower-case, space-separated words.
//!
//! Handles snake_case, SCREAMING_SNAKE_CASE, kebab-case, camelCase, PascalCase and
//! dot.case. flatcase (`userprofilename`) has no boundaries to find and stays one word.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_\-.]+").expect("valid separator regex"));

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid camel regex"));

static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid acronym regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Split off the extension of the last path component.
///
/// The extension starts at the last `.` of the final component, unless every character
/// before that dot is also a dot (`.gitignore`, `..`), in which case there is none.
/// Both `/` and `\` count as path separators.
pub fn strip_extension(name: &str) -> &str {
    let sep = name.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    match name.rfind('.') {
        Some(dot) if dot >= sep && name[sep..dot].bytes().any(|b| b != b'.') => &name[..dot],
        _ => name,
    }
}

/// Normalize a model or file name into lower-case words separated by single spaces.
///
/// Returns an empty string for empty input.
pub fn normalize_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let stem = strip_extension(name);
    let spaced = SEPARATOR_RUN.replace_all(stem, " ");
    let spaced = CAMEL_BOUNDARY.replace_all(&spaced, "${1} ${2}");
    let spaced = ACRONYM_BOUNDARY.replace_all(&spaced, "${1} ${2}");

    let lower = spaced.to_lowercase();
    WHITESPACE_RUN.replace_all(lower.trim(), " ").into_owned()
}

/// Query text for a hosting-site search: the raw name without its extension.
pub fn search_query(name: &str) -> &str {
    strip_extension(name)
}
