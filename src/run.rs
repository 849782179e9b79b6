//! Command runners: logger init and one function per subcommand.
//!
//! These print plain text (or JSON with `--json`) to stdout. Failures that are answers
//! rather than errors (no match, failing cases) exit with status 1.

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;

use find_models::core::cases::run_cases;
use find_models::core::config::Config;
use find_models::core::matching::{self, BestMatch, Candidate, MatchReport};
use find_models::core::normalize::normalize_name;
use find_models::core::similarity::{ScoreBreakdown, score_breakdown};

use crate::cli::Args;

/// Initialize env_logger on stderr at the level chosen by -v/-q (RUST_LOG wins).
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .target(env_logger::Target::Stderr)
    .try_init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct NormalizedName<'a> {
    name: &'a str,
    normalized: String,
}

/// Run `normalize`: print each name's normalized form.
pub fn run_normalize(names: &[String], json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        let out: Vec<NormalizedName> = names
            .iter()
            .map(|name| NormalizedName {
                name: name.as_str(),
                normalized: normalize_name(name),
            })
            .collect();
        return print_json(&out);
    }
    for name in names {
        println!("{}", normalize_name(name));
    }
    Ok(())
}

#[derive(Serialize)]
struct ExplainedReport {
    #[serde(flatten)]
    report: MatchReport,
    threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<ScoreBreakdown>,
}

/// Run `compare`: print the match report for two names.
pub fn run_compare(
    config: &Config,
    name1: &str,
    name2: &str,
    threshold: Option<f64>,
    explain: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let threshold = config.interactive_threshold.with_override(threshold);
    log::info!("comparing at threshold {} ({})", threshold.value, threshold.source);

    let report = MatchReport::new(name1, name2, threshold.value);
    let breakdown = explain.then(|| score_breakdown(name1, name2));

    if json {
        return print_json(&ExplainedReport {
            report,
            threshold: threshold.value,
            breakdown,
        });
    }

    println!("Name 1:       {}", report.name1);
    println!("Normalized 1: {}", report.normalized1);
    println!("Name 2:       {}", report.name2);
    println!("Normalized 2: {}", report.normalized2);
    println!("Similarity:   {:.4}", report.similarity);
    println!(
        "Match:        {} (threshold {:.2})",
        if report.is_match { "yes" } else { "no" },
        threshold.value
    );

    if let Some(breakdown) = breakdown {
        let comparison = breakdown.comparison;
        if let Some(shortcut) = comparison.shortcut {
            println!("Shortcut:     {:?}", shortcut);
        }
        if let Some(m) = comparison.metrics {
            println!(
                "Words:        {} shared of {} total",
                m.shared_words, m.total_words
            );
            println!("Jaccard:      {:.4}", m.jaccard);
            println!("Sequence:     {:.4}", m.sequence_ratio);
            println!("Blended:      {:.4}", m.blended);
            println!("Penalty:      {}", yes_no(m.length_penalty));
            println!("Containment:  {}", yes_no(m.containment_boost));
            println!("Core words:   {}", yes_no(m.core_word_boost));
        }
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "applied" } else { "-" }
}

fn read_candidates(source: &str) -> Result<Vec<Candidate>, matching::CandidatesError> {
    if source == "-" {
        matching::load_candidates(io::stdin().lock())
    } else {
        matching::load_candidates(io::BufReader::new(File::open(source)?))
    }
}

/// Run `pick`: choose the best candidate for `query` from a JSON list.
pub fn run_pick(
    config: &Config,
    query: &str,
    source: &str,
    threshold: Option<f64>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let threshold = config.match_threshold.with_override(threshold);
    let candidates = read_candidates(source)?;
    log::info!(
        "ranking {} candidate(s) for {:?} at threshold {}",
        candidates.len(),
        query,
        threshold.value
    );

    let Some(best) = matching::pick_best(query, &candidates, threshold.value) else {
        eprintln!("No matching candidate for {}", query);
        std::process::exit(1);
    };

    if json {
        return print_json(&best);
    }
    print_best(&best);
    Ok(())
}

fn print_best(best: &BestMatch) {
    let kind = if best.exact {
        "exact"
    } else if best.confident {
        "confident"
    } else {
        "not confident"
    };
    println!("File:       {}", best.candidate.file_name);
    println!("Listing:    {}", best.candidate.model_name);
    println!("Candidate:  #{}", best.index);
    println!("Similarity: {:.4} ({})", best.similarity, kind);
}

/// Run `selftest`: check the built-in name pairs.
pub fn run_selftest(config: &Config, threshold: Option<f64>) -> Result<(), Box<dyn Error>> {
    let threshold = config.match_threshold.with_override(threshold);
    let outcomes = run_cases(threshold.value);

    for outcome in &outcomes {
        let status = if outcome.passed { "[OK]  " } else { "[FAIL]" };
        println!("{} {}", status, outcome.case.description);
        println!(
            "       {} | {}  ->  {:.4}",
            outcome.report.normalized1, outcome.report.normalized2, outcome.report.similarity
        );
    }

    let passed = outcomes.iter().filter(|o| o.passed).count();
    println!(
        "\n{}/{} cases passed (threshold {:.2}, {})",
        passed,
        outcomes.len(),
        threshold.value,
        threshold.source
    );
    if passed != outcomes.len() {
        std::process::exit(1);
    }
    Ok(())
}

/// Config file path for display, noting when it does not exist.
fn describe_config_file(file: Option<&Path>) -> String {
    match file {
        Some(p) if p.exists() => p.display().to_string(),
        Some(p) => format!("{} (not present)", p.display()),
        None => "(none)".to_string(),
    }
}

/// Run `config`: display the config file path and effective thresholds.
pub fn run_config(config: &Config) {
    println!(
        "Config file:           {}",
        describe_config_file(config.file.as_deref())
    );
    println!(
        "Match threshold:       {:.2} ({})",
        config.match_threshold.value, config.match_threshold.source
    );
    println!(
        "Interactive threshold: {:.2} ({})",
        config.interactive_threshold.value, config.interactive_threshold.source
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_placeholder_is_ascii() {
        assert_eq!(describe_config_file(None), "(none)");
    }

    #[test]
    fn config_file_marks_missing_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("config.json");
        assert!(describe_config_file(Some(&missing)).ends_with("(not present)"));
        std::fs::write(&missing, "{}").unwrap();
        assert_eq!(
            describe_config_file(Some(&missing)),
            missing.display().to_string()
        );
    }
}
