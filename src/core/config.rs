//! Match thresholds from environment, config file, or defaults.
//!
//! Precedence per threshold: environment variable, then `config.json` in the config
//! directory, then the built-in default. Command-line flags are applied by the caller.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::matching::{DEFAULT_MATCH_THRESHOLD, INTERACTIVE_MATCH_THRESHOLD};
use crate::core::paths;

pub const MATCH_THRESHOLD_ENV: &str = "FIND_MODELS_MATCH_THRESHOLD";
pub const INTERACTIVE_THRESHOLD_ENV: &str = "FIND_MODELS_INTERACTIVE_THRESHOLD";

/// Where a threshold value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    File,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Flag => write!(f, "from command line"),
            Source::Env => write!(f, "from environment"),
            Source::File => write!(f, "from config file"),
            Source::Default => write!(f, "default"),
        }
    }
}

/// A threshold and its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub value: f64,
    pub source: Source,
}

impl Threshold {
    /// Replace the value with a command-line override, if any.
    pub fn with_override(self, flag: Option<f64>) -> Self {
        match flag {
            Some(value) => Threshold {
                value,
                source: Source::Flag,
            },
            None => self,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Cutoff for lookups and the built-in cases.
    pub match_threshold: Threshold,
    /// Cutoff for direct name comparisons.
    pub interactive_threshold: Threshold,
    /// Config file consulted, whether or not it exists.
    pub file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key}: {value} (expected a number between 0.0 and 1.0)")]
    InvalidThreshold { key: String, value: String },
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON structure on disk.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    match_threshold: Option<f64>,
    interactive_threshold: Option<f64>,
}

/// Parse a threshold: a finite number in `[0.0, 1.0]`.
pub fn parse_threshold(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    check_range(parsed).ok_or_else(|| format!("{} is outside 0.0..=1.0", parsed))
}

fn check_range(value: f64) -> Option<f64> {
    (value.is_finite() && (0.0..=1.0).contains(&value)).then_some(value)
}

/// Load configuration from the environment and the default config file.
pub fn load() -> Result<Config, ConfigError> {
    let match_env = env::var(MATCH_THRESHOLD_ENV).ok();
    let interactive_env = env::var(INTERACTIVE_THRESHOLD_ENV).ok();
    load_from(
        match_env.as_deref(),
        interactive_env.as_deref(),
        paths::config_file(),
    )
}

/// Load configuration from explicit environment values and config file path.
pub fn load_from(
    match_env: Option<&str>,
    interactive_env: Option<&str>,
    file: Option<PathBuf>,
) -> Result<Config, ConfigError> {
    let on_disk = match file.as_deref() {
        Some(path) => read_file(path)?,
        None => ConfigFile::default(),
    };

    let match_threshold = resolve(
        MATCH_THRESHOLD_ENV,
        match_env,
        "match_threshold",
        on_disk.match_threshold,
        DEFAULT_MATCH_THRESHOLD,
    )?;
    let interactive_threshold = resolve(
        INTERACTIVE_THRESHOLD_ENV,
        interactive_env,
        "interactive_threshold",
        on_disk.interactive_threshold,
        INTERACTIVE_MATCH_THRESHOLD,
    )?;

    log::debug!(
        "thresholds: match {} ({}), interactive {} ({})",
        match_threshold.value,
        match_threshold.source,
        interactive_threshold.value,
        interactive_threshold.source
    );

    Ok(Config {
        match_threshold,
        interactive_threshold,
        file,
    })
}

/// Returns the default (empty) config when the file is absent.
fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    log::info!("reading config from {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn resolve(
    env_key: &str,
    env_value: Option<&str>,
    file_key: &str,
    file_value: Option<f64>,
    default: f64,
) -> Result<Threshold, ConfigError> {
    if let Some(raw) = env_value.filter(|s| !s.trim().is_empty()) {
        let value = parse_threshold(raw).map_err(|_| ConfigError::InvalidThreshold {
            key: env_key.to_string(),
            value: raw.to_string(),
        })?;
        return Ok(Threshold {
            value,
            source: Source::Env,
        });
    }
    if let Some(raw) = file_value {
        let value = check_range(raw).ok_or_else(|| ConfigError::InvalidThreshold {
            key: file_key.to_string(),
            value: raw.to_string(),
        })?;
        return Ok(Threshold {
            value,
            source: Source::File,
        });
    }
    Ok(Threshold {
        value: default,
        source: Source::Default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_without_env_or_file() {
        let config = load_from(None, None, None).unwrap();
        assert_eq!(config.match_threshold.value, DEFAULT_MATCH_THRESHOLD);
        assert_eq!(config.match_threshold.source, Source::Default);
        assert_eq!(config.interactive_threshold.value, INTERACTIVE_MATCH_THRESHOLD);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = load_from(None, None, Some(dir.path().join("config.json"))).unwrap();
        assert_eq!(config.match_threshold.source, Source::Default);
    }

    #[test]
    fn file_values_are_used() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"match_threshold": 0.8}"#);
        let config = load_from(None, None, Some(path)).unwrap();
        assert_eq!(config.match_threshold.value, 0.8);
        assert_eq!(config.match_threshold.source, Source::File);
        assert_eq!(config.interactive_threshold.source, Source::Default);
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"match_threshold": 0.8}"#);
        let config = load_from(Some("0.7"), None, Some(path)).unwrap();
        assert_eq!(config.match_threshold.value, 0.7);
        assert_eq!(config.match_threshold.source, Source::Env);
    }

    #[test]
    fn blank_env_is_ignored() {
        let config = load_from(Some("  "), None, None).unwrap();
        assert_eq!(config.match_threshold.source, Source::Default);
    }

    #[test]
    fn flag_overrides_everything() {
        let config = load_from(Some("0.7"), None, None).unwrap();
        let threshold = config.match_threshold.with_override(Some(0.5));
        assert_eq!(threshold.value, 0.5);
        assert_eq!(threshold.source, Source::Flag);
        assert_eq!(config.match_threshold.with_override(None).source, Source::Env);
    }

    #[test]
    fn invalid_env_is_rejected() {
        let err = load_from(None, Some("high"), None).unwrap_err();
        assert!(err.to_string().contains(INTERACTIVE_THRESHOLD_ENV));
    }

    #[test]
    fn out_of_range_file_value_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"interactive_threshold": 1.5}"#);
        let err = load_from(None, None, Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold { .. }));
        assert!(err.to_string().contains("interactive_threshold"));
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "{not json");
        let err = load_from(None, None, Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn parse_threshold_bounds() {
        assert_eq!(parse_threshold("0.85"), Ok(0.85));
        assert_eq!(parse_threshold(" 1 "), Ok(1.0));
        assert!(parse_threshold("-0.1").is_err());
        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("abc").is_err());
    }
}
