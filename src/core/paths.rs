//! Centralized path helpers for the config directory.

use std::env;
use std::path::PathBuf;

use crate::core::app;

/// Overrides the platform config directory (used by tests and portable installs).
pub const CONFIG_DIR_ENV: &str = "FIND_MODELS_CONFIG_DIR";

/// Project directories from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Config directory (~/.config/find-models/), or `FIND_MODELS_CONFIG_DIR` when set.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

/// Config file (~/.config/find-models/config.json).
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.json"))
}
