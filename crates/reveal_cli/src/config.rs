//! Reveal configuration file handling

use anyhow::{Context, Result};
use reveal_core::{EmitterStrategy, RevealConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up when a directory is given
pub const CONFIG_FILE: &str = "reveal.toml";

/// Resolve a `--config` argument: files are used as-is, directories are
/// searched for `reveal.toml`.
fn config_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Load configuration from a file or directory
pub fn load_from_path(path: &Path) -> Result<RevealConfig> {
    let config_path = config_path(path);

    if !config_path.exists() {
        anyhow::bail!(
            "No configuration found at {}. Run `reveal config > {}` to create one.",
            config_path.display(),
            CONFIG_FILE
        );
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let config = RevealConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded configuration");
    Ok(config)
}

/// Build the effective configuration from CLI arguments
pub fn resolve(path: Option<&Path>, strategy: Option<EmitterStrategy>) -> Result<RevealConfig> {
    let config = match path {
        Some(path) => load_from_path(path)?,
        None => RevealConfig::default(),
    };
    Ok(match strategy {
        Some(strategy) => config.with_strategy(strategy),
        None => config,
    })
}

/// Serialize to TOML string
pub fn to_toml(config: &RevealConfig) -> Result<String> {
    config.to_toml().context("Failed to serialize config")
}
