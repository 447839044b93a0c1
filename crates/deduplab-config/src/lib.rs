//! Layered configuration: defaults < TOML file < environment (`DEDUPLAB_*`).
//!
//! Mirrors the original `DEFAULTS` dict, trimmed to the keys this workspace's
//! core actually consumes — `nsfw`, `auto_install_deps`, and `meta_format`
//! are external-collaborator concerns and are not modeled here.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("failed to write default configuration: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to serialize default configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Only `sha256` is a valid fingerprint algorithm — an enum of one variant
/// instead of a free string, so unsupported algorithms are rejected at
/// deserialization time rather than at first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgo {
    #[default]
    Sha256,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hash_algo: HashAlgo,
    /// Worker count; `0` = auto-detect hardware threads.
    pub parallelism: usize,
    pub dry_run: bool,
    pub ignore_patterns: Vec<String>,
    pub checkpoint: bool,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub metrics_path: PathBuf,
    pub export_folder_meta: bool,
    pub meta_pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_algo: HashAlgo::Sha256,
            parallelism: 0,
            dry_run: true,
            ignore_patterns: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "__pycache__".to_string(),
                ".deduplab_duplicates".to_string(),
            ],
            checkpoint: true,
            db_path: PathBuf::from("output/index.db"),
            log_dir: PathBuf::from("output/logs"),
            metrics_path: PathBuf::from("output/metrics.json"),
            export_folder_meta: false,
            meta_pretty: false,
        }
    }
}

/// Loads configuration from `path`, auto-creating it with defaults if
/// absent, then layering environment overrides (`DEDUPLAB_*`) on top.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    ensure_config(path)?;

    let config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("DEDUPLAB_"))
        .extract()?;
    Ok(config)
}

/// Writes a default configuration file if one does not already exist.
pub fn ensure_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let toml = toml::to_string_pretty(&Config::default())?;
    std::fs::write(path, toml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = load_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.parallelism, 0);
        assert!(config.ignore_patterns.contains(&".deduplab_duplicates".to_string()));
    }

    #[test]
    fn existing_config_values_are_respected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "parallelism = 8\ndry_run = false\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.parallelism, 8);
        assert!(!config.dry_run);
    }

    #[test]
    fn env_override_takes_precedence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "parallelism = 8\n").unwrap();

        unsafe {
            std::env::set_var("DEDUPLAB_PARALLELISM", "16");
        }
        let config = load_config(&path).unwrap();
        unsafe {
            std::env::remove_var("DEDUPLAB_PARALLELISM");
        }
        assert_eq!(config.parallelism, 16);
    }
}
