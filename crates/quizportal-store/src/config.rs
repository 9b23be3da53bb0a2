//! Portal configuration and store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizportal_core::ledger::DEFAULT_PASS_THRESHOLD;
use quizportal_core::traits::RecordStore;

use crate::file::FileStore;

/// Environment variable that overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "QUIZPORTAL_DATA_DIR";

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "quizportal.toml";

/// Top-level quizportal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Directory holding the collection files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Minimum score on any attempt that unlocks levels above 1.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u32,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_pass_threshold() -> u32 {
    DEFAULT_PASS_THRESHOLD
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            pass_threshold: default_pass_threshold(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizportal.toml` in the current directory
/// 2. `~/.config/quizportal/config.toml`
///
/// Environment variable override: `QUIZPORTAL_DATA_DIR`.
pub fn load_config() -> Result<PortalConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PortalConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => PortalConfig::default(),
    };

    apply_data_dir_override(&mut config, std::env::var(DATA_DIR_ENV).ok());
    Ok(config)
}

/// Replace `data_dir` with a non-empty `QUIZPORTAL_DATA_DIR` value.
fn apply_data_dir_override(config: &mut PortalConfig, value: Option<String>) {
    if let Some(dir) = value.filter(|d| !d.is_empty()) {
        config.data_dir = PathBuf::from(dir);
    }
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<PortalConfig> {
    Ok(toml::from_str::<PortalConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizportal"))
}

/// Open the file store described by `config`.
pub fn open_store(config: &PortalConfig) -> Result<Arc<dyn RecordStore>> {
    let store = FileStore::open(&config.data_dir).with_context(|| {
        format!(
            "failed to open data directory: {}",
            config.data_dir.display()
        )
    })?;
    tracing::info!(data_dir = %store.root().display(), "record store opened");
    Ok(Arc::new(store))
}

/// Starter config written by `quizportal init`.
pub const SAMPLE_CONFIG: &str = r#"# quizportal configuration

# Directory holding the record files (admin_creds.txt, quiz.txt, results.txt, ...).
data_dir = "."

# Minimum score on any attempt that unlocks levels 2 and 3.
pass_threshold = 2
"#;
