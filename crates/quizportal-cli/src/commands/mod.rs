//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::Result;

use quizportal_store::config::{load_config_from, PortalConfig};

pub mod init;
pub mod portal;
pub mod stats;

/// Flags shared by every subcommand.
pub struct GlobalOptions {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Resolve the effective configuration: file, then env, then flags.
    pub fn resolve(&self) -> Result<PortalConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        tracing::debug!(?config, "effective configuration");
        Ok(config)
    }
}
