//! Optional CLI configuration from `pragati.toml` in the working directory.
//!
//! ```toml
//! db_path = "/var/lib/pragati/pragati.sqlite3"
//! default_actor = "dc-mumbai"
//! ```
//!
//! Both keys are optional; flags and environment variables always win.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file searched in the working directory.
pub const CONFIG_FILE: &str = "pragati.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub default_actor: Option<String>,
}

impl CliConfig {
    /// Load from `dir/pragati.toml`, returning defaults when the file does
    /// not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }
}
