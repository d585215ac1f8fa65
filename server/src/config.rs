//! Server configuration
//!
//! Read from the TOML file named by `FORMSMITH_CONFIG`, then overridden by
//! `FORMSMITH_BIND_ADDR`, `FORMSMITH_DATABASE` and `FORMSMITH_SEED`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "FORMSMITH_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("invalid config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Example schema inserted into an empty database
    pub seed_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:4000".into(),
            database_path: PathBuf::from("./form_builder.sqlite"),
            seed_path: None,
        }
    }
}

impl ServerConfig {
    /// Load from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// File named by `FORMSMITH_CONFIG` (defaults when unset), plus env overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `FORMSMITH_*` overrides from `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("FORMSMITH_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(db) = lookup("FORMSMITH_DATABASE") {
            self.database_path = PathBuf::from(db);
        }
        if let Some(seed) = lookup("FORMSMITH_SEED") {
            self.seed_path = Some(PathBuf::from(seed));
        }
        self
    }
}
