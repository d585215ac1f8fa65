//! CLI Configuration

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

pub const KEYS: [&str; 3] = ["api_url", "default_format", "strict_validation"];

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub default_format: Option<String>,
    pub strict_validation: Option<bool>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?).with_context(|| format!("writing {}", path.display()))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => self.api_url = Some(value.to_string()),
            "default_format" => {
                value
                    .parse::<crate::output::OutputFormat>()
                    .map_err(|_| anyhow!("Unknown output format: {}", value))?;
                self.default_format = Some(value.to_string());
            }
            "strict_validation" => {
                let flag = value
                    .parse::<bool>()
                    .map_err(|_| anyhow!("strict_validation must be true or false"))?;
                self.strict_validation = Some(flag);
            }
            _ => bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(match key {
            "api_url" => self.api_url.clone(),
            "default_format" => self.default_format.clone(),
            "strict_validation" => self.strict_validation.map(|b| b.to_string()),
            _ => bail!("Unknown config key: {}", key),
        })
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot find home directory"))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".formsmith").join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.set("api_url", "http://forms.internal:4000").unwrap();
        config.set("strict_validation", "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("http://forms.internal:4000"));
        assert_eq!(loaded.strict_validation, Some(true));
        assert_eq!(loaded.get("default_format").unwrap(), None);
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api_key", "x").is_err());
        assert!(config.set("strict_validation", "maybe").is_err());
        assert!(config.set("default_format", "xml").is_err());
        config.set("default_format", "yaml").unwrap();
        assert_eq!(config.get("default_format").unwrap().as_deref(), Some("yaml"));
        assert!(config.get("tenant").is_err());
    }
}
