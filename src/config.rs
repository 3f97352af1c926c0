// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_SOURCE: &str = "data/compatibilidad_medicamentos.csv";
pub const DEFAULT_CONFIG_FILE: &str = "drugcompat.yaml";

pub const CONFIG_ENV: &str = "DRUGCOMPAT_CONFIG";
pub const SOURCE_ENV: &str = "DRUGCOMPAT_SOURCE";
pub const LOG_ENV: &str = "DRUGCOMPAT_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path or http(s) URL of the compatibility CSV.
    pub source: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// YAML file (if present), then environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut cfg = Self::from_file(&path)?;
        cfg.apply_overrides(|key| env::var(key).ok());
        Ok(cfg)
    }

    /// Read a YAML config. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => serde_yaml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading config {}", path.display())),
        }
    }

    /// Override fields from `lookup(SOURCE_ENV)` / `lookup(LOG_ENV)` when set and non-blank.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(SOURCE_ENV).filter(|s| !s.trim().is_empty()) {
            self.source = source;
        }
        if let Some(filter) = lookup(LOG_ENV).filter(|s| !s.trim().is_empty()) {
            self.log_filter = filter;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let tmp = tempdir()?;
        let cfg = Config::from_file(&tmp.path().join("absent.yaml"))?;
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.source, DEFAULT_SOURCE);
        Ok(())
    }

    #[test]
    fn test_partial_yaml() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("drugcompat.yaml");
        fs::write(&path, "source: https://example.org/compat.csv\n")?;

        let cfg = Config::from_file(&path)?;
        assert_eq!(cfg.source, "https://example.org/compat.csv");
        assert_eq!(cfg.log_filter, "info");
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_is_an_error() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("drugcompat.yaml");
        fs::write(&path, "source: [unterminated\n")?;

        assert!(Config::from_file(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [(SOURCE_ENV, "other.csv"), (LOG_ENV, "  ")]
            .into_iter()
            .collect();

        let mut cfg = Config::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.source, "other.csv");
        // blank values are ignored
        assert_eq!(cfg.log_filter, "info");
    }
}
