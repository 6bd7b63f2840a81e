// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.
//!
//! ```toml
//! cache_dir = "var/cache"
//! template = "templates/normalizer.rs.tera"   # optional override
//! file_mode = 0o664
//! dir_mode = 0o775
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the cache root.
pub const CACHE_DIR_ENV: &str = "NORMGEN_CACHE_DIR";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration of the normalizer generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Cache root; sources land in `<cache_dir>/serializer/generated-normalizers/`.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Template file replacing the built-in normalizer template.
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Permissions of generated files (unix).
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,

    /// Permissions of created cache directories (unix).
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
}

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join("normgen")
}

fn default_file_mode() -> u32 {
    0o664
}

fn default_dir_mode() -> u32 {
    0o775
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            template: None,
            file_mode: default_file_mode(),
            dir_mode: default_dir_mode(),
        }
    }
}

impl GeneratorConfig {
    /// Configuration rooted at `cache_dir`, defaults elsewhere.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, with the cache root taken from `NORMGEN_CACHE_DIR` when set.
    pub fn from_env() -> Self {
        match std::env::var_os(CACHE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::with_cache_dir(dir),
            _ => Self::default(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("cache_dir is empty".into()));
        }
        if self.file_mode > 0o7777 || self.dir_mode > 0o7777 {
            return Err(ConfigError::Invalid(format!(
                "permission modes out of range (file {:o}, dir {:o})",
                self.file_mode, self.dir_mode
            )));
        }
        if self.dir_mode & 0o700 != 0o700 {
            return Err(ConfigError::Invalid(format!(
                "dir_mode {:o} must grant the owner rwx",
                self.dir_mode
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.file_mode, 0o664);
        assert_eq!(config.dir_mode, 0o775);
        assert!(config.template.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normgen.toml");
        std::fs::write(&path, "cache_dir = \"/srv/cache\"\nfile_mode = 0o640\n").unwrap();

        let config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/srv/cache"));
        assert_eq!(config.file_mode, 0o640);
        assert_eq!(config.dir_mode, 0o775);
    }

    #[test]
    fn test_invalid_dir_mode() {
        let config = GeneratorConfig {
            dir_mode: 0o555,
            ..GeneratorConfig::with_cache_dir("/srv/cache")
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normgen.toml");
        std::fs::write(&path, "cache_dir = [").unwrap();
        assert!(matches!(
            GeneratorConfig::from_file(&path),
            Err(ConfigError::Toml(_))
        ));
    }
}
