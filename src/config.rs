//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Plugin configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::intf::DEFAULT_SOCK_DIR;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings read from the optional TOML config file.
///
/// ```toml
/// sock_dir = "/var/run/vrouter/"
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base directory holding one subdirectory per container.
    pub sock_dir: PathBuf,
    /// Default tracing filter, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sock_dir: PathBuf::from(DEFAULT_SOCK_DIR),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sock_dir, PathBuf::from("/var/run/vrouter/"));
        assert_eq!(config.log_level, "info");
        assert_eq!(Config::parse("").unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("log_level = \"debug\"").unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.sock_dir, PathBuf::from(DEFAULT_SOCK_DIR));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::parse("sockdir = \"/tmp\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vrouter-cni.toml");
        std::fs::write(&path, "sock_dir = \"/run/vrouter-test/\"\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.sock_dir, PathBuf::from("/run/vrouter-test/"));

        let missing = tmp.path().join("absent.toml");
        assert!(matches!(
            Config::load(&missing),
            Err(ConfigError::Read { .. })
        ));
    }
}
