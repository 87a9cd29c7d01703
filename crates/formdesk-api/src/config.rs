//! Server configuration
//!
//! Defaults, then an optional TOML file, then `FORMDESK_*` environment
//! variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use formdesk_core::domain::services::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    pub page_size: usize,
    /// Keep annotations as JSON files here instead of in memory
    pub annotations_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            log_filter: "info".into(),
            page_size: DEFAULT_PAGE_SIZE,
            annotations_dir: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid {key} in {path}")]
    InvalidFile { path: PathBuf, key: &'static str },

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

impl ServerConfig {
    /// Load from `path` when given and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.page_size == 0 {
            return Err(ConfigError::InvalidFile {
                path: path.to_path_buf(),
                key: "page_size",
            });
        }
        Ok(config)
    }

    /// Apply `FORMDESK_*` overrides read through `lookup`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(addr) = lookup("FORMDESK_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(filter) = lookup("FORMDESK_LOG") {
            self.log_filter = filter;
        }
        if let Some(size) = lookup("FORMDESK_PAGE_SIZE") {
            self.page_size = size
                .parse()
                .ok()
                .filter(|n: &usize| *n > 0)
                .ok_or(ConfigError::InvalidEnv { key: "FORMDESK_PAGE_SIZE", value: size })?;
        }
        if let Some(dir) = lookup("FORMDESK_ANNOTATIONS_DIR") {
            self.annotations_dir = Some(PathBuf::from(dir));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"127.0.0.1:3000\"\npage_size = 25").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_filter, "info");

        let env: HashMap<&str, &str> = [("FORMDESK_PAGE_SIZE", "50"), ("FORMDESK_ANNOTATIONS_DIR", "/var/lib/formdesk")]
            .into_iter()
            .collect();
        let config = config
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.annotations_dir, Some(PathBuf::from("/var/lib/formdesk")));
    }

    #[test]
    fn test_invalid_page_size() {
        let result = ServerConfig::default().with_overrides(|key| {
            (key == "FORMDESK_PAGE_SIZE").then(|| "0".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    fn test_zero_page_size_in_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 0").unwrap();
        assert!(matches!(
            ServerConfig::from_file(file.path()),
            Err(ConfigError::InvalidFile { key: "page_size", .. })
        ));
    }

    #[test]
    fn test_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = \"lots\"").unwrap();
        assert!(matches!(ServerConfig::from_file(file.path()), Err(ConfigError::Parse { .. })));
    }
}
