//! Service configuration.
//!
//! Configuration comes from a TOML file with three optional sections:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [repository]
//! seed_sample_data = true
//!
//! [paging]
//! default_page_size = 25
//! max_page_size = 100
//! ```
//!
//! [`AppConfig::load`] resolves the file (`BREWERY_CONFIG`, then the standard
//! locations, then built-in defaults) and applies environment overrides.
//!
//! # Environment Variables
//!
//! - `BREWERY_CONFIG`: explicit path to the configuration file
//! - `HOST`: server host (default: 0.0.0.0)
//! - `PORT`: server port (default: 8080)
//! - `BREWERY_SEED_DATA`: load the sample catalog at startup (default: true)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Invalid paging settings: {0}")]
    InvalidPaging(String),
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub repository: RepositorySettings,
    pub paging: PagingSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySettings {
    /// Load the sample catalog into an empty repository at startup.
    pub seed_sample_data: bool,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
        }
    }
}

/// List endpoint paging limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            default_page_size: 25,
            max_page_size: 100,
        }
    }
}

impl PagingSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(ConfigError::InvalidPaging(
                "page sizes must be at least 1".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidPaging(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}

const DEFAULT_SEARCH_PATHS: [&str; 3] = ["brewery.toml", "backend/brewery.toml", "../brewery.toml"];

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.paging.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load configuration from the first `brewery.toml` found in the
    /// standard locations, or `None` if there is none.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        for candidate in DEFAULT_SEARCH_PATHS {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve the effective configuration for the server binary.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match env::var("BREWERY_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::from_default_location()?.unwrap_or_default(),
        };
        config.with_env_overrides()
    }

    /// Apply `HOST`, `PORT` and `BREWERY_SEED_DATA` overrides.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = env::var("HOST") {
            if !host.trim().is_empty() {
                self.server.host = host.trim().to_string();
            }
        }

        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key: "PORT", value: port.clone() })?;
        }

        if let Ok(seed) = env::var("BREWERY_SEED_DATA") {
            self.repository.seed_sample_data =
                parse_flag(&seed).ok_or(ConfigError::InvalidEnv {
                    key: "BREWERY_SEED_DATA",
                    value: seed.clone(),
                })?;
        }

        self.paging.validate()?;
        Ok(self)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("", Path::new("inline")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert!(config.repository.seed_sample_data);
        assert_eq!(config.paging.default_page_size, 25);
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
[server]
port = 9090

[paging]
max_page_size = 50
"#;
        let config = AppConfig::from_toml_str(toml, Path::new("inline")).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.paging.default_page_size, 25);
        assert_eq!(config.paging.max_page_size, 50);
    }

    #[test]
    fn test_default_larger_than_max_is_rejected() {
        let toml = r#"
[paging]
default_page_size = 200
max_page_size = 100
"#;
        let err = AppConfig::from_toml_str(toml, Path::new("inline")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPaging(_)));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[server\nport = 1", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
