//! Persisted application configuration.
//!
//! One TOML file under the `.readmegen` root. A missing file yields the
//! defaults; a malformed file is an error surfaced at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app_dirs;

/// Service address the original deployment used.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Application settings controlling the form's endpoint and presentation variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the README-generation service.
    pub endpoint: String,
    /// Whether the fetched README may be edited in place.
    pub allow_edit: bool,
    /// Whether the copy-to-clipboard action is offered.
    pub allow_copy: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            allow_edit: true,
            allow_copy: true,
        }
    }
}

impl AppConfig {
    /// Parse the configured endpoint into a URL.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            value: self.endpoint.clone(),
            source,
        })
    }
}

/// Errors that can occur while loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The application directory could not be resolved or created.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML for the expected shape.
    #[error("Failed to parse config file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize the configuration to TOML.
    #[error("Failed to serialize config: {0}")]
    SerializeToml(toml::ser::Error),
    /// Failed to write the config file.
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The configured endpoint is not a valid URL.
    #[error("Invalid service endpoint {value:?}: {source}")]
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
}

/// Path of the config file inside the application root.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the persisted configuration, falling back to defaults when absent.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    if !path.is_file() {
        return Ok(AppConfig::default());
    }
    load_from(&path)
}

/// Load the configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist the configuration to the application root.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(config, &path)
}

/// Persist the configuration to an explicit path.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config).map_err(ConfigError::SerializeToml)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_point_at_local_service_with_full_variant() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert!(cfg.allow_edit);
        assert!(cfg.allow_copy);
        assert_eq!(cfg.endpoint_url().unwrap().as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let cfg = AppConfig {
            endpoint: "http://readme.internal:9000".into(),
            allow_edit: false,
            allow_copy: true,
        };
        save_to_path(&cfg, &path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "allow_copy = false\n").unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.endpoint, DEFAULT_ENDPOINT);
        assert!(loaded.allow_edit);
        assert!(!loaded.allow_copy);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "endpoint = [not toml").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::ParseToml { .. })
        ));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let cfg = AppConfig {
            endpoint: "not a url".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            cfg.endpoint_url(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn load_or_default_returns_defaults_without_a_file() {
        let temp = tempdir().unwrap();
        let _guard = crate::app_dirs::ConfigBaseGuard::set(temp.path().to_path_buf());
        let cfg = load_or_default().unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
