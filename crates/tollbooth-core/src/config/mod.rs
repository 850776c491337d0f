//! Configuration types for the Tollbooth JWT service.
//!
//! The main entry point is [`AppConfig`], loaded from a YAML file whose
//! path comes from the `--config` flag or the `TOLLBOOTH_CONFIG`
//! environment variable. Every section has serde defaults, so a missing
//! file yields a fully usable default configuration; only the signing key
//! has no default and must be provided through [`KeyConfig`] sources.

pub mod keys;
pub mod tokens;
pub mod web;

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use keys::KeyConfig;
pub use tokens::TokenSettings;
pub use web::WebConfig;

/// Environment variable naming the configuration file path.
pub const CONFIG_PATH_ENV: &str = "TOLLBOOTH_CONFIG";

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tollbooth.yaml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML for [`AppConfig`].
    #[error("cannot parse config file {path}: {source}")]
    Unparsable {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Complete service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Web server settings.
    #[serde(default)]
    pub web: WebConfig,

    /// Signing key sources.
    #[serde(default)]
    pub keys: KeyConfig,

    /// Token issuance and verification settings.
    #[serde(default)]
    pub tokens: TokenSettings,
}

impl AppConfig {
    /// Load configuration from an explicit path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Unparsable {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration using the standard resolution order: an explicit
    /// path, the `TOLLBOOTH_CONFIG` environment variable, then
    /// `tollbooth.yaml` in the working directory. Defaults apply when no
    /// file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_from_file(Path::new(&path));
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.exists() {
            return Self::load_from_file(default);
        }
        Ok(Self::default())
    }
}
