//! TOML configuration file parsing and loading
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "text"
//! file = "none"
//! color = true
//!
//! [scanner]
//! business_id = "shop-1"
//! scanned_by = "front-desk"
//! scanned_by_email = "desk@shop.example"
//! auto_accept_duplicates = false
//!
//! [cache]
//! enabled = true
//! ttl_seconds = 30
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 30;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { message } => Some(message),
            _ => Some("Configuration file could not be loaded"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: LoggingConfig,
    pub scanner: ScannerConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
    pub color: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    pub business_id: Option<String>,
    pub scanned_by: Option<String>,
    pub scanned_by_email: Option<String>,
    pub auto_accept_duplicates: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

/// `<config dir>/Diskscan/diskscan.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Diskscan").join("diskscan.toml"))
}

impl Config {
    /// Load the named file, or the default file when it exists.
    ///
    /// A file given explicitly must exist; a missing default file yields the
    /// built-in defaults.
    pub async fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::trace!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
        let config = Self::from_toml_str(&contents, &path)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "logging.level '{}' must be one of: {}",
                        level,
                        LOG_LEVELS.join(", ")
                    ),
                });
            }
        }
        if let Some(format) = &self.logging.format {
            if !LOG_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "logging.format '{}' must be one of: {}",
                        format,
                        LOG_FORMATS.join(", ")
                    ),
                });
            }
        }
        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            return Err(ConfigError::Invalid {
                message: "cache.ttl_seconds must be greater than 0 when the cache is enabled"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Cache lifetime, or `None` when caching is off
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache
            .enabled
            .then(|| Duration::from_secs(self.cache.ttl_seconds))
    }
}
