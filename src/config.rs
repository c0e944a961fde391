//! Configuration module for loading and parsing TOML configuration files.
//!
//! Values from the file can be overridden by environment variables so the
//! service can run without any file at all (only `BUCKET_NAME` is needed for
//! the default S3 backend).

use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default timezone deciding where one day's log ends.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Object storage configuration.
    pub storage: StorageConfig,
    /// Daily log configuration.
    pub log: LogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Amazon S3 or an S3-compatible service.
    #[default]
    S3,
    /// Files in a local directory.
    Local,
    /// Process memory; contents are lost on exit.
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(Self::S3),
            "local" => Ok(Self::Local),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue(format!(
                "unknown storage backend: {}",
                other
            ))),
        }
    }
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend to use.
    pub backend: StorageBackend,
    /// Bucket holding the daily logs.
    pub bucket: String,
    /// AWS region of the bucket.
    pub region: String,
    /// Custom endpoint for S3-compatible services.
    pub endpoint_url: Option<String>,
    /// Root directory for the local backend.
    pub root: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: String::new(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            root: None,
        }
    }
}

/// Daily log configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// IANA timezone name used to compute the day key.
    pub timezone: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl LogConfig {
    /// Parses the configured timezone.
    ///
    /// # Errors
    /// Returns error if the name is not a known IANA timezone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>().map_err(|e| {
            ConfigError::InvalidValue(format!("unknown timezone {}: {}", self.timezone, e))
        })
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the process configuration: the file named by `CONFIG_PATH`
    /// when set, otherwise defaults, then environment overrides.
    ///
    /// # Errors
    /// Returns error if the file or any override is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CONFIG_PATH") {
            Ok(path) => {
                let content = fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            Err(_) => Config::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides looked up by variable name.
    ///
    /// # Errors
    /// Returns error if an override cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                ConfigError::InvalidValue(format!("PORT is not a number: {}", port))
            })?;
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(bucket) = lookup("BUCKET_NAME") {
            self.storage.bucket = bucket;
        }
        if let Some(region) = lookup("AWS_REGION") {
            self.storage.region = region;
        }
        if let Some(endpoint) = lookup("S3_ENDPOINT_URL") {
            self.storage.endpoint_url = Some(endpoint);
        }
        if let Some(root) = lookup("STORAGE_ROOT") {
            self.storage.root = Some(PathBuf::from(root));
        }
        if let Some(tz) = lookup("LOG_TIMEZONE") {
            self.log.timezone = tz;
        }
        Ok(())
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.storage.backend {
            StorageBackend::S3 => {
                if self.storage.bucket.is_empty() {
                    return Err(ConfigError::InvalidValue(
                        "storage bucket must be set for the s3 backend".to_string(),
                    ));
                }
                if self.storage.region.is_empty() {
                    return Err(ConfigError::InvalidValue(
                        "storage region cannot be empty".to_string(),
                    ));
                }
            }
            StorageBackend::Local => {
                if self.storage.root.is_none() {
                    return Err(ConfigError::InvalidValue(
                        "storage root must be set for the local backend".to_string(),
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        self.log.tz()?;
        Ok(())
    }
}
