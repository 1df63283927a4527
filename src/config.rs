//! Coordinator configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `MCP_COORDINATOR_*` environment variables. The binary applies command
//! line flags last.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding [`HttpConfig::listen_addr`].
pub const ENV_LISTEN_ADDR: &str = "MCP_COORDINATOR_LISTEN_ADDR";
/// Environment variable overriding [`StorageConfig::database_path`].
pub const ENV_DATABASE_PATH: &str = "MCP_COORDINATOR_DATABASE_PATH";
/// Environment variable overriding [`StorageConfig::pool_size`].
pub const ENV_POOL_SIZE: &str = "MCP_COORDINATOR_POOL_SIZE";
/// Environment variable overriding [`RegistryConfig::heartbeat_timeout_secs`].
pub const ENV_HEARTBEAT_TIMEOUT: &str = "MCP_COORDINATOR_HEARTBEAT_TIMEOUT_SECS";
/// Environment variable overriding [`LoggingConfig::json`].
pub const ENV_LOG_JSON: &str = "MCP_COORDINATOR_LOG_JSON";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// An environment override could not be parsed.
    #[error("invalid value for {name}: {value}")]
    Env {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
    /// A setting is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level coordinator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// HTTP listener settings.
    pub server: HttpConfig,
    /// Durable store settings.
    pub storage: StorageConfig,
    /// Adapter registry settings.
    pub registry: RegistryConfig,
    /// Read-side query settings.
    pub query: QueryConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Socket address to bind, e.g. `0.0.0.0:9000`.
    pub listen_addr: String,
    /// Whether to answer cross-origin requests from any origin.
    pub enable_cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9000".to_owned(),
            enable_cors: true,
        }
    }
}

/// Durable store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the `SQLite` database file.
    pub database_path: PathBuf,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("mcp_coordinator.db"),
            pool_size: 4,
        }
    }
}

/// Adapter registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Evict adapters from the in-memory view after this many seconds
    /// without a registration. `None` keeps them forever.
    pub heartbeat_timeout_secs: Option<u64>,
    /// How often the eviction sweep runs when a timeout is set.
    pub sweep_interval_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout_secs: None,
            sweep_interval_secs: 60,
        }
    }
}

/// Read-side query settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Rows returned by projection queries without an explicit limit.
    pub projection_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            projection_limit: 100,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl CoordinatorConfig {
    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads defaults, then the file at `path` if given, then process
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file or an override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };
        base.merge_env(|name| std::env::var(name).ok())
    }

    /// Applies `MCP_COORDINATOR_*` overrides obtained through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] when a numeric or boolean override does
    /// not parse.
    pub fn merge_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(addr) = lookup(ENV_LISTEN_ADDR) {
            self.server.listen_addr = addr;
        }
        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            self.storage.database_path = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_POOL_SIZE) {
            self.storage.pool_size = value.parse().map_err(|_| ConfigError::Env {
                name: ENV_POOL_SIZE,
                value,
            })?;
        }
        if let Some(value) = lookup(ENV_HEARTBEAT_TIMEOUT) {
            let secs = value.parse().map_err(|_| ConfigError::Env {
                name: ENV_HEARTBEAT_TIMEOUT,
                value,
            })?;
            self.registry.heartbeat_timeout_secs = Some(secs);
        }
        if let Some(value) = lookup(ENV_LOG_JSON) {
            self.logging.json = value.parse().map_err(|_| ConfigError::Env {
                name: ENV_LOG_JSON,
                value,
            })?;
        }
        Ok(self)
    }

    /// Parses the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.listen_addr.parse().map_err(|_| {
            ConfigError::Invalid(format!("listen_addr '{}'", self.server.listen_addr))
        })
    }

    /// Checks settings that cannot be expressed in the types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unparsable listen address, a
    /// zero pool size or a zero sweep interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.storage.pool_size == 0 {
            return Err(ConfigError::Invalid("pool_size must be at least 1".to_owned()));
        }
        if self.registry.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "sweep_interval_secs must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
