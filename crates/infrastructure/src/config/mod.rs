//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//!
//! Sources, later ones winning: built-in defaults, an optional `config.toml`
//! in the working directory, `DOCFAULT_*` environment variables.

mod server;

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

pub use server::ServerConfig;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "DOCFAULT";

/// Application environment (development or production)
///
/// Controls whether error details are exposed by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details exposed
    #[default]
    Development,
    /// Production environment - error details hidden
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Error response configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    /// Include `isOperational` and `stack` in error bodies and skip
    /// message sanitization. Defaults to on in development only.
    #[serde(default)]
    pub expose_details: Option<bool>,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database name used in store error messages
    #[serde(default = "default_database")]
    pub database: String,

    /// Maximum number of documents returned by list endpoints
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_database() -> String {
    "docfault".to_string()
}

const fn default_list_limit() -> usize {
    100
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            list_limit: default_list_limit(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Error response configuration
    #[serde(default)]
    pub errors: ErrorHandlingConfig,

    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::with_name("config").required(false))
    }

    /// Load configuration from a specific file and environment
    pub fn load_from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::from(path).required(true))
    }

    fn load_with<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("environment", "development")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("store.database", default_database())?
            .add_source(file)
            // Override with environment variables (e.g., DOCFAULT_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Whether error details should be exposed in responses
    ///
    /// An explicit `errors.expose_details` wins; otherwise details are
    /// exposed in development only.
    #[must_use]
    pub fn expose_error_details(&self) -> bool {
        self.errors
            .expose_details
            .unwrap_or(self.environment == Environment::Development)
    }
}
