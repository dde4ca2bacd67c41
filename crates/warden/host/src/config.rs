//! Configuration for warden-host and `wardenctl`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use warden_ledger::LedgerMetadata;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WardenConfig {
    /// Persisted host state
    #[serde(default)]
    pub state: StateConfig,

    /// Metadata given to newly deployed ledgers
    #[serde(default)]
    pub ledger: LedgerMetadata,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the host snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path of the JSON snapshot file
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (overridden by `RUST_LOG`)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from("warden-state.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl WardenConfig {
    /// Load configuration: defaults, then the optional file, then `WARDEN_*`
    /// environment variables.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&WardenConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // e.g. WARDEN_STATE_PATH, WARDEN_LEDGER_SYMBOL, WARDEN_LOGGING_JSON
        builder = builder.add_source(
            config::Environment::with_prefix("WARDEN")
                .separator("_")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
