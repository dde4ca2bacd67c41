use thiserror::Error;
use warden_types::WardenError;

/// Errors surfaced by the host outside of a single operation: loading and
/// saving state, reading configuration.
#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Warden(#[from] WardenError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },
}

pub type HostResult<T> = Result<T, HostError>;
