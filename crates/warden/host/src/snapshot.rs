use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use warden_ledger::LedgerMetadata;

use crate::error::{HostError, HostResult};
use crate::host::{Host, Registry};

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Durable image of a host: every resource with its full state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub registry: Registry,
}

impl Host {
    pub fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            registry: self.registry.clone(),
        }
    }

    pub fn restore(snapshot: HostSnapshot, ledger_defaults: LedgerMetadata) -> HostResult<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(HostError::SnapshotVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(Host::from_registry(snapshot.registry, ledger_defaults))
    }

    /// Write the host to `path` as pretty JSON.
    ///
    /// Written to a sibling temp file and renamed into place.
    pub fn save(&self, path: &Path) -> HostResult<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        info!(path = %path.display(), resources = self.resources().len(), "Host state saved");
        Ok(())
    }

    pub fn load(path: &Path, ledger_defaults: LedgerMetadata) -> HostResult<Self> {
        let json = fs::read_to_string(path)?;
        let snapshot: HostSnapshot = serde_json::from_str(&json)?;
        info!(path = %path.display(), saved_at = %snapshot.saved_at, "Host state loaded");
        Host::restore(snapshot, ledger_defaults)
    }

    /// Load `path` if it exists, otherwise start empty.
    pub fn load_or_new(path: &Path, ledger_defaults: LedgerMetadata) -> HostResult<Self> {
        if path.exists() {
            Host::load(path, ledger_defaults)
        } else {
            Ok(Host::with_ledger_defaults(ledger_defaults))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_version() {
        let mut snapshot = Host::new().snapshot();
        snapshot.version = 99;
        let err = Host::restore(snapshot, LedgerMetadata::default()).unwrap_err();
        assert!(matches!(
            err,
            HostError::SnapshotVersion {
                found: 99,
                expected: 1
            }
        ));
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let host = Host::load_or_new(&dir.path().join("state.json"), LedgerMetadata::default())
            .unwrap();
        assert!(host.resources().is_empty());
    }
}
