//! # warden-host
//!
//! The execution environment around Warden resources.
//!
//! - **Host**: registry of deployed Controllers, Ledgers, Stores and
//!   whitelists; runs one [`Call`] at a time and rolls back every effect of a
//!   call that fails
//! - **Ledger forwarding**: a Ledger write is turned into a mediated call
//!   and handed to whichever Controller owns that Ledger right now
//! - **Persistence**: JSON snapshots of the whole registry
//! - **WardenConfig**: layered configuration (defaults, file, `WARDEN_*`)

#![deny(unsafe_code)]

mod call;
pub mod config;
mod error;
mod host;
mod snapshot;

pub use call::{Call, Outcome};
pub use config::{LoggingConfig, StateConfig, WardenConfig};
pub use error::{HostError, HostResult};
pub use host::{Host, Registry, ResourceKind};
pub use snapshot::{HostSnapshot, SNAPSHOT_VERSION};
