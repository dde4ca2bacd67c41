//! # warden-types
//!
//! Core type definitions shared by every Warden crate:
//!
//! - **Identifier**: opaque, comparable name of a caller or resource, with a
//!   distinguished `NONE` value for "unset"
//! - **Amount**: fungible-asset quantity in minor units
//! - **PauseState**: the two operating modes of a Controller
//! - **WardenError**: the rejection taxonomy every operation reports through
//! - **LedgerEvent**: `Transfer` / `Approval` records appended to a Ledger

#![deny(unsafe_code)]

pub mod error;
pub mod event;
pub mod identifier;

use serde::{Deserialize, Serialize};

pub use error::{Role, WardenError, WardenResult};
pub use event::LedgerEvent;
pub use identifier::Identifier;

/// Asset quantity in minor units.
pub type Amount = u128;

/// Operating mode of a Controller's pause gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseState {
    Active,
    Paused,
}

impl PauseState {
    pub fn is_paused(&self) -> bool {
        matches!(self, PauseState::Paused)
    }
}

impl std::fmt::Display for PauseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PauseState::Active => f.write_str("active"),
            PauseState::Paused => f.write_str("paused"),
        }
    }
}
