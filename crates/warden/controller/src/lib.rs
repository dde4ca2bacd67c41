//! # warden-controller
//!
//! The Controller: the single hub that owns a Ledger and a Store and decides
//! every change to them.
//!
//! - an admin quorum (bounded at [`warden_governance::MAX_ADMINS`])
//! - a pause gate that starts paused
//! - minting control (finish / restart)
//! - ledger bookkeeping on behalf of the registered Ledger
//! - `set_contracts` to repoint satellites while paused
//! - `kill` to hand both satellites to a successor Controller
//!
//! Satellites are reached through [`Satellites`]; a Controller holds only
//! their identifiers. Authority is never stored on the Controller side: it is
//! the satellites' ownership that makes the Controller's calls succeed.

#![deny(unsafe_code)]

mod controller;
mod mediation;
pub mod satellites;

#[cfg(test)]
mod testing;

pub use controller::{Controller, Migration};
pub use satellites::Satellites;
