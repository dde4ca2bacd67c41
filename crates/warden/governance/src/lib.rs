//! # warden-governance
//!
//! Authorization state a Controller composes by value:
//!
//! - **AdminRegistry**: bounded admin quorum (at most [`MAX_ADMINS`]) seeded
//!   with a founding admin; the last admin cannot be removed
//! - **PauseGate**: `Active` / `Paused` switch, starting `Paused`, with
//!   `when_paused` / `when_not_paused` guards
//! - **WhitelistRegistry**: standalone role registry with bulk add/remove
//!
//! Every check is a pure function of the structure's state and the caller's
//! identifier. Nothing here is global.

#![deny(unsafe_code)]

pub mod admins;
pub mod pause;
pub mod whitelist;

pub use admins::{AdminRegistry, MAX_ADMINS};
pub use pause::PauseGate;
pub use whitelist::WhitelistRegistry;
