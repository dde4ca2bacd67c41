//! # warden-ledger
//!
//! The Ledger satellite. It exposes the standard fungible-asset surface
//! (`transfer`, `approve`, `transfer_from`, allowance adjustments, burns)
//! but does no bookkeeping itself: writes become [`MediatedCall`]s for the
//! Controller that owns the facade, and balance reads are answered by that
//! Controller from its Store. A rejection by the Controller is the Ledger's
//! rejection.

#![deny(unsafe_code)]

mod facade;
mod ops;

pub use facade::{LedgerFacade, LedgerMetadata};
pub use ops::{LedgerOp, LedgerQuery, MediatedCall};
