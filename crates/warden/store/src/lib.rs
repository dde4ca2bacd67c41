//! # warden-store
//!
//! The Store satellite: a generic persistent container of boolean and integer
//! slots, gated by the ownership capability. A Controller owns its Store and
//! is the only writer; migration moves ownership, never the data.

#![deny(unsafe_code)]

pub mod memory;
mod model;
mod traits;

pub use memory::DataStore;
pub use model::{SlotKey, SlotValue};
pub use traits::StateStore;
