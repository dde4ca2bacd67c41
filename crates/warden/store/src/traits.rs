use warden_ownership::Ownable;
use warden_types::{Amount, Identifier, WardenError, WardenResult};

use crate::model::{SlotKey, SlotValue};

/// Storage interface for owner-gated state slots.
///
/// Reads and writes both require the caller to be the store's current owner;
/// a Controller that has been migrated away loses both.
pub trait StateStore: Ownable {
    /// Identifier the store was deployed under.
    fn id(&self) -> Identifier;

    /// Read a slot. Absent slots read as `None`.
    fn get_state(&self, caller: Identifier, key: &SlotKey) -> WardenResult<Option<SlotValue>>;

    /// Write a slot, replacing any previous value.
    fn set_state(&mut self, caller: Identifier, key: SlotKey, value: SlotValue) -> WardenResult<()>;

    /// Read an integer slot; absent reads as zero.
    fn get_int(&self, caller: Identifier, key: &SlotKey) -> WardenResult<Amount> {
        match self.get_state(caller, key)? {
            None => Ok(0),
            Some(SlotValue::Int(v)) => Ok(v),
            Some(other) => Err(type_mismatch(key, "int", other)),
        }
    }

    /// Read a boolean slot; absent reads as `false`.
    fn get_bool(&self, caller: Identifier, key: &SlotKey) -> WardenResult<bool> {
        match self.get_state(caller, key)? {
            None => Ok(false),
            Some(SlotValue::Bool(v)) => Ok(v),
            Some(other) => Err(type_mismatch(key, "bool", other)),
        }
    }

    fn set_int(&mut self, caller: Identifier, key: SlotKey, value: Amount) -> WardenResult<()> {
        self.set_state(caller, key, SlotValue::Int(value))
    }

    fn set_bool(&mut self, caller: Identifier, key: SlotKey, value: bool) -> WardenResult<()> {
        self.set_state(caller, key, SlotValue::Bool(value))
    }

    /// Hand the store to a new owner (owner-gated).
    fn set_owner(&mut self, caller: Identifier, new_owner: Identifier) -> WardenResult<()> {
        self.transfer_ownership(caller, new_owner)
    }

    fn get_owner(&self) -> Identifier {
        self.owner()
    }
}

fn type_mismatch(key: &SlotKey, expected: &str, found: SlotValue) -> WardenError {
    WardenError::invalid(format!(
        "slot {key} holds {}, expected {expected}",
        found.kind()
    ))
}
