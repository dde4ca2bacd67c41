//! In-memory Store. Deterministic and serializable, so the host can persist
//! it as part of its registry snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;
use warden_ownership::{Ownable, Ownership};
use warden_types::{Identifier, WardenResult};

use crate::model::{SlotKey, SlotValue};
use crate::traits::StateStore;

/// In-memory data store with typed slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStore {
    id: Identifier,
    ownership: Ownership,
    slots: BTreeMap<SlotKey, SlotValue>,
}

impl DataStore {
    /// A new, empty store deployed under `id` and owned by `creator`.
    pub fn new(id: Identifier, creator: Identifier) -> WardenResult<Self> {
        Ok(Self {
            id,
            ownership: Ownership::new(creator)?,
            slots: BTreeMap::new(),
        })
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl Ownable for DataStore {
    fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    fn ownership_mut(&mut self) -> &mut Ownership {
        &mut self.ownership
    }
}

impl StateStore for DataStore {
    fn id(&self) -> Identifier {
        self.id
    }

    fn get_state(&self, caller: Identifier, key: &SlotKey) -> WardenResult<Option<SlotValue>> {
        self.require_owner(caller)?;
        Ok(self.slots.get(key).copied())
    }

    fn set_state(&mut self, caller: Identifier, key: SlotKey, value: SlotValue) -> WardenResult<()> {
        self.require_owner(caller)?;
        trace!(store = %self.id, key = %key, ?value, "Slot written");
        self.slots.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_types::WardenError;

    fn owner() -> Identifier {
        Identifier::derive("store-owner")
    }

    fn store() -> DataStore {
        DataStore::new(Identifier::generate(), owner()).unwrap()
    }

    #[test]
    fn owner_can_set_and_get_state() {
        let mut s = store();
        let key = SlotKey::new("state");
        s.set_bool(owner(), key.clone(), true).unwrap();
        assert!(s.get_bool(owner(), &key).unwrap());
        assert_eq!(s.get_state(owner(), &key).unwrap(), Some(SlotValue::Bool(true)));
    }

    #[test]
    fn absent_slots_read_as_defaults() {
        let s = store();
        assert_eq!(s.get_int(owner(), &SlotKey::total_supply()).unwrap(), 0);
        assert!(!s.get_bool(owner(), &SlotKey::new("flag")).unwrap());
        assert_eq!(s.get_state(owner(), &SlotKey::new("flag")).unwrap(), None);
    }

    #[test]
    fn non_owner_cannot_read_or_write() {
        let mut s = store();
        let mallory = Identifier::derive("mallory");
        let key = SlotKey::new("state");
        assert!(s.set_bool(mallory, key.clone(), true).unwrap_err().is_unauthorized());
        assert!(s.get_state(mallory, &key).unwrap_err().is_unauthorized());
        assert_eq!(s.slot_count(), 0);
    }

    #[test]
    fn wrong_type_read_is_rejected() {
        let mut s = store();
        let key = SlotKey::new("state");
        s.set_int(owner(), key.clone(), 3).unwrap();
        assert!(matches!(
            s.get_bool(owner(), &key),
            Err(WardenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn owner_can_set_owner() {
        let mut s = store();
        let next = Identifier::derive("next-owner");
        s.set_owner(owner(), next).unwrap();
        assert_eq!(s.get_owner(), next);
        // Previous owner lost access
        assert!(s.set_int(owner(), SlotKey::total_supply(), 1).is_err());
        s.set_int(next, SlotKey::total_supply(), 1).unwrap();
    }

    #[test]
    fn state_survives_ownership_change() {
        let mut s = store();
        let next = Identifier::derive("next-owner");
        s.set_int(owner(), SlotKey::total_supply(), 42).unwrap();
        s.transfer_ownership(owner(), next).unwrap();
        assert_eq!(s.get_int(next, &SlotKey::total_supply()).unwrap(), 42);
    }
}
