use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use warden_ledger::LedgerFacade;
use warden_store::{DataStore, StateStore};
use warden_types::{Identifier, WardenError, WardenResult};

/// The satellites a Controller can reach, keyed by identifier.
///
/// Controllers hold only identifiers; the satellites themselves live here
/// and every mutation still passes their own ownership checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Satellites {
    #[serde(default)]
    ledgers: BTreeMap<Identifier, LedgerFacade>,
    #[serde(default)]
    stores: BTreeMap<Identifier, DataStore>,
}

impl Satellites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_ledger(&mut self, ledger: LedgerFacade) {
        self.ledgers.insert(ledger.id(), ledger);
    }

    pub fn insert_store(&mut self, store: DataStore) {
        self.stores.insert(store.id(), store);
    }

    pub fn contains(&self, id: Identifier) -> bool {
        self.ledgers.contains_key(&id) || self.stores.contains_key(&id)
    }

    pub fn ledger(&self, id: Identifier) -> WardenResult<&LedgerFacade> {
        match self.ledgers.get(&id) {
            Some(ledger) => Ok(ledger),
            None => Err(self.missing(id, "ledger")),
        }
    }

    pub fn ledger_mut(&mut self, id: Identifier) -> WardenResult<&mut LedgerFacade> {
        let missing = self.missing(id, "ledger");
        self.ledgers.get_mut(&id).ok_or(missing)
    }

    pub fn store(&self, id: Identifier) -> WardenResult<&DataStore> {
        match self.stores.get(&id) {
            Some(store) => Ok(store),
            None => Err(self.missing(id, "store")),
        }
    }

    pub fn store_mut(&mut self, id: Identifier) -> WardenResult<&mut DataStore> {
        let missing = self.missing(id, "store");
        self.stores.get_mut(&id).ok_or(missing)
    }

    pub fn ledgers(&self) -> impl Iterator<Item = &LedgerFacade> {
        self.ledgers.values()
    }

    pub fn stores(&self) -> impl Iterator<Item = &DataStore> {
        self.stores.values()
    }

    fn missing(&self, id: Identifier, expected: &'static str) -> WardenError {
        if self.contains(id) {
            WardenError::WrongResourceKind { id, expected }
        } else {
            WardenError::UnknownResource(id)
        }
    }
}
