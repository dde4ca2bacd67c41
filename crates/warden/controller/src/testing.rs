use warden_ledger::{LedgerFacade, LedgerMetadata};
use warden_ownership::Ownable;
use warden_store::DataStore;
use warden_types::Identifier;

use crate::{Controller, Satellites};

/// A Controller wired to a Ledger and Store it owns.
pub(crate) struct Fixture {
    pub admin: Identifier,
    pub ledger_id: Identifier,
    pub store_id: Identifier,
    pub controller: Controller,
    pub sats: Satellites,
}

impl Fixture {
    pub fn new() -> Self {
        let admin = Identifier::derive("admin");
        let ledger_id = Identifier::generate();
        let store_id = Identifier::generate();
        let controller =
            Controller::new(Identifier::generate(), admin, ledger_id, store_id).unwrap();

        let mut ledger = LedgerFacade::new(ledger_id, admin, LedgerMetadata::default()).unwrap();
        ledger.transfer_ownership(admin, controller.id()).unwrap();
        let mut store = DataStore::new(store_id, admin).unwrap();
        store.transfer_ownership(admin, controller.id()).unwrap();

        let mut sats = Satellites::new();
        sats.insert_ledger(ledger);
        sats.insert_store(store);

        Self {
            admin,
            ledger_id,
            store_id,
            controller,
            sats,
        }
    }

    /// Unpaused fixture.
    pub fn active() -> Self {
        let mut fx = Self::new();
        fx.controller.unpause(fx.admin).unwrap();
        fx
    }

    /// Active fixture with `amount` minted to `account`.
    pub fn funded(account: Identifier, amount: u128) -> Self {
        let mut fx = Self::active();
        fx.controller
            .mint(&mut fx.sats, fx.admin, account, amount)
            .unwrap();
        fx
    }
}
