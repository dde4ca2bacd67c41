//! Shared fixtures for host integration tests.

#![allow(dead_code)]

use warden_host::{Call, Host};
use warden_ledger::LedgerOp;
use warden_types::{Amount, Identifier};

pub fn admin() -> Identifier {
    Identifier::derive("admin")
}

pub fn alice() -> Identifier {
    Identifier::derive("alice")
}

pub fn bob() -> Identifier {
    Identifier::derive("bob")
}

pub fn mallory() -> Identifier {
    Identifier::derive("mallory")
}

/// A Controller deployed by `admin()` that owns a fresh Ledger and Store.
pub struct Deployment {
    pub host: Host,
    pub ledger: Identifier,
    pub store: Identifier,
    pub controller: Identifier,
}

impl Deployment {
    pub fn new() -> Self {
        let mut host = Host::new();
        let ledger = host.deploy_ledger(admin()).unwrap();
        let store = host.deploy_store(admin()).unwrap();
        let controller = host.deploy_controller(admin(), ledger, store).unwrap();
        hand_over(&mut host, ledger, controller);
        hand_over(&mut host, store, controller);
        Self {
            host,
            ledger,
            store,
            controller,
        }
    }

    /// Unpaused deployment.
    pub fn live() -> Self {
        let mut d = Self::new();
        d.host.execute(admin(), d.controller, Call::Unpause).unwrap();
        d
    }

    pub fn mint(&mut self, to: Identifier, amount: Amount) {
        self.host
            .execute(admin(), self.controller, Call::Mint { to, amount })
            .unwrap();
    }

    pub fn transfer(
        &mut self,
        from: Identifier,
        to: Identifier,
        amount: Amount,
    ) -> warden_types::WardenResult<warden_host::Outcome> {
        self.host
            .call_ledger(from, self.ledger, LedgerOp::Transfer { to, amount })
    }

    pub fn balance(&self, account: Identifier) -> Amount {
        self.host.balance_of(self.ledger, account).unwrap()
    }
}

/// Transfer ownership of `resource` from `admin()` to `controller`.
pub fn hand_over(host: &mut Host, resource: Identifier, controller: Identifier) {
    host.execute(
        admin(),
        resource,
        Call::TransferOwnership {
            new_owner: controller,
        },
    )
    .unwrap();
}
