use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use warden_governance::{AdminRegistry, PauseGate};
use warden_ownership::{Ownable, Ownership};
use warden_store::{DataStore, SlotKey, StateStore};
use warden_types::{
    Amount, Identifier, LedgerEvent, PauseState, WardenError, WardenResult,
};

use crate::satellites::Satellites;

/// The hub that governs a Ledger / Store pair.
///
/// Holds only the satellites' identifiers and the authority their ownership
/// grants it. Composes its own admin quorum and pause gate; every check is a
/// function of this struct's state and the caller's identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    id: Identifier,
    ownership: Ownership,
    ledger_id: Identifier,
    store_id: Identifier,
    admins: AdminRegistry,
    pause: PauseGate,
    minting_finished: bool,
}

/// What a `kill` handed to the successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
    pub successor: Identifier,
    pub ledger: Option<Identifier>,
    pub store: Option<Identifier>,
}

impl Migration {
    pub fn moved_anything(&self) -> bool {
        self.ledger.is_some() || self.store.is_some()
    }
}

impl Controller {
    /// A Controller deployed under `id` by `creator`, pointed at the given
    /// satellites (either may be `NONE`).
    ///
    /// The creator owns the Controller and is its founding admin. The gate
    /// starts paused and minting open.
    pub fn new(
        id: Identifier,
        creator: Identifier,
        ledger_id: Identifier,
        store_id: Identifier,
    ) -> WardenResult<Self> {
        Ok(Self {
            id,
            ownership: Ownership::new(creator)?,
            ledger_id,
            store_id,
            admins: AdminRegistry::new(creator)?,
            pause: PauseGate::new(),
            minting_finished: false,
        })
    }

    // --- Accessors ---

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn ledger_id(&self) -> Identifier {
        self.ledger_id
    }

    pub fn store_id(&self) -> Identifier {
        self.store_id
    }

    pub fn minting_finished(&self) -> bool {
        self.minting_finished
    }

    pub fn paused(&self) -> bool {
        self.pause.is_paused()
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause.state()
    }

    pub fn is_admin(&self, id: Identifier) -> bool {
        self.admins.is_admin(id)
    }

    pub fn admins(&self) -> &AdminRegistry {
        &self.admins
    }

    // --- Quorum ---

    pub fn add_admin(&mut self, caller: Identifier, id: Identifier) -> WardenResult<()> {
        self.admins.add_admin(caller, id)
    }

    pub fn remove_admin(&mut self, caller: Identifier, id: Identifier) -> WardenResult<()> {
        self.admins.remove_admin(caller, id)
    }

    // --- Pause gate ---

    pub fn pause(&mut self, caller: Identifier) -> WardenResult<()> {
        self.pause.pause(&self.admins, caller)
    }

    pub fn unpause(&mut self, caller: Identifier) -> WardenResult<()> {
        self.pause.unpause(&self.admins, caller)
    }

    // --- Minting ---

    pub fn finish_minting(&mut self, caller: Identifier) -> WardenResult<()> {
        self.admins.require_admin(caller)?;
        if self.minting_finished {
            return Err(WardenError::NoOpState("minting already finished"));
        }
        self.minting_finished = true;
        info!(controller = %self.id, by = %caller, "Minting finished");
        Ok(())
    }

    /// Reopen minting. Minting is never permanently sealed.
    pub fn start_minting(&mut self, caller: Identifier) -> WardenResult<()> {
        self.admins.require_admin(caller)?;
        if !self.minting_finished {
            return Err(WardenError::NoOpState("minting already open"));
        }
        self.minting_finished = false;
        info!(controller = %self.id, by = %caller, "Minting started");
        Ok(())
    }

    /// Credit `amount` to `to`, growing the total supply.
    pub fn mint(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        to: Identifier,
        amount: Amount,
    ) -> WardenResult<()> {
        self.admins.require_admin(caller)?;
        self.pause.require_active()?;
        if self.minting_finished {
            return Err(WardenError::MintingFinished);
        }
        if to.is_none() {
            return Err(WardenError::invalid("cannot mint to NONE"));
        }

        let store = self.store_mut(sats)?;
        let supply = store.get_int(self.id, &SlotKey::total_supply())?;
        let balance = store.get_int(self.id, &SlotKey::balance(to))?;
        let supply = supply.checked_add(amount).ok_or(WardenError::Overflow)?;
        let balance = balance.checked_add(amount).ok_or(WardenError::Overflow)?;
        store.set_int(self.id, SlotKey::total_supply(), supply)?;
        store.set_int(self.id, SlotKey::balance(to), balance)?;

        if self.ledger_id.is_some() {
            self.emit(sats, vec![LedgerEvent::transfer(Identifier::NONE, to, amount)])?;
        }

        info!(controller = %self.id, to = %to, amount, "Minted");
        Ok(())
    }

    // --- Satellite management ---

    /// Repoint both satellites at once. Only while paused.
    ///
    /// The caller is trusted to have handed ownership of the new satellites
    /// to this Controller beforehand; nothing here checks it.
    pub fn set_contracts(
        &mut self,
        caller: Identifier,
        ledger_id: Identifier,
        store_id: Identifier,
    ) -> WardenResult<()> {
        self.admins.require_admin(caller)?;
        self.pause.when_paused(|| {
            info!(
                controller = %self.id,
                old_ledger = %self.ledger_id,
                old_store = %self.store_id,
                new_ledger = %ledger_id,
                new_store = %store_id,
                "Satellites repointed"
            );
            self.ledger_id = ledger_id;
            self.store_id = store_id;
            Ok(())
        })
    }

    /// Hand every configured satellite to `successor`. Irreversible.
    ///
    /// Allowed in either pause state. Unset satellites are skipped. This
    /// Controller keeps its own fields but loses its authority: later
    /// mediated calls through it fail the satellites' ownership checks.
    pub fn kill(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        successor: Identifier,
    ) -> WardenResult<Migration> {
        self.admins.require_admin(caller)?;
        if successor.is_none() {
            return Err(WardenError::invalid("successor controller cannot be NONE"));
        }

        let ledger = self.ledger_id.get();
        let store = self.store_id.get();

        // Both handoffs or neither.
        if let Some(ledger_id) = ledger {
            sats.ledger(ledger_id)?.require_owner(self.id)?;
        }
        if let Some(store_id) = store {
            sats.store(store_id)?.require_owner(self.id)?;
        }

        if let Some(ledger_id) = ledger {
            sats.ledger_mut(ledger_id)?
                .transfer_ownership(self.id, successor)?;
        }
        if let Some(store_id) = store {
            sats.store_mut(store_id)?
                .transfer_ownership(self.id, successor)?;
        }

        warn!(
            controller = %self.id,
            successor = %successor,
            ledger = ?ledger,
            store = ?store,
            by = %caller,
            "Controller killed; satellites migrated"
        );
        Ok(Migration {
            successor,
            ledger,
            store,
        })
    }

    // --- Internals shared with mediation ---

    pub(crate) fn gate(&self) -> &PauseGate {
        &self.pause
    }

    pub(crate) fn store_mut<'a>(&self, sats: &'a mut Satellites) -> WardenResult<&'a mut DataStore> {
        if self.store_id.is_none() {
            return Err(WardenError::SatelliteUnset("store"));
        }
        sats.store_mut(self.store_id)
    }

    pub(crate) fn store<'a>(&self, sats: &'a Satellites) -> WardenResult<&'a DataStore> {
        if self.store_id.is_none() {
            return Err(WardenError::SatelliteUnset("store"));
        }
        sats.store(self.store_id)
    }

    /// Append events to the registered Ledger (owner-gated on the Ledger).
    pub(crate) fn emit(&self, sats: &mut Satellites, events: Vec<LedgerEvent>) -> WardenResult<()> {
        if self.ledger_id.is_none() {
            return Err(WardenError::SatelliteUnset("ledger"));
        }
        let ledger = sats.ledger_mut(self.ledger_id)?;
        for event in events {
            ledger.emit(self.id, event)?;
        }
        Ok(())
    }
}

impl Ownable for Controller {
    fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    fn ownership_mut(&mut self) -> &mut Ownership {
        &mut self.ownership
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use warden_types::Role;

    #[test]
    fn new_controller_defaults() {
        let fx = Fixture::new();
        let c = &fx.controller;
        assert!(c.paused());
        assert!(!c.minting_finished());
        assert!(c.is_admin(fx.admin));
        assert_eq!(c.admins().len(), 1);
        assert_eq!(c.ledger_id(), fx.ledger_id);
        assert_eq!(c.store_id(), fx.store_id);
        assert_eq!(c.owner(), fx.admin);
    }

    #[test]
    fn start_minting_after_stopping() {
        let mut fx = Fixture::new();
        fx.controller.finish_minting(fx.admin).unwrap();
        assert!(fx.controller.minting_finished());
        fx.controller.start_minting(fx.admin).unwrap();
        assert!(!fx.controller.minting_finished());
    }

    #[test]
    fn repeat_minting_toggles_rejected() {
        let mut fx = Fixture::new();
        assert!(matches!(
            fx.controller.start_minting(fx.admin),
            Err(WardenError::NoOpState(_))
        ));
        fx.controller.finish_minting(fx.admin).unwrap();
        assert!(matches!(
            fx.controller.finish_minting(fx.admin),
            Err(WardenError::NoOpState(_))
        ));
    }

    #[test]
    fn mint_requires_active_gate() {
        let mut fx = Fixture::new();
        let alice = Identifier::derive("alice");
        let err = fx
            .controller
            .mint(&mut fx.sats, fx.admin, alice, 1000)
            .unwrap_err();
        assert_eq!(
            err,
            WardenError::WrongPauseState {
                current: PauseState::Paused
            }
        );
    }

    #[test]
    fn mint_credits_balance_and_supply() {
        let mut fx = Fixture::active();
        let alice = Identifier::derive("alice");
        fx.controller.mint(&mut fx.sats, fx.admin, alice, 1000).unwrap();

        assert_eq!(fx.controller.balance_of(&fx.sats, alice).unwrap(), 1000);
        assert_eq!(fx.controller.total_supply(&fx.sats).unwrap(), 1000);
        let events = fx.sats.ledger(fx.ledger_id).unwrap().events();
        assert_eq!(events, &[LedgerEvent::transfer(Identifier::NONE, alice, 1000)]);
    }

    #[test]
    fn mint_after_finish_fails_until_restarted() {
        let mut fx = Fixture::active();
        let alice = Identifier::derive("alice");
        fx.controller.finish_minting(fx.admin).unwrap();
        assert_eq!(
            fx.controller
                .mint(&mut fx.sats, fx.admin, alice, 1)
                .unwrap_err(),
            WardenError::MintingFinished
        );

        fx.controller.start_minting(fx.admin).unwrap();
        fx.controller.mint(&mut fx.sats, fx.admin, alice, 1).unwrap();
        assert_eq!(fx.controller.balance_of(&fx.sats, alice).unwrap(), 1);
    }

    #[test]
    fn non_admin_cannot_govern() {
        let mut fx = Fixture::active();
        let mallory = Identifier::derive("mallory");
        let expected = WardenError::unauthorized(mallory, Role::Admin);

        assert_eq!(fx.controller.mint(&mut fx.sats, mallory, mallory, 1).unwrap_err(), expected);
        assert_eq!(fx.controller.pause(mallory).unwrap_err(), expected);
        assert_eq!(fx.controller.finish_minting(mallory).unwrap_err(), expected);
        assert_eq!(fx.controller.add_admin(mallory, mallory).unwrap_err(), expected);
        assert_eq!(
            fx.controller
                .set_contracts(mallory, Identifier::NONE, Identifier::NONE)
                .unwrap_err(),
            expected
        );
        assert_eq!(
            fx.controller
                .kill(&mut fx.sats, mallory, mallory)
                .unwrap_err(),
            expected
        );
    }

    #[test]
    fn set_contracts_only_while_paused() {
        let mut fx = Fixture::active();
        let new_ledger = Identifier::generate();
        let new_store = Identifier::generate();

        assert_eq!(
            fx.controller
                .set_contracts(fx.admin, new_ledger, new_store)
                .unwrap_err(),
            WardenError::WrongPauseState {
                current: PauseState::Active
            }
        );
        assert_eq!(fx.controller.ledger_id(), fx.ledger_id);

        fx.controller.pause(fx.admin).unwrap();
        fx.controller
            .set_contracts(fx.admin, new_ledger, new_store)
            .unwrap();
        assert_eq!(fx.controller.ledger_id(), new_ledger);
        assert_eq!(fx.controller.store_id(), new_store);
    }

    #[test]
    fn kill_moves_both_satellites() {
        let mut fx = Fixture::new();
        let successor = Identifier::generate();
        let migration = fx
            .controller
            .kill(&mut fx.sats, fx.admin, successor)
            .unwrap();

        assert_eq!(migration.ledger, Some(fx.ledger_id));
        assert_eq!(migration.store, Some(fx.store_id));
        assert_eq!(fx.sats.ledger(fx.ledger_id).unwrap().owner(), successor);
        assert_eq!(fx.sats.store(fx.store_id).unwrap().owner(), successor);
        // Fields and gate are untouched
        assert_eq!(fx.controller.ledger_id(), fx.ledger_id);
        assert!(fx.controller.paused());
    }

    #[test]
    fn kill_without_satellites_is_a_no_op() {
        let admin = Identifier::derive("admin");
        let controller =
            Controller::new(Identifier::generate(), admin, Identifier::NONE, Identifier::NONE)
                .unwrap();
        let mut sats = Satellites::new();
        let migration = controller
            .kill(&mut sats, admin, Identifier::generate())
            .unwrap();
        assert!(!migration.moved_anything());
    }

    #[test]
    fn kill_to_none_rejected() {
        let mut fx = Fixture::new();
        assert!(matches!(
            fx.controller.kill(&mut fx.sats, fx.admin, Identifier::NONE),
            Err(WardenError::InvalidArgument(_))
        ));
        assert_eq!(fx.sats.ledger(fx.ledger_id).unwrap().owner(), fx.controller.id());
    }

    #[test]
    fn kill_leaves_ledger_when_store_is_not_owned() {
        let mut fx = Fixture::new();
        let foreign_store = Identifier::generate();
        fx.sats
            .insert_store(DataStore::new(foreign_store, fx.admin).unwrap());
        fx.controller
            .set_contracts(fx.admin, fx.ledger_id, foreign_store)
            .unwrap();

        let err = fx
            .controller
            .kill(&mut fx.sats, fx.admin, Identifier::generate())
            .unwrap_err();
        assert_eq!(err, WardenError::unauthorized(fx.controller.id(), Role::Owner));
        assert_eq!(fx.sats.ledger(fx.ledger_id).unwrap().owner(), fx.controller.id());
        assert_eq!(fx.sats.store(foreign_store).unwrap().owner(), fx.admin);
    }

    #[test]
    fn second_kill_fails_on_ownership() {
        let mut fx = Fixture::new();
        fx.controller
            .kill(&mut fx.sats, fx.admin, Identifier::generate())
            .unwrap();
        let err = fx
            .controller
            .kill(&mut fx.sats, fx.admin, Identifier::generate())
            .unwrap_err();
        assert_eq!(err, WardenError::unauthorized(fx.controller.id(), Role::Owner));
    }
}
