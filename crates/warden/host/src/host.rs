use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use warden_controller::{Controller, Satellites};
use warden_governance::WhitelistRegistry;
use warden_ledger::{LedgerFacade, LedgerMetadata, LedgerOp};
use warden_ownership::Ownable;
use warden_store::{DataStore, SlotKey, SlotValue, StateStore};
use warden_types::{Amount, Identifier, LedgerEvent, WardenError, WardenResult};

use crate::call::{Call, Outcome};
use crate::config::WardenConfig;

/// Kind of a deployed resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Controller,
    Ledger,
    Store,
    Whitelist,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Controller => "controller",
            ResourceKind::Ledger => "ledger",
            ResourceKind::Store => "store",
            ResourceKind::Whitelist => "whitelist",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every deployed resource, keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub(crate) controllers: BTreeMap<Identifier, Controller>,
    #[serde(default)]
    pub(crate) satellites: Satellites,
    #[serde(default)]
    pub(crate) whitelists: BTreeMap<Identifier, WhitelistRegistry>,
}

impl Registry {
    pub fn controllers(&self) -> impl Iterator<Item = &Controller> {
        self.controllers.values()
    }

    pub fn satellites(&self) -> &Satellites {
        &self.satellites
    }

    pub fn whitelists(&self) -> impl Iterator<Item = (&Identifier, &WhitelistRegistry)> {
        self.whitelists.iter()
    }
}

/// Execution host.
///
/// Operations run one at a time, each to completion. A failed operation is
/// rolled back in full: the registry is snapshotted before dispatch and
/// restored on error, so no partial effect is ever observable.
#[derive(Clone, Debug, Default)]
pub struct Host {
    pub(crate) registry: Registry,
    ledger_defaults: LedgerMetadata,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &WardenConfig) -> Self {
        Self::with_ledger_defaults(config.ledger.clone())
    }

    pub fn with_ledger_defaults(ledger_defaults: LedgerMetadata) -> Self {
        Self {
            registry: Registry::default(),
            ledger_defaults,
        }
    }

    pub(crate) fn from_registry(registry: Registry, ledger_defaults: LedgerMetadata) -> Self {
        Self {
            registry,
            ledger_defaults,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ledger_defaults(&self) -> &LedgerMetadata {
        &self.ledger_defaults
    }

    // --- Deployment ---

    /// Deploy an empty Store owned by `caller`.
    pub fn deploy_store(&mut self, caller: Identifier) -> WardenResult<Identifier> {
        let id = Identifier::generate();
        self.registry
            .satellites
            .insert_store(DataStore::new(id, caller)?);
        info!(store = %id, owner = %caller, "Store deployed");
        Ok(id)
    }

    /// Deploy a Ledger with the configured default metadata.
    pub fn deploy_ledger(&mut self, caller: Identifier) -> WardenResult<Identifier> {
        let metadata = self.ledger_defaults.clone();
        self.deploy_ledger_with(caller, metadata)
    }

    pub fn deploy_ledger_with(
        &mut self,
        caller: Identifier,
        metadata: LedgerMetadata,
    ) -> WardenResult<Identifier> {
        let id = Identifier::generate();
        self.registry
            .satellites
            .insert_ledger(LedgerFacade::new(id, caller, metadata)?);
        info!(ledger = %id, owner = %caller, "Ledger deployed");
        Ok(id)
    }

    /// Deploy a Controller pointed at `ledger` and `store` (either may be
    /// `NONE`). Ownership of the satellites is not touched.
    pub fn deploy_controller(
        &mut self,
        caller: Identifier,
        ledger: Identifier,
        store: Identifier,
    ) -> WardenResult<Identifier> {
        let id = Identifier::generate();
        let controller = Controller::new(id, caller, ledger, store)?;
        self.registry.controllers.insert(id, controller);
        info!(controller = %id, admin = %caller, ledger = %ledger, store = %store, "Controller deployed");
        Ok(id)
    }

    pub fn deploy_whitelist(&mut self, caller: Identifier) -> WardenResult<Identifier> {
        let id = Identifier::generate();
        self.registry
            .whitelists
            .insert(id, WhitelistRegistry::new(caller)?);
        info!(whitelist = %id, admin = %caller, "Whitelist deployed");
        Ok(id)
    }

    // --- Execution ---

    /// Run `call` from `caller` against `target`, atomically.
    pub fn execute(&mut self, caller: Identifier, target: Identifier, call: Call) -> WardenResult<Outcome> {
        if caller.is_none() {
            warn!(target = %target, call = call.name(), "Call from NONE rejected");
            return Err(WardenError::invalid("caller cannot be NONE"));
        }
        let snapshot = self.registry.clone();
        match self.dispatch(caller, target, &call) {
            Ok(outcome) => {
                debug!(caller = %caller, target = %target, call = call.name(), "Call applied");
                Ok(outcome)
            }
            Err(err) => {
                self.registry = snapshot;
                warn!(caller = %caller, target = %target, call = call.name(), error = %err, "Call rejected");
                Err(err)
            }
        }
    }

    /// Send a Ledger write through `ledger` as `caller`.
    pub fn call_ledger(
        &mut self,
        caller: Identifier,
        ledger: Identifier,
        op: LedgerOp,
    ) -> WardenResult<Outcome> {
        self.execute(caller, ledger, Call::Ledger(op))
    }

    fn dispatch(&mut self, caller: Identifier, target: Identifier, call: &Call) -> WardenResult<Outcome> {
        match self.kind_of(target) {
            Some(ResourceKind::Controller) => self.on_controller(caller, target, call),
            Some(ResourceKind::Ledger) => self.on_ledger(caller, target, call),
            Some(ResourceKind::Store) => self.on_store(caller, target, call),
            Some(ResourceKind::Whitelist) => self.on_whitelist(caller, target, call),
            None => Err(WardenError::UnknownResource(target)),
        }
    }

    fn on_controller(&mut self, caller: Identifier, id: Identifier, call: &Call) -> WardenResult<Outcome> {
        let Registry {
            controllers,
            satellites,
            ..
        } = &mut self.registry;
        let controller = controllers
            .get_mut(&id)
            .ok_or(WardenError::UnknownResource(id))?;

        match *call {
            Call::AddAdmin { id: admin } => controller.add_admin(caller, admin)?,
            Call::RemoveAdmin { id: admin } => controller.remove_admin(caller, admin)?,
            Call::Pause => controller.pause(caller)?,
            Call::Unpause => controller.unpause(caller)?,
            Call::Mint { to, amount } => controller.mint(satellites, caller, to, amount)?,
            Call::FinishMinting => controller.finish_minting(caller)?,
            Call::StartMinting => controller.start_minting(caller)?,
            Call::SetContracts { ledger, store } => controller.set_contracts(caller, ledger, store)?,
            Call::Kill { successor } => {
                return Ok(Outcome::Migrated(controller.kill(satellites, caller, successor)?));
            }
            Call::TransferOwnership { new_owner } => controller.transfer_ownership(caller, new_owner)?,
            Call::ProposeOwnership { candidate } => controller.propose_ownership(caller, candidate)?,
            Call::AcceptOwnership => controller.accept_ownership(caller)?,
            Call::Ledger(_) => return Err(wrong_kind(id, ResourceKind::Ledger)),
            Call::SetState { .. } => return Err(wrong_kind(id, ResourceKind::Store)),
            Call::AddWhitelistAdmin { .. }
            | Call::RenounceWhitelistAdmin
            | Call::AddWhitelisted { .. }
            | Call::RemoveWhitelisted { .. }
            | Call::RenounceWhitelisted => return Err(wrong_kind(id, ResourceKind::Whitelist)),
        }
        Ok(Outcome::Applied)
    }

    fn on_ledger(&mut self, caller: Identifier, id: Identifier, call: &Call) -> WardenResult<Outcome> {
        let Registry {
            controllers,
            satellites,
            ..
        } = &mut self.registry;

        match call {
            Call::Ledger(op) => {
                let forwarded = satellites.ledger(id)?.forward(caller, op.clone());
                let controller = controllers
                    .get(&forwarded.controller)
                    .ok_or(WardenError::UnknownResource(forwarded.controller))?;
                controller.mediate(satellites, forwarded.ledger, forwarded.origin, &forwarded.op)?;
                Ok(Outcome::Mediated {
                    controller: forwarded.controller,
                })
            }
            Call::TransferOwnership { new_owner } => {
                satellites.ledger_mut(id)?.transfer_ownership(caller, *new_owner)?;
                Ok(Outcome::Applied)
            }
            Call::ProposeOwnership { candidate } => {
                satellites.ledger_mut(id)?.propose_ownership(caller, *candidate)?;
                Ok(Outcome::Applied)
            }
            Call::AcceptOwnership => {
                satellites.ledger_mut(id)?.accept_ownership(caller)?;
                Ok(Outcome::Applied)
            }
            _ => Err(wrong_kind(id, kind_for(call))),
        }
    }

    fn on_store(&mut self, caller: Identifier, id: Identifier, call: &Call) -> WardenResult<Outcome> {
        let store = self.registry.satellites.store_mut(id)?;
        match call {
            Call::SetState { key, value } => store.set_state(caller, key.clone(), *value)?,
            Call::TransferOwnership { new_owner } => store.set_owner(caller, *new_owner)?,
            Call::ProposeOwnership { candidate } => store.propose_ownership(caller, *candidate)?,
            Call::AcceptOwnership => store.accept_ownership(caller)?,
            _ => return Err(wrong_kind(id, kind_for(call))),
        }
        Ok(Outcome::Applied)
    }

    fn on_whitelist(&mut self, caller: Identifier, id: Identifier, call: &Call) -> WardenResult<Outcome> {
        let whitelist = self
            .registry
            .whitelists
            .get_mut(&id)
            .ok_or(WardenError::UnknownResource(id))?;
        match call {
            Call::AddWhitelistAdmin { id: admin } => whitelist.add_whitelist_admin(caller, *admin)?,
            Call::RenounceWhitelistAdmin => whitelist.renounce_whitelist_admin(caller)?,
            Call::AddWhitelisted { ids } => whitelist.add_whitelisted_bulk(caller, ids)?,
            Call::RemoveWhitelisted { ids } => whitelist.remove_whitelisted_bulk(caller, ids)?,
            Call::RenounceWhitelisted => whitelist.renounce_whitelisted(caller)?,
            _ => return Err(wrong_kind(id, kind_for(call))),
        }
        Ok(Outcome::Applied)
    }

    // --- Queries ---

    pub fn kind_of(&self, id: Identifier) -> Option<ResourceKind> {
        if self.registry.controllers.contains_key(&id) {
            Some(ResourceKind::Controller)
        } else if self.registry.satellites.ledger(id).is_ok() {
            Some(ResourceKind::Ledger)
        } else if self.registry.satellites.store(id).is_ok() {
            Some(ResourceKind::Store)
        } else if self.registry.whitelists.contains_key(&id) {
            Some(ResourceKind::Whitelist)
        } else {
            None
        }
    }

    /// Every deployed resource with its kind.
    pub fn resources(&self) -> Vec<(Identifier, ResourceKind)> {
        let registry = &self.registry;
        registry
            .controllers
            .keys()
            .map(|id| (*id, ResourceKind::Controller))
            .chain(registry.satellites.ledgers().map(|l| (l.id(), ResourceKind::Ledger)))
            .chain(registry.satellites.stores().map(|s| (s.id(), ResourceKind::Store)))
            .chain(registry.whitelists.keys().map(|id| (*id, ResourceKind::Whitelist)))
            .collect()
    }

    pub fn controller(&self, id: Identifier) -> WardenResult<&Controller> {
        self.registry
            .controllers
            .get(&id)
            .ok_or_else(|| self.missing(id, ResourceKind::Controller))
    }

    pub fn ledger(&self, id: Identifier) -> WardenResult<&LedgerFacade> {
        self.registry.satellites.ledger(id)
    }

    pub fn store(&self, id: Identifier) -> WardenResult<&DataStore> {
        self.registry.satellites.store(id)
    }

    pub fn whitelist(&self, id: Identifier) -> WardenResult<&WhitelistRegistry> {
        self.registry
            .whitelists
            .get(&id)
            .ok_or_else(|| self.missing(id, ResourceKind::Whitelist))
    }

    /// Current owner of a Controller, Ledger or Store.
    pub fn owner_of(&self, id: Identifier) -> WardenResult<Identifier> {
        match self.kind_of(id) {
            Some(ResourceKind::Controller) => Ok(self.controller(id)?.owner()),
            Some(ResourceKind::Ledger) => Ok(self.ledger(id)?.owner()),
            Some(ResourceKind::Store) => Ok(self.store(id)?.owner()),
            Some(ResourceKind::Whitelist) => Err(wrong_kind(id, ResourceKind::Controller)),
            None => Err(WardenError::UnknownResource(id)),
        }
    }

    /// The Controller currently answering for a Ledger.
    pub fn ledger_controller(&self, ledger: Identifier) -> WardenResult<&Controller> {
        let owner = self.ledger(ledger)?.owner();
        self.registry
            .controllers
            .get(&owner)
            .ok_or(WardenError::UnknownResource(owner))
    }

    pub fn balance_of(&self, ledger: Identifier, account: Identifier) -> WardenResult<Amount> {
        self.ledger_controller(ledger)?
            .balance_of(&self.registry.satellites, account)
    }

    pub fn allowance(
        &self,
        ledger: Identifier,
        owner: Identifier,
        spender: Identifier,
    ) -> WardenResult<Amount> {
        self.ledger_controller(ledger)?
            .allowance(&self.registry.satellites, owner, spender)
    }

    pub fn total_supply(&self, ledger: Identifier) -> WardenResult<Amount> {
        self.ledger_controller(ledger)?
            .total_supply(&self.registry.satellites)
    }

    pub fn events(&self, ledger: Identifier) -> WardenResult<&[LedgerEvent]> {
        Ok(self.ledger(ledger)?.events())
    }

    /// Read a Store slot as `caller` (owner-gated).
    pub fn get_state(
        &self,
        caller: Identifier,
        store: Identifier,
        key: &SlotKey,
    ) -> WardenResult<Option<SlotValue>> {
        self.store(store)?.get_state(caller, key)
    }

    fn missing(&self, id: Identifier, expected: ResourceKind) -> WardenError {
        match self.kind_of(id) {
            Some(_) => wrong_kind(id, expected),
            None => WardenError::UnknownResource(id),
        }
    }
}

fn wrong_kind(id: Identifier, expected: ResourceKind) -> WardenError {
    WardenError::WrongResourceKind {
        id,
        expected: expected.as_str(),
    }
}

/// The resource kind a call is meant for.
fn kind_for(call: &Call) -> ResourceKind {
    match call {
        Call::Ledger(_) => ResourceKind::Ledger,
        Call::SetState { .. } => ResourceKind::Store,
        Call::AddWhitelistAdmin { .. }
        | Call::RenounceWhitelistAdmin
        | Call::AddWhitelisted { .. }
        | Call::RemoveWhitelisted { .. }
        | Call::RenounceWhitelisted => ResourceKind::Whitelist,
        _ => ResourceKind::Controller,
    }
}
