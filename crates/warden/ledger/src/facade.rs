use serde::{Deserialize, Serialize};
use tracing::debug;
use warden_ownership::{Ownable, Ownership};
use warden_types::{Amount, Identifier, LedgerEvent, WardenResult};

use crate::ops::{LedgerOp, MediatedCall};

/// Identity metadata of a Ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for LedgerMetadata {
    fn default() -> Self {
        Self {
            name: "Warden Token".to_string(),
            symbol: "WDN".to_string(),
            decimals: 18,
        }
    }
}

/// The public fungible-asset surface of a Ledger.
///
/// The facade implements no bookkeeping. Each write is wrapped into a
/// [`MediatedCall`] addressed to the facade's current owner (its Controller)
/// with the facade's own identifier as the caller. The facade keeps only its
/// metadata and the event log, which only the owner may append to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFacade {
    id: Identifier,
    ownership: Ownership,
    metadata: LedgerMetadata,
    #[serde(default)]
    events: Vec<LedgerEvent>,
}

impl LedgerFacade {
    pub fn new(id: Identifier, creator: Identifier, metadata: LedgerMetadata) -> WardenResult<Self> {
        Ok(Self {
            id,
            ownership: Ownership::new(creator)?,
            metadata,
            events: Vec::new(),
        })
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn metadata(&self) -> &LedgerMetadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Append an event to the log (owner-gated).
    pub fn emit(&mut self, caller: Identifier, event: LedgerEvent) -> WardenResult<()> {
        self.require_owner(caller)?;
        self.events.push(event);
        Ok(())
    }

    /// Wrap `op` sent by `origin` into a call on the owning Controller.
    pub fn forward(&self, origin: Identifier, op: LedgerOp) -> MediatedCall {
        debug!(
            ledger = %self.id,
            controller = %self.owner(),
            origin = %origin,
            op = op.name(),
            "Forwarding ledger call"
        );
        MediatedCall {
            ledger: self.id,
            controller: self.owner(),
            origin,
            op,
        }
    }

    pub fn transfer(&self, origin: Identifier, to: Identifier, amount: Amount) -> MediatedCall {
        self.forward(origin, LedgerOp::Transfer { to, amount })
    }

    pub fn approve(&self, origin: Identifier, spender: Identifier, amount: Amount) -> MediatedCall {
        self.forward(origin, LedgerOp::Approve { spender, amount })
    }

    pub fn transfer_from(
        &self,
        origin: Identifier,
        from: Identifier,
        to: Identifier,
        amount: Amount,
    ) -> MediatedCall {
        self.forward(origin, LedgerOp::TransferFrom { from, to, amount })
    }

    pub fn increase_allowance(
        &self,
        origin: Identifier,
        spender: Identifier,
        added: Amount,
    ) -> MediatedCall {
        self.forward(origin, LedgerOp::IncreaseAllowance { spender, added })
    }

    pub fn decrease_allowance(
        &self,
        origin: Identifier,
        spender: Identifier,
        subtracted: Amount,
    ) -> MediatedCall {
        self.forward(origin, LedgerOp::DecreaseAllowance { spender, subtracted })
    }

    pub fn burn(&self, origin: Identifier, amount: Amount) -> MediatedCall {
        self.forward(origin, LedgerOp::Burn { amount })
    }

    pub fn burn_from(&self, origin: Identifier, from: Identifier, amount: Amount) -> MediatedCall {
        self.forward(origin, LedgerOp::BurnFrom { from, amount })
    }
}

impl Ownable for LedgerFacade {
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

    fn deployer() -> Identifier {
        Identifier::derive("deployer")
    }

    fn ledger() -> LedgerFacade {
        LedgerFacade::new(Identifier::generate(), deployer(), LedgerMetadata::default()).unwrap()
    }

    #[test]
    fn has_metadata() {
        let l = ledger();
        assert_eq!(l.name(), "Warden Token");
        assert_eq!(l.symbol(), "WDN");
        assert_eq!(l.decimals(), 18);
    }

    #[test]
    fn forwards_to_owner_with_own_identity() {
        let mut l = ledger();
        let controller = Identifier::derive("controller");
        l.transfer_ownership(deployer(), controller).unwrap();

        let alice = Identifier::derive("alice");
        let bob = Identifier::derive("bob");
        let call = l.transfer(alice, bob, 10);
        assert_eq!(call.ledger, l.id());
        assert_eq!(call.controller, controller);
        assert_eq!(call.origin, alice);
        assert_eq!(call.op, LedgerOp::Transfer { to: bob, amount: 10 });
    }

    #[test]
    fn forwarding_follows_ownership() {
        let mut l = ledger();
        let c1 = Identifier::derive("controller-1");
        let c2 = Identifier::derive("controller-2");
        l.transfer_ownership(deployer(), c1).unwrap();
        l.transfer_ownership(c1, c2).unwrap();
        assert_eq!(l.burn(deployer(), 1).controller, c2);
    }

    #[test]
    fn only_owner_emits() {
        let mut l = ledger();
        let alice = Identifier::derive("alice");
        let event = LedgerEvent::transfer(Identifier::NONE, alice, 5);
        assert!(l.emit(alice, event.clone()).unwrap_err().is_unauthorized());
        assert!(l.events().is_empty());

        l.emit(deployer(), event.clone()).unwrap();
        assert_eq!(l.events(), &[event]);
    }
}
