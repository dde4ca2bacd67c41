//! # warden-ownership
//!
//! The ownership capability shared by every governed resource (Store, Ledger
//! and the Controller itself): exactly one current owner, and only that owner
//! may invoke owner-gated operations or reassign ownership.
//!
//! Handoff is single-step. There is no acceptance by the new owner, so a
//! transfer to an identifier nobody controls orphans the resource for good.
//! `propose` / `accept` offer a two-phase variant for callers that want the
//! recipient to prove it is reachable; the single-step path is unaffected.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use warden_types::{Identifier, Role, WardenError, WardenResult};

/// Owner record of a single resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    owner: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pending: Option<Identifier>,
}

impl Ownership {
    /// Ownership held by `owner`, normally the deploying caller.
    pub fn new(owner: Identifier) -> WardenResult<Self> {
        if owner.is_none() {
            return Err(WardenError::invalid("owner cannot be NONE"));
        }
        Ok(Self {
            owner,
            pending: None,
        })
    }

    pub fn owner(&self) -> Identifier {
        self.owner
    }

    pub fn is_owner(&self, caller: Identifier) -> bool {
        caller.is_some() && caller == self.owner
    }

    /// Candidate of an in-flight two-phase handoff, if any.
    pub fn pending(&self) -> Option<Identifier> {
        self.pending
    }

    pub fn require_owner(&self, caller: Identifier) -> WardenResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(WardenError::unauthorized(caller, Role::Owner))
        }
    }

    /// Single-step handoff. Returns the previous owner.
    ///
    /// Clears any pending proposal.
    pub fn transfer(&mut self, caller: Identifier, new_owner: Identifier) -> WardenResult<Identifier> {
        self.require_owner(caller)?;
        if new_owner.is_none() {
            return Err(WardenError::invalid("new owner cannot be NONE"));
        }

        let previous = self.owner;
        self.owner = new_owner;
        self.pending = None;

        warn!(
            previous = %previous,
            new_owner = %new_owner,
            "Ownership transferred"
        );
        Ok(previous)
    }

    /// First phase of a two-phase handoff: name a candidate.
    pub fn propose(&mut self, caller: Identifier, candidate: Identifier) -> WardenResult<()> {
        self.require_owner(caller)?;
        if candidate.is_none() {
            return Err(WardenError::invalid("candidate owner cannot be NONE"));
        }

        self.pending = Some(candidate);
        info!(owner = %self.owner, candidate = %candidate, "Ownership handoff proposed");
        Ok(())
    }

    /// Second phase: the candidate claims ownership. Returns the previous owner.
    pub fn accept(&mut self, caller: Identifier) -> WardenResult<Identifier> {
        let candidate = self.pending.ok_or(WardenError::NoPendingOwner)?;
        if caller != candidate {
            return Err(WardenError::unauthorized(caller, Role::PendingOwner));
        }

        let previous = self.owner;
        self.owner = candidate;
        self.pending = None;

        warn!(
            previous = %previous,
            new_owner = %candidate,
            "Ownership handoff accepted"
        );
        Ok(previous)
    }
}

/// A resource gated by an [`Ownership`] record.
pub trait Ownable {
    fn ownership(&self) -> &Ownership;

    fn ownership_mut(&mut self) -> &mut Ownership;

    fn owner(&self) -> Identifier {
        self.ownership().owner()
    }

    fn require_owner(&self, caller: Identifier) -> WardenResult<()> {
        self.ownership().require_owner(caller)
    }

    fn transfer_ownership(&mut self, caller: Identifier, new_owner: Identifier) -> WardenResult<()> {
        self.ownership_mut().transfer(caller, new_owner).map(|_| ())
    }

    fn propose_ownership(&mut self, caller: Identifier, candidate: Identifier) -> WardenResult<()> {
        self.ownership_mut().propose(caller, candidate)
    }

    fn accept_ownership(&mut self, caller: Identifier) -> WardenResult<()> {
        self.ownership_mut().accept(caller).map(|_| ())
    }
}
