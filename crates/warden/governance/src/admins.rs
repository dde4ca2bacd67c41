use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use warden_types::{Identifier, Role, WardenError, WardenResult};

/// Upper bound on the admin quorum.
pub const MAX_ADMINS: usize = 10;

/// The bounded admin quorum allowed to govern a Controller.
///
/// Invariants:
/// - `1 <= len() <= MAX_ADMINS`
/// - the founding admin is a member at construction
/// - no identifier appears twice, and `NONE` never appears
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRegistry {
    founder: Identifier,
    admins: BTreeSet<Identifier>,
}

impl AdminRegistry {
    pub fn new(founder: Identifier) -> WardenResult<Self> {
        if founder.is_none() {
            return Err(WardenError::invalid("founding admin cannot be NONE"));
        }
        let mut admins = BTreeSet::new();
        admins.insert(founder);
        Ok(Self { founder, admins })
    }

    pub fn founder(&self) -> Identifier {
        self.founder
    }

    pub fn is_admin(&self, id: Identifier) -> bool {
        self.admins.contains(&id)
    }

    pub fn require_admin(&self, caller: Identifier) -> WardenResult<()> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            Err(WardenError::unauthorized(caller, Role::Admin))
        }
    }

    pub fn len(&self) -> usize {
        self.admins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }

    pub fn admins(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.admins.iter().copied()
    }

    pub fn add_admin(&mut self, caller: Identifier, id: Identifier) -> WardenResult<()> {
        self.require_admin(caller)?;
        if id.is_none() {
            return Err(WardenError::invalid("admin cannot be NONE"));
        }
        if self.is_admin(id) {
            return Err(WardenError::AlreadyAdmin(id));
        }
        if self.admins.len() >= MAX_ADMINS {
            return Err(WardenError::CapacityExceeded { max: MAX_ADMINS });
        }

        self.admins.insert(id);
        info!(admin = %id, added_by = %caller, count = self.admins.len(), "Admin added");
        Ok(())
    }

    /// Remove an admin. The last remaining admin cannot be removed.
    pub fn remove_admin(&mut self, caller: Identifier, id: Identifier) -> WardenResult<()> {
        self.require_admin(caller)?;
        if !self.is_admin(id) {
            return Err(WardenError::NotAdmin(id));
        }
        if self.admins.len() == 1 {
            return Err(WardenError::LastAdmin(id));
        }

        self.admins.remove(&id);
        warn!(admin = %id, removed_by = %caller, count = self.admins.len(), "Admin removed");
        Ok(())
    }
}
