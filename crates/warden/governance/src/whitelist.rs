use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;
use warden_types::{Identifier, Role, WardenError, WardenResult};

/// Whitelist role registry with bulk membership management.
///
/// Independent of any Controller: its own admins (the creator first) manage
/// the whitelisted set. Bulk operations are all-or-nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistRegistry {
    admins: BTreeSet<Identifier>,
    members: BTreeSet<Identifier>,
}

impl WhitelistRegistry {
    pub fn new(creator: Identifier) -> WardenResult<Self> {
        if creator.is_none() {
            return Err(WardenError::invalid("whitelist admin cannot be NONE"));
        }
        let mut admins = BTreeSet::new();
        admins.insert(creator);
        Ok(Self {
            admins,
            members: BTreeSet::new(),
        })
    }

    pub fn is_whitelist_admin(&self, id: Identifier) -> bool {
        self.admins.contains(&id)
    }

    pub fn is_whitelisted(&self, id: Identifier) -> bool {
        self.members.contains(&id)
    }

    pub fn members(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.members.iter().copied()
    }

    fn require_whitelist_admin(&self, caller: Identifier) -> WardenResult<()> {
        if self.is_whitelist_admin(caller) {
            Ok(())
        } else {
            Err(WardenError::unauthorized(caller, Role::WhitelistAdmin))
        }
    }

    pub fn add_whitelist_admin(&mut self, caller: Identifier, id: Identifier) -> WardenResult<()> {
        self.require_whitelist_admin(caller)?;
        if id.is_none() {
            return Err(WardenError::invalid("whitelist admin cannot be NONE"));
        }
        if !self.admins.insert(id) {
            return Err(WardenError::AlreadyAdmin(id));
        }
        info!(admin = %id, "Whitelist admin added");
        Ok(())
    }

    pub fn renounce_whitelist_admin(&mut self, caller: Identifier) -> WardenResult<()> {
        if !self.admins.remove(&caller) {
            return Err(WardenError::NotAdmin(caller));
        }
        info!(admin = %caller, "Whitelist admin renounced");
        Ok(())
    }

    pub fn add_whitelisted(&mut self, caller: Identifier, id: Identifier) -> WardenResult<()> {
        self.add_whitelisted_bulk(caller, &[id])
    }

    pub fn remove_whitelisted(&mut self, caller: Identifier, id: Identifier) -> WardenResult<()> {
        self.remove_whitelisted_bulk(caller, &[id])
    }

    /// Whitelist every identifier in `ids`, or none of them.
    pub fn add_whitelisted_bulk(&mut self, caller: Identifier, ids: &[Identifier]) -> WardenResult<()> {
        self.require_whitelist_admin(caller)?;

        let mut batch = BTreeSet::new();
        for &id in ids {
            if id.is_none() {
                return Err(WardenError::invalid("cannot whitelist NONE"));
            }
            if self.members.contains(&id) || !batch.insert(id) {
                return Err(WardenError::AlreadyMember(id));
            }
        }

        info!(count = batch.len(), by = %caller, "Whitelisted");
        self.members.extend(batch);
        Ok(())
    }

    /// Remove every identifier in `ids` from the whitelist, or none of them.
    pub fn remove_whitelisted_bulk(
        &mut self,
        caller: Identifier,
        ids: &[Identifier],
    ) -> WardenResult<()> {
        self.require_whitelist_admin(caller)?;

        let mut batch = BTreeSet::new();
        for &id in ids {
            if !self.members.contains(&id) || !batch.insert(id) {
                return Err(WardenError::NotMember(id));
            }
        }

        for id in &batch {
            self.members.remove(id);
        }
        info!(count = batch.len(), by = %caller, "Removed from whitelist");
        Ok(())
    }

    pub fn renounce_whitelisted(&mut self, caller: Identifier) -> WardenResult<()> {
        if !self.members.remove(&caller) {
            return Err(WardenError::NotMember(caller));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Identifier {
        Identifier::derive("whitelist-admin")
    }

    fn accounts(n: usize) -> Vec<Identifier> {
        (0..n)
            .map(|i| Identifier::derive(&format!("member-{i}")))
            .collect()
    }

    fn setup() -> (WhitelistRegistry, Identifier, Identifier) {
        let mut reg = WhitelistRegistry::new(admin()).unwrap();
        let whitelisted = Identifier::derive("whitelisted");
        let other = Identifier::derive("other-whitelisted");
        reg.add_whitelisted(admin(), whitelisted).unwrap();
        reg.add_whitelisted(admin(), other).unwrap();
        (reg, whitelisted, other)
    }

    #[test]
    fn members_are_whitelisted() {
        let (reg, whitelisted, other) = setup();
        assert!(reg.is_whitelisted(whitelisted));
        assert!(reg.is_whitelisted(other));
        assert!(!reg.is_whitelisted(admin()));
    }

    #[test]
    fn add_in_bulk() {
        let (mut reg, _, _) = setup();
        let others = accounts(5);
        reg.add_whitelisted_bulk(admin(), &others).unwrap();
        assert!(others.iter().all(|id| reg.is_whitelisted(*id)));
    }

    #[test]
    fn remove_in_bulk() {
        let (mut reg, whitelisted, other) = setup();
        reg.remove_whitelisted_bulk(admin(), &[whitelisted, other]).unwrap();
        assert!(!reg.is_whitelisted(whitelisted));
        assert!(!reg.is_whitelisted(other));
    }

    #[test]
    fn bulk_add_is_all_or_nothing() {
        let (mut reg, whitelisted, _) = setup();
        let mut batch = accounts(3);
        batch.push(whitelisted);
        let err = reg.add_whitelisted_bulk(admin(), &batch).unwrap_err();
        assert_eq!(err, WardenError::AlreadyMember(whitelisted));
        assert!(!reg.is_whitelisted(batch[0]));
    }

    #[test]
    fn bulk_remove_is_all_or_nothing() {
        let (mut reg, whitelisted, _) = setup();
        let stranger = Identifier::derive("stranger");
        let err = reg
            .remove_whitelisted_bulk(admin(), &[whitelisted, stranger])
            .unwrap_err();
        assert_eq!(err, WardenError::NotMember(stranger));
        assert!(reg.is_whitelisted(whitelisted));
    }

    #[test]
    fn non_admin_cannot_manage() {
        let (mut reg, whitelisted, _) = setup();
        let err = reg.add_whitelisted(whitelisted, accounts(1)[0]).unwrap_err();
        assert_eq!(err, WardenError::unauthorized(whitelisted, Role::WhitelistAdmin));
        assert!(reg.remove_whitelisted(whitelisted, whitelisted).is_err());
    }

    #[test]
    fn members_can_renounce() {
        let (mut reg, whitelisted, _) = setup();
        reg.renounce_whitelisted(whitelisted).unwrap();
        assert!(!reg.is_whitelisted(whitelisted));
        assert_eq!(
            reg.renounce_whitelisted(whitelisted).unwrap_err(),
            WardenError::NotMember(whitelisted)
        );
    }

    #[test]
    fn admins_can_be_added_and_renounce() {
        let (mut reg, _, _) = setup();
        let second = Identifier::derive("second-admin");
        reg.add_whitelist_admin(admin(), second).unwrap();
        assert!(reg.is_whitelist_admin(second));
        assert_eq!(
            reg.add_whitelist_admin(admin(), second).unwrap_err(),
            WardenError::AlreadyAdmin(second)
        );

        reg.renounce_whitelist_admin(admin()).unwrap();
        assert!(!reg.is_whitelist_admin(admin()));
        reg.add_whitelisted(second, accounts(1)[0]).unwrap();
    }

    #[test]
    fn none_cannot_be_whitelisted() {
        let (mut reg, _, _) = setup();
        assert!(matches!(
            reg.add_whitelisted(admin(), Identifier::NONE),
            Err(WardenError::InvalidArgument(_))
        ));
    }
}
