//! Ledger bookkeeping mediated by the Controller.
//!
//! Every entry point here requires the caller to be the registered Ledger,
//! this Controller to still own that Ledger, and the gate to be active.
//! Balances, allowances and supply live in Store slots; the Controller does
//! the arithmetic and appends the resulting events to the Ledger.

use tracing::debug;
use warden_ledger::{LedgerOp, LedgerQuery};
use warden_ownership::Ownable;
use warden_store::{DataStore, SlotKey, StateStore};
use warden_types::{Amount, Identifier, LedgerEvent, Role, WardenError, WardenResult};

use crate::controller::Controller;
use crate::satellites::Satellites;

impl Controller {
    /// Gate shared by all mediated operations.
    fn authorize_mediated(&self, sats: &Satellites, caller: Identifier) -> WardenResult<()> {
        if self.ledger_id().is_none() || caller != self.ledger_id() {
            return Err(WardenError::unauthorized(caller, Role::Ledger));
        }
        // Authority over the Ledger may have been migrated away.
        sats.ledger(self.ledger_id())?.require_owner(self.id())?;
        self.gate().require_active()
    }

    /// Dispatch a forwarded Ledger write.
    pub fn mediate(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        origin: Identifier,
        op: &LedgerOp,
    ) -> WardenResult<()> {
        debug!(controller = %self.id(), origin = %origin, op = op.name(), "Mediating ledger call");
        match *op {
            LedgerOp::Transfer { to, amount } => {
                self.mediated_transfer(sats, caller, origin, to, amount)
            }
            LedgerOp::Approve { spender, amount } => {
                self.mediated_approve(sats, caller, origin, spender, amount)
            }
            LedgerOp::TransferFrom { from, to, amount } => {
                self.mediated_transfer_from(sats, caller, origin, from, to, amount)
            }
            LedgerOp::IncreaseAllowance { spender, added } => {
                self.mediated_increase_allowance(sats, caller, origin, spender, added)
            }
            LedgerOp::DecreaseAllowance {
                spender,
                subtracted,
            } => self.mediated_decrease_allowance(sats, caller, origin, spender, subtracted),
            LedgerOp::Burn { amount } => self.mediated_burn(sats, caller, origin, amount),
            LedgerOp::BurnFrom { from, amount } => {
                self.mediated_burn_from(sats, caller, origin, from, amount)
            }
        }
    }

    pub fn mediated_transfer(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        from: Identifier,
        to: Identifier,
        amount: Amount,
    ) -> WardenResult<()> {
        self.authorize_mediated(sats, caller)?;
        let mut book = Book::open(self, sats)?;
        book.move_balance(from, to, amount)?;
        self.emit(sats, vec![LedgerEvent::transfer(from, to, amount)])
    }

    pub fn mediated_approve(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        owner: Identifier,
        spender: Identifier,
        amount: Amount,
    ) -> WardenResult<()> {
        self.authorize_mediated(sats, caller)?;
        let mut book = Book::open(self, sats)?;
        book.set_allowance(owner, spender, amount)?;
        self.emit(sats, vec![LedgerEvent::approval(owner, spender, amount)])
    }

    pub fn mediated_transfer_from(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        spender: Identifier,
        from: Identifier,
        to: Identifier,
        amount: Amount,
    ) -> WardenResult<()> {
        self.authorize_mediated(sats, caller)?;
        let mut book = Book::open(self, sats)?;
        book.require_balance(from, amount)?;
        let remaining = book.spend_allowance(from, spender, amount)?;
        book.move_balance(from, to, amount)?;
        self.emit(
            sats,
            vec![
                LedgerEvent::transfer(from, to, amount),
                LedgerEvent::approval(from, spender, remaining),
            ],
        )
    }

    pub fn mediated_increase_allowance(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        owner: Identifier,
        spender: Identifier,
        added: Amount,
    ) -> WardenResult<()> {
        self.authorize_mediated(sats, caller)?;
        let mut book = Book::open(self, sats)?;
        let current = book.allowance(owner, spender)?;
        let updated = current.checked_add(added).ok_or(WardenError::Overflow)?;
        book.set_allowance(owner, spender, updated)?;
        self.emit(sats, vec![LedgerEvent::approval(owner, spender, updated)])
    }

    pub fn mediated_decrease_allowance(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        owner: Identifier,
        spender: Identifier,
        subtracted: Amount,
    ) -> WardenResult<()> {
        self.authorize_mediated(sats, caller)?;
        let mut book = Book::open(self, sats)?;
        let updated = book.spend_allowance(owner, spender, subtracted)?;
        self.emit(sats, vec![LedgerEvent::approval(owner, spender, updated)])
    }

    pub fn mediated_burn(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        from: Identifier,
        amount: Amount,
    ) -> WardenResult<()> {
        self.authorize_mediated(sats, caller)?;
        let mut book = Book::open(self, sats)?;
        book.burn(from, amount)?;
        self.emit(sats, vec![LedgerEvent::transfer(from, Identifier::NONE, amount)])
    }

    pub fn mediated_burn_from(
        &self,
        sats: &mut Satellites,
        caller: Identifier,
        spender: Identifier,
        from: Identifier,
        amount: Amount,
    ) -> WardenResult<()> {
        self.authorize_mediated(sats, caller)?;
        let mut book = Book::open(self, sats)?;
        book.require_balance(from, amount)?;
        let remaining = book.spend_allowance(from, spender, amount)?;
        book.burn(from, amount)?;
        self.emit(
            sats,
            vec![
                LedgerEvent::transfer(from, Identifier::NONE, amount),
                LedgerEvent::approval(from, spender, remaining),
            ],
        )
    }

    // --- Reads ---

    /// Answer a balance query from the Store.
    ///
    /// Reads are not pause-gated, but the Store only answers its owner, so a
    /// migrated-away Controller can no longer read it either.
    pub fn query(&self, sats: &Satellites, query: LedgerQuery) -> WardenResult<Amount> {
        let store = self.store(sats)?;
        let key = match query {
            LedgerQuery::BalanceOf(account) => SlotKey::balance(account),
            LedgerQuery::Allowance { owner, spender } => SlotKey::allowance(owner, spender),
            LedgerQuery::TotalSupply => SlotKey::total_supply(),
        };
        store.get_int(self.id(), &key)
    }

    pub fn balance_of(&self, sats: &Satellites, account: Identifier) -> WardenResult<Amount> {
        self.query(sats, LedgerQuery::BalanceOf(account))
    }

    pub fn allowance(
        &self,
        sats: &Satellites,
        owner: Identifier,
        spender: Identifier,
    ) -> WardenResult<Amount> {
        self.query(sats, LedgerQuery::Allowance { owner, spender })
    }

    pub fn total_supply(&self, sats: &Satellites) -> WardenResult<Amount> {
        self.query(sats, LedgerQuery::TotalSupply)
    }
}

/// Balance arithmetic over the Controller's Store, acting as the Controller.
struct Book<'a> {
    store: &'a mut DataStore,
    actor: Identifier,
}

impl<'a> Book<'a> {
    fn open(controller: &Controller, sats: &'a mut Satellites) -> WardenResult<Self> {
        Ok(Self {
            store: controller.store_mut(sats)?,
            actor: controller.id(),
        })
    }

    fn balance(&self, account: Identifier) -> WardenResult<Amount> {
        self.store.get_int(self.actor, &SlotKey::balance(account))
    }

    fn allowance(&self, owner: Identifier, spender: Identifier) -> WardenResult<Amount> {
        self.store
            .get_int(self.actor, &SlotKey::allowance(owner, spender))
    }

    fn set_allowance(&mut self, owner: Identifier, spender: Identifier, value: Amount) -> WardenResult<()> {
        if spender.is_none() {
            return Err(WardenError::invalid("spender cannot be NONE"));
        }
        self.store
            .set_int(self.actor, SlotKey::allowance(owner, spender), value)
    }

    /// Consume `amount` of `spender`'s allowance over `owner`. Returns what is left.
    fn spend_allowance(
        &mut self,
        owner: Identifier,
        spender: Identifier,
        amount: Amount,
    ) -> WardenResult<Amount> {
        let allowance = self.allowance(owner, spender)?;
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(WardenError::InsufficientAllowance {
                owner,
                spender,
                allowance,
                required: amount,
            })?;
        self.set_allowance(owner, spender, remaining)?;
        Ok(remaining)
    }

    /// What `account` would hold after losing `amount`.
    fn require_balance(&self, account: Identifier, amount: Amount) -> WardenResult<Amount> {
        let balance = self.balance(account)?;
        balance
            .checked_sub(amount)
            .ok_or(WardenError::InsufficientBalance {
                account,
                balance,
                required: amount,
            })
    }

    fn debit(&mut self, account: Identifier, amount: Amount) -> WardenResult<()> {
        let updated = self.require_balance(account, amount)?;
        self.store
            .set_int(self.actor, SlotKey::balance(account), updated)
    }

    fn credit(&mut self, account: Identifier, amount: Amount) -> WardenResult<()> {
        let balance = self.balance(account)?;
        let updated = balance.checked_add(amount).ok_or(WardenError::Overflow)?;
        self.store
            .set_int(self.actor, SlotKey::balance(account), updated)
    }

    fn move_balance(&mut self, from: Identifier, to: Identifier, amount: Amount) -> WardenResult<()> {
        if to.is_none() {
            return Err(WardenError::invalid("cannot transfer to NONE"));
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    fn burn(&mut self, from: Identifier, amount: Amount) -> WardenResult<()> {
        self.debit(from, amount)?;
        let supply = self.store.get_int(self.actor, &SlotKey::total_supply())?;
        let supply = supply.checked_sub(amount).ok_or(WardenError::Overflow)?;
        self.store.set_int(self.actor, SlotKey::total_supply(), supply)
    }
}
