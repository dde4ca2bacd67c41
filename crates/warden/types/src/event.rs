use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;
use crate::Amount;

/// An event appended to a Ledger's log.
///
/// Mint and burn are `Transfer`s from / to `Identifier::NONE`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    Transfer {
        from: Identifier,
        to: Identifier,
        value: Amount,
    },
    Approval {
        owner: Identifier,
        spender: Identifier,
        value: Amount,
    },
}

impl LedgerEvent {
    pub fn transfer(from: Identifier, to: Identifier, value: Amount) -> Self {
        LedgerEvent::Transfer { from, to, value }
    }

    pub fn approval(owner: Identifier, spender: Identifier, value: Amount) -> Self {
        LedgerEvent::Approval {
            owner,
            spender,
            value,
        }
    }

    pub fn is_mint(&self) -> bool {
        matches!(self, LedgerEvent::Transfer { from, .. } if from.is_none())
    }

    pub fn is_burn(&self) -> bool {
        matches!(self, LedgerEvent::Transfer { to, .. } if to.is_none())
    }
}
