use serde::{Deserialize, Serialize};
use warden_types::{Amount, Identifier};

/// A write request against the Ledger, on behalf of the account that sent it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerOp {
    Transfer {
        to: Identifier,
        amount: Amount,
    },
    Approve {
        spender: Identifier,
        amount: Amount,
    },
    TransferFrom {
        from: Identifier,
        to: Identifier,
        amount: Amount,
    },
    IncreaseAllowance {
        spender: Identifier,
        added: Amount,
    },
    DecreaseAllowance {
        spender: Identifier,
        subtracted: Amount,
    },
    Burn {
        amount: Amount,
    },
    BurnFrom {
        from: Identifier,
        amount: Amount,
    },
}

impl LedgerOp {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerOp::Transfer { .. } => "transfer",
            LedgerOp::Approve { .. } => "approve",
            LedgerOp::TransferFrom { .. } => "transfer_from",
            LedgerOp::IncreaseAllowance { .. } => "increase_allowance",
            LedgerOp::DecreaseAllowance { .. } => "decrease_allowance",
            LedgerOp::Burn { .. } => "burn",
            LedgerOp::BurnFrom { .. } => "burn_from",
        }
    }
}

/// A read request against the Ledger's balances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerQuery {
    BalanceOf(Identifier),
    Allowance {
        owner: Identifier,
        spender: Identifier,
    },
    TotalSupply,
}

/// A Ledger request forwarded to the Controller that owns the Ledger.
///
/// `ledger` is the verified identity the Controller checks against its
/// registered Ledger; `origin` is the account the Ledger acts for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediatedCall {
    pub ledger: Identifier,
    pub controller: Identifier,
    pub origin: Identifier,
    pub op: LedgerOp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_wire_form() {
        let op = LedgerOp::BurnFrom {
            from: Identifier::derive("alice"),
            amount: 12,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["burn_from"]["amount"], 12);
        assert_eq!(op.name(), "burn_from");

        let back: LedgerOp = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn large_amounts_survive_text_encoding() {
        let op = LedgerOp::Transfer {
            to: Identifier::derive("bob"),
            amount: u128::MAX,
        };
        let text = serde_json::to_string(&op).unwrap();
        assert!(text.contains(&u128::MAX.to_string()));
        assert_eq!(serde_json::from_str::<LedgerOp>(&text).unwrap(), op);
    }
}
