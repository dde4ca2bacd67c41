use serde::{Deserialize, Serialize};
use warden_controller::Migration;
use warden_ledger::LedgerOp;
use warden_store::{SlotKey, SlotValue};
use warden_types::{Amount, Identifier};

/// A mutating operation addressed to one deployed resource.
///
/// Which variants a resource accepts depends on its kind; sending a
/// Controller operation to a Store fails with `WrongResourceKind`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    // --- Controller ---
    AddAdmin { id: Identifier },
    RemoveAdmin { id: Identifier },
    Pause,
    Unpause,
    Mint { to: Identifier, amount: Amount },
    FinishMinting,
    StartMinting,
    SetContracts { ledger: Identifier, store: Identifier },
    Kill { successor: Identifier },

    // --- Ledger ---
    Ledger(LedgerOp),

    // --- Store ---
    SetState { key: SlotKey, value: SlotValue },

    // --- Whitelist ---
    AddWhitelistAdmin { id: Identifier },
    RenounceWhitelistAdmin,
    AddWhitelisted { ids: Vec<Identifier> },
    RemoveWhitelisted { ids: Vec<Identifier> },
    RenounceWhitelisted,

    // --- Ownership (controller, ledger, store) ---
    TransferOwnership { new_owner: Identifier },
    ProposeOwnership { candidate: Identifier },
    AcceptOwnership,
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::AddAdmin { .. } => "add_admin",
            Call::RemoveAdmin { .. } => "remove_admin",
            Call::Pause => "pause",
            Call::Unpause => "unpause",
            Call::Mint { .. } => "mint",
            Call::FinishMinting => "finish_minting",
            Call::StartMinting => "start_minting",
            Call::SetContracts { .. } => "set_contracts",
            Call::Kill { .. } => "kill",
            Call::Ledger(op) => op.name(),
            Call::SetState { .. } => "set_state",
            Call::AddWhitelistAdmin { .. } => "add_whitelist_admin",
            Call::RenounceWhitelistAdmin => "renounce_whitelist_admin",
            Call::AddWhitelisted { .. } => "add_whitelisted",
            Call::RemoveWhitelisted { .. } => "remove_whitelisted",
            Call::RenounceWhitelisted => "renounce_whitelisted",
            Call::TransferOwnership { .. } => "transfer_ownership",
            Call::ProposeOwnership { .. } => "propose_ownership",
            Call::AcceptOwnership => "accept_ownership",
        }
    }
}

impl From<LedgerOp> for Call {
    fn from(op: LedgerOp) -> Self {
        Call::Ledger(op)
    }
}

/// What a successful call did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Applied directly to the target.
    Applied,
    /// A Ledger write, carried out by the Controller that owns the Ledger.
    Mediated { controller: Identifier },
    /// A `kill`: what moved to the successor.
    Migrated(Migration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_ops_wrap_into_calls() {
        let to = Identifier::derive("bob");
        let call: Call = LedgerOp::Transfer { to, amount: 3 }.into();
        assert_eq!(call.name(), "transfer");
    }

    #[test]
    fn calls_round_trip_through_json() {
        let call = Call::Mint {
            to: Identifier::derive("alice"),
            amount: u128::MAX,
        };
        let json = serde_json::to_string(&call).unwrap();
        assert!(json.starts_with("{\"mint\""));
        let back: Call = serde_json::from_str(&json).unwrap();
        assert_eq!(back, call);

        let json = serde_json::to_string(&Call::Pause).unwrap();
        assert_eq!(json, "\"pause\"");
    }
}
