use serde::{Deserialize, Serialize};
use warden_types::{Amount, Identifier};

/// Name of a state slot.
///
/// Ledger bookkeeping uses the `balance/…`, `allowance/…/…` and
/// `total_supply` namespaces; any other name is free for callers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotKey(String);

impl SlotKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn balance(account: Identifier) -> Self {
        Self(format!("balance/{account}"))
    }

    pub fn allowance(owner: Identifier, spender: Identifier) -> Self {
        Self(format!("allowance/{owner}/{spender}"))
    }

    pub fn total_supply() -> Self {
        Self("total_supply".into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value held in a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotValue {
    Bool(bool),
    Int(Amount),
}

impl SlotValue {
    pub fn kind(&self) -> &'static str {
        match self {
            SlotValue::Bool(_) => "bool",
            SlotValue::Int(_) => "int",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookkeeping_keys_are_distinct() {
        let a = Identifier::derive("alice");
        let b = Identifier::derive("bob");
        assert_ne!(SlotKey::balance(a), SlotKey::balance(b));
        assert_ne!(SlotKey::allowance(a, b), SlotKey::allowance(b, a));
        assert!(SlotKey::balance(a).as_str().starts_with("balance/"));
        assert_eq!(SlotKey::total_supply().to_string(), "total_supply");
    }

    #[test]
    fn large_amounts_survive_json() {
        let value = SlotValue::Int(100_000_000_000_000_000_000_000_000_000);
        let json = serde_json::to_string(&value).unwrap();
        let back: SlotValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
