use thiserror::Error;

use crate::identifier::Identifier;
use crate::{Amount, PauseState};

/// The role a caller failed to hold when an authorization gate rejected it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Current owner of a resource.
    Owner,
    /// Candidate named by a pending two-phase handoff.
    PendingOwner,
    /// Member of a Controller's admin quorum.
    Admin,
    /// The Ledger registered with a Controller.
    Ledger,
    /// Admin of a whitelist role registry.
    WhitelistAdmin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Owner => "owner",
            Role::PendingOwner => "pending owner",
            Role::Admin => "admin",
            Role::Ledger => "registered ledger",
            Role::WhitelistAdmin => "whitelist admin",
        };
        f.write_str(name)
    }
}

/// Errors raised by Warden operations.
///
/// Every variant is a rejected operation: the host discards all effects of
/// the failing call and nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WardenError {
    // --- Authorization ---
    #[error("unauthorized: {caller} is not the {role}")]
    Unauthorized { caller: Identifier, role: Role },

    #[error("operation not permitted while {current}")]
    WrongPauseState { current: PauseState },

    #[error("no-op transition rejected: {0}")]
    NoOpState(&'static str),

    // --- Minting ---
    #[error("minting is finished")]
    MintingFinished,

    // --- Admin quorum ---
    #[error("already an admin: {0}")]
    AlreadyAdmin(Identifier),

    #[error("not an admin: {0}")]
    NotAdmin(Identifier),

    #[error("admin capacity exceeded: at most {max} admins")]
    CapacityExceeded { max: usize },

    #[error("cannot remove the last admin: {0}")]
    LastAdmin(Identifier),

    // --- Whitelist role ---
    #[error("already whitelisted: {0}")]
    AlreadyMember(Identifier),

    #[error("not whitelisted: {0}")]
    NotMember(Identifier),

    // --- Arguments ---
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // --- Ownership handoff ---
    #[error("no pending ownership handoff")]
    NoPendingOwner,

    // --- Bookkeeping ---
    #[error("insufficient balance: {account} holds {balance}, needs {required}")]
    InsufficientBalance {
        account: Identifier,
        balance: Amount,
        required: Amount,
    },

    #[error("insufficient allowance: {spender} may spend {allowance} of {owner}, needs {required}")]
    InsufficientAllowance {
        owner: Identifier,
        spender: Identifier,
        allowance: Amount,
        required: Amount,
    },

    #[error("arithmetic overflow")]
    Overflow,

    // --- Satellites and resources ---
    #[error("{0} satellite is not configured")]
    SatelliteUnset(&'static str),

    #[error("no resource registered under {0}")]
    UnknownResource(Identifier),

    #[error("resource {id} is not a {expected}")]
    WrongResourceKind {
        id: Identifier,
        expected: &'static str,
    },
}

impl WardenError {
    pub fn unauthorized(caller: Identifier, role: Role) -> Self {
        WardenError::Unauthorized { caller, role }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        WardenError::InvalidArgument(message.into())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, WardenError::Unauthorized { .. })
    }
}

pub type WardenResult<T> = Result<T, WardenError>;
