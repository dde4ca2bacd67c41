//! `wardenctl call` - send one operation to a deployed resource

use clap::Subcommand;
use warden_host::Call;
use warden_ledger::LedgerOp;
use warden_store::{SlotKey, SlotValue};
use warden_types::{Amount, Identifier};

use crate::args::parse_identifier;

/// Operations accepted by `call`
#[derive(Subcommand, Debug, Clone)]
pub enum CallCommands {
    // Controller
    /// Add an admin to the quorum
    AddAdmin {
        #[arg(value_parser = parse_identifier)]
        id: Identifier,
    },
    /// Remove an admin from the quorum
    RemoveAdmin {
        #[arg(value_parser = parse_identifier)]
        id: Identifier,
    },
    /// Close the pause gate
    Pause,
    /// Open the pause gate
    Unpause,
    /// Mint new units to an account
    Mint {
        #[arg(value_parser = parse_identifier)]
        to: Identifier,
        amount: Amount,
    },
    /// Stop minting
    FinishMinting,
    /// Reopen minting
    StartMinting,
    /// Repoint the controller at a new ledger and store (paused only)
    SetContracts {
        #[arg(value_parser = parse_identifier)]
        ledger: Identifier,
        #[arg(value_parser = parse_identifier)]
        store: Identifier,
    },
    /// Hand every satellite to a successor controller
    Kill {
        #[arg(value_parser = parse_identifier)]
        successor: Identifier,
    },

    // Ledger
    /// Transfer units to another account
    Transfer {
        #[arg(value_parser = parse_identifier)]
        to: Identifier,
        amount: Amount,
    },
    /// Set a spender's allowance
    Approve {
        #[arg(value_parser = parse_identifier)]
        spender: Identifier,
        amount: Amount,
    },
    /// Spend an allowance
    TransferFrom {
        #[arg(value_parser = parse_identifier)]
        from: Identifier,
        #[arg(value_parser = parse_identifier)]
        to: Identifier,
        amount: Amount,
    },
    /// Raise a spender's allowance
    IncreaseAllowance {
        #[arg(value_parser = parse_identifier)]
        spender: Identifier,
        added: Amount,
    },
    /// Lower a spender's allowance
    DecreaseAllowance {
        #[arg(value_parser = parse_identifier)]
        spender: Identifier,
        subtracted: Amount,
    },
    /// Destroy own units
    Burn { amount: Amount },
    /// Destroy units from an allowance
    BurnFrom {
        #[arg(value_parser = parse_identifier)]
        from: Identifier,
        amount: Amount,
    },

    // Store
    /// Write an integer slot
    SetInt { key: String, value: Amount },
    /// Write a boolean slot
    SetBool {
        key: String,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    // Whitelist
    /// Add a whitelist admin
    AddWhitelistAdmin {
        #[arg(value_parser = parse_identifier)]
        id: Identifier,
    },
    /// Give up the whitelist admin role
    RenounceWhitelistAdmin,
    /// Whitelist one or more accounts (all or none)
    AddWhitelisted {
        #[arg(required = true, value_parser = parse_identifier)]
        ids: Vec<Identifier>,
    },
    /// Remove one or more accounts from the whitelist (all or none)
    RemoveWhitelisted {
        #[arg(required = true, value_parser = parse_identifier)]
        ids: Vec<Identifier>,
    },
    /// Leave the whitelist
    RenounceWhitelisted,

    // Ownership
    /// Hand ownership to a new owner in one step
    TransferOwnership {
        #[arg(value_parser = parse_identifier)]
        new_owner: Identifier,
    },
    /// Propose a new owner (two-phase)
    ProposeOwnership {
        #[arg(value_parser = parse_identifier)]
        candidate: Identifier,
    },
    /// Accept a pending ownership proposal
    AcceptOwnership,
}

impl From<CallCommands> for Call {
    fn from(command: CallCommands) -> Self {
        match command {
            CallCommands::AddAdmin { id } => Call::AddAdmin { id },
            CallCommands::RemoveAdmin { id } => Call::RemoveAdmin { id },
            CallCommands::Pause => Call::Pause,
            CallCommands::Unpause => Call::Unpause,
            CallCommands::Mint { to, amount } => Call::Mint { to, amount },
            CallCommands::FinishMinting => Call::FinishMinting,
            CallCommands::StartMinting => Call::StartMinting,
            CallCommands::SetContracts { ledger, store } => Call::SetContracts { ledger, store },
            CallCommands::Kill { successor } => Call::Kill { successor },
            CallCommands::Transfer { to, amount } => LedgerOp::Transfer { to, amount }.into(),
            CallCommands::Approve { spender, amount } => LedgerOp::Approve { spender, amount }.into(),
            CallCommands::TransferFrom { from, to, amount } => {
                LedgerOp::TransferFrom { from, to, amount }.into()
            }
            CallCommands::IncreaseAllowance { spender, added } => {
                LedgerOp::IncreaseAllowance { spender, added }.into()
            }
            CallCommands::DecreaseAllowance {
                spender,
                subtracted,
            } => LedgerOp::DecreaseAllowance {
                spender,
                subtracted,
            }
            .into(),
            CallCommands::Burn { amount } => LedgerOp::Burn { amount }.into(),
            CallCommands::BurnFrom { from, amount } => LedgerOp::BurnFrom { from, amount }.into(),
            CallCommands::SetInt { key, value } => Call::SetState {
                key: SlotKey::new(key),
                value: SlotValue::Int(value),
            },
            CallCommands::SetBool { key, value } => Call::SetState {
                key: SlotKey::new(key),
                value: SlotValue::Bool(value),
            },
            CallCommands::AddWhitelistAdmin { id } => Call::AddWhitelistAdmin { id },
            CallCommands::RenounceWhitelistAdmin => Call::RenounceWhitelistAdmin,
            CallCommands::AddWhitelisted { ids } => Call::AddWhitelisted { ids },
            CallCommands::RemoveWhitelisted { ids } => Call::RemoveWhitelisted { ids },
            CallCommands::RenounceWhitelisted => Call::RenounceWhitelisted,
            CallCommands::TransferOwnership { new_owner } => Call::TransferOwnership { new_owner },
            CallCommands::ProposeOwnership { candidate } => Call::ProposeOwnership { candidate },
            CallCommands::AcceptOwnership => Call::AcceptOwnership,
        }
    }
}
