//! `wardenctl deploy` - create resources

use clap::Subcommand;
use serde_json::json;
use warden_host::Host;
use warden_ledger::LedgerMetadata;
use warden_types::Identifier;

use crate::args::parse_identifier;

/// Resource kinds that can be deployed
#[derive(Subcommand, Debug, Clone)]
pub enum DeployCommands {
    /// Deploy an empty store
    Store,

    /// Deploy a ledger (metadata defaults come from configuration)
    Ledger {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        decimals: Option<u8>,
    },

    /// Deploy a controller; the deployer becomes its founding admin
    Controller {
        /// Ledger to govern
        #[arg(long, value_parser = parse_identifier, default_value = "none")]
        ledger: Identifier,
        /// Store to govern
        #[arg(long, value_parser = parse_identifier, default_value = "none")]
        store: Identifier,
    },

    /// Deploy a whitelist role registry
    Whitelist,
}

pub fn execute(
    command: DeployCommands,
    host: &mut Host,
    caller: Identifier,
) -> anyhow::Result<String> {
    let (kind, id) = match command {
        DeployCommands::Store => ("store", host.deploy_store(caller)?),
        DeployCommands::Ledger {
            name,
            symbol,
            decimals,
        } => {
            let defaults = host.ledger_defaults().clone();
            let metadata = LedgerMetadata {
                name: name.unwrap_or(defaults.name),
                symbol: symbol.unwrap_or(defaults.symbol),
                decimals: decimals.unwrap_or(defaults.decimals),
            };
            ("ledger", host.deploy_ledger_with(caller, metadata)?)
        }
        DeployCommands::Controller { ledger, store } => {
            ("controller", host.deploy_controller(caller, ledger, store)?)
        }
        DeployCommands::Whitelist => ("whitelist", host.deploy_whitelist(caller)?),
    };

    Ok(serde_json::to_string_pretty(&json!({
        "kind": kind,
        "id": id,
        "owner": caller,
    }))?)
}
