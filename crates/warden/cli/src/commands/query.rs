//! `wardenctl query` - read-only views

use clap::Subcommand;
use serde_json::json;
use warden_controller::Controller;
use warden_governance::MAX_ADMINS;
use warden_host::Host;
use warden_store::{SlotKey, SlotValue};
use warden_types::Identifier;

use crate::args::parse_identifier;

/// Read-only queries
#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommands {
    /// Balance of an account on a ledger
    Balance {
        #[arg(value_parser = parse_identifier)]
        ledger: Identifier,
        #[arg(value_parser = parse_identifier)]
        account: Identifier,
    },

    /// Allowance granted by `owner` to `spender`
    Allowance {
        #[arg(value_parser = parse_identifier)]
        ledger: Identifier,
        #[arg(value_parser = parse_identifier)]
        owner: Identifier,
        #[arg(value_parser = parse_identifier)]
        spender: Identifier,
    },

    /// Total supply of a ledger
    TotalSupply {
        #[arg(value_parser = parse_identifier)]
        ledger: Identifier,
    },

    /// Ledger metadata and owning controller
    Ledger {
        #[arg(value_parser = parse_identifier)]
        id: Identifier,
    },

    /// Ledger event log
    Events {
        #[arg(value_parser = parse_identifier)]
        ledger: Identifier,
    },

    /// Controller accessors
    Controller {
        #[arg(value_parser = parse_identifier)]
        id: Identifier,
    },

    /// Current owner of a controller, ledger or store
    Owner {
        #[arg(value_parser = parse_identifier)]
        id: Identifier,
    },

    /// Read a store slot (only the store's owner may read)
    Slot {
        #[arg(value_parser = parse_identifier)]
        store: Identifier,
        key: String,
        /// Reading identity
        #[arg(long = "as", value_parser = parse_identifier)]
        caller: Identifier,
    },

    /// Whitelist membership
    Whitelisted {
        #[arg(value_parser = parse_identifier)]
        whitelist: Identifier,
        #[arg(value_parser = parse_identifier)]
        account: Identifier,
    },

    /// Every deployed resource
    Resources,
}

/// Run a query and render the result as pretty JSON.
///
/// Amounts are rendered as decimal strings; `u128` does not fit a JSON value.
pub fn execute(command: QueryCommands, host: &Host) -> anyhow::Result<String> {
    let value = match command {
        QueryCommands::Balance { ledger, account } => json!({
            "account": account,
            "balance": host.balance_of(ledger, account)?.to_string(),
        }),
        QueryCommands::Allowance {
            ledger,
            owner,
            spender,
        } => json!({
            "owner": owner,
            "spender": spender,
            "allowance": host.allowance(ledger, owner, spender)?.to_string(),
        }),
        QueryCommands::TotalSupply { ledger } => json!({
            "total_supply": host.total_supply(ledger)?.to_string(),
        }),
        QueryCommands::Ledger { id } => {
            let ledger = host.ledger(id)?;
            json!({
                "id": id,
                "name": ledger.name(),
                "symbol": ledger.symbol(),
                "decimals": ledger.decimals(),
                "owner": host.owner_of(id)?,
                "events": ledger.events().len(),
            })
        }
        QueryCommands::Events { ledger } => {
            // Serialized directly so large amounts survive.
            return Ok(serde_json::to_string_pretty(host.events(ledger)?)?);
        }
        QueryCommands::Controller { id } => controller_view(host.controller(id)?, host.owner_of(id)?),
        QueryCommands::Owner { id } => json!({
            "id": id,
            "kind": host.kind_of(id).map(|k| k.as_str()),
            "owner": host.owner_of(id)?,
        }),
        QueryCommands::Slot { store, key, caller } => {
            let key = SlotKey::new(key);
            let value = match host.get_state(caller, store, &key)? {
                None => serde_json::Value::Null,
                Some(SlotValue::Bool(v)) => json!({ "bool": v }),
                Some(SlotValue::Int(v)) => json!({ "int": v.to_string() }),
            };
            json!({
                "key": key.as_str(),
                "value": value,
            })
        }
        QueryCommands::Whitelisted { whitelist, account } => {
            let registry = host.whitelist(whitelist)?;
            json!({
                "account": account,
                "whitelisted": registry.is_whitelisted(account),
                "whitelist_admin": registry.is_whitelist_admin(account),
            })
        }
        QueryCommands::Resources => {
            let resources: Vec<_> = host
                .resources()
                .into_iter()
                .map(|(id, kind)| json!({ "id": id, "kind": kind }))
                .collect();
            json!(resources)
        }
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn controller_view(controller: &Controller, owner: Identifier) -> serde_json::Value {
    let admins: Vec<Identifier> = controller.admins().admins().collect();
    json!({
        "id": controller.id(),
        "owner": owner,
        "ledger": controller.ledger_id(),
        "store": controller.store_id(),
        "paused": controller.paused(),
        "minting_finished": controller.minting_finished(),
        "admins": admins,
        "max_admins": MAX_ADMINS,
    })
}
