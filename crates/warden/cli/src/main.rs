//! wardenctl - operate Warden resources from the terminal
//!
//! Every invocation loads the host state file, runs one command and, for
//! mutating commands, writes the state back. A rejected call leaves the
//! file untouched.
//!
//! Identities may be given as a UUID, `none`, or `@label`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warden_host::{Call, Host, WardenConfig};
use warden_types::Identifier;

mod args;
mod commands;

use args::parse_identifier;
use commands::{call::CallCommands, deploy::DeployCommands, query::QueryCommands};

/// Warden CLI
#[derive(Parser)]
#[command(name = "wardenctl")]
#[command(about = "Warden - access-control and live-migration hub", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "WARDEN_CONFIG")]
    config: Option<String>,

    /// Host state file (overrides configuration)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Log level (overrides configuration)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an identifier
    Identity {
        /// Label to derive the identifier from
        #[arg(required_unless_present = "random")]
        label: Option<String>,
        /// Generate a fresh random identifier instead
        #[arg(long, conflicts_with = "label")]
        random: bool,
    },

    /// Deploy a resource
    Deploy {
        /// Deploying identity (becomes the owner)
        #[arg(long = "as", value_parser = parse_identifier)]
        caller: Identifier,
        #[command(subcommand)]
        command: DeployCommands,
    },

    /// Send an operation to a resource
    Call {
        /// Calling identity
        #[arg(long = "as", value_parser = parse_identifier)]
        caller: Identifier,
        /// Target resource
        #[arg(value_parser = parse_identifier)]
        target: Identifier,
        #[command(subcommand)]
        command: CallCommands,
    },

    /// Read-only queries
    Query {
        #[command(subcommand)]
        command: QueryCommands,
    },

    /// Print the full host snapshot
    Show,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = WardenConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(state) = cli.state {
        config.state.path = state;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let path = config.state.path.clone();
    let load = || {
        Host::load_or_new(&path, config.ledger.clone())
            .with_context(|| format!("loading host state from {}", path.display()))
    };

    match cli.command {
        Commands::Identity { label, random } => {
            let id = match label {
                Some(label) if !random => Identifier::derive(&label),
                _ => Identifier::generate(),
            };
            println!("{id}");
        }
        Commands::Deploy { caller, command } => {
            let mut host = load()?;
            let output = commands::deploy::execute(command, &mut host, caller)?;
            host.save(&path)?;
            println!("{output}");
        }
        Commands::Call {
            caller,
            target,
            command,
        } => {
            let mut host = load()?;
            let call = Call::from(command);
            info!(caller = %caller, target = %target, call = call.name(), "Submitting call");
            let outcome = host
                .execute(caller, target, call)
                .with_context(|| format!("call rejected by {target}"))?;
            host.save(&path)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Query { command } => {
            let host = load()?;
            println!("{}", commands::query::execute(command, &host)?);
        }
        Commands::Show => {
            let host = load()?;
            println!("{}", serde_json::to_string_pretty(&host.snapshot())?);
        }
    }

    Ok(())
}
