use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::manage::SessionAction;

#[derive(Parser)]
#[command(name = "cloudacct")]
#[command(about = "Manage cloud-storage accounts from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the account registry file
    #[arg(long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Optional path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered accounts
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an account and make it current
    Add {
        /// User name on the server
        #[arg(long, value_name = "USER")]
        user: String,
        /// Server base URL
        #[arg(long, value_name = "URL")]
        server: String,
    },
    /// Remove an account
    #[command(alias = "rm")]
    Remove {
        /// Account name
        name: String,
        /// Skip the confirmation step
        #[arg(long, short)]
        yes: bool,
    },
    /// Make an account current
    Switch {
        /// Account name
        name: String,
    },
    /// Request an immediate sync of an account
    Sync {
        /// Account name
        name: String,
    },
    /// Request a credentials update for an account
    Credentials {
        /// Account name
        name: String,
    },
    /// Run several actions in one session and report what changed
    Manage {
        /// Action as kind:argument, e.g. remove:alice@cloud.example.com
        #[arg(long = "action", short, value_name = "ACTION")]
        actions: Vec<SessionAction>,
    },
    /// Show or update configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update the config file
    Init {
        /// Account type accounts are registered under
        #[arg(long, value_name = "TYPE")]
        account_type: Option<String>,
        /// Content authority used for sync requests
        #[arg(long, value_name = "AUTHORITY")]
        sync_authority: Option<String>,
        /// Account that camera uploads are attached to
        #[arg(long, value_name = "NAME")]
        camera_uploads_account: Option<String>,
        /// Hide the "add account" row in account lists
        #[arg(long)]
        single_account: bool,
    },
    /// Print the effective configuration
    Show,
}
