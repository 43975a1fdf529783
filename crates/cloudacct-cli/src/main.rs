//! cloudacct CLI - manage cloud-storage accounts from the terminal
//!
//! Each invocation opens one manage-accounts session over the local account
//! registry and reports what changed when it closes.

mod cli;
mod commands;
mod config;
mod error;
mod registry;


use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::account::{run_add, run_credentials, run_remove, run_switch, run_sync};
use crate::commands::config::run_config;
use crate::commands::list::run_list;
use crate::commands::manage::run_manage;
use crate::config::{resolve_config_path, resolve_registry_path};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cloudacct=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry_path = resolve_registry_path(cli.registry);
    let config_path = resolve_config_path(cli.config);

    match cli.command {
        Some(Commands::List { json }) => run_list(json, &registry_path, &config_path).await?,
        Some(Commands::Add { user, server }) => {
            run_add(&user, &server, &registry_path, &config_path).await?;
        }
        Some(Commands::Remove { name, yes }) => {
            run_remove(&name, yes, &registry_path, &config_path).await?;
        }
        Some(Commands::Switch { name }) => run_switch(&name, &registry_path, &config_path).await?,
        Some(Commands::Sync { name }) => run_sync(&name, &registry_path, &config_path).await?,
        Some(Commands::Credentials { name }) => {
            run_credentials(&name, &registry_path, &config_path).await?;
        }
        Some(Commands::Manage { actions }) => {
            run_manage(&actions, &registry_path, &config_path).await?;
        }
        Some(Commands::Config { command }) => run_config(command, &config_path)?,
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
