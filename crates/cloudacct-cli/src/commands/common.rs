use std::path::Path;

use cloudacct_core::models::AccountListItem;
use cloudacct_core::reconcile::ManageAccountsResult;
use cloudacct_core::session::{RemovalOutcome, SwitchOutcome};
use cloudacct_core::{AccountName, ManageAccountsSession};

use crate::config::load_config;
use crate::error::CliError;
use crate::registry::JsonAccountStore;

pub type CliSession = ManageAccountsSession<JsonAccountStore>;

pub async fn open_session(registry_path: &Path, config_path: &Path) -> Result<CliSession, CliError> {
    let config = load_config(config_path).map_err(CliError::Config)?;
    let store = JsonAccountStore::open(registry_path)?;
    Ok(ManageAccountsSession::open(store, config).await?)
}

pub fn parse_account_name(raw: &str) -> Result<AccountName, CliError> {
    if raw.trim().is_empty() {
        return Err(CliError::EmptyAccountName);
    }
    Ok(AccountName::new(raw)?)
}

pub fn format_account_lines(items: &[AccountListItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            AccountListItem::Account { name, is_current } => {
                let marker = if *is_current { "*" } else { " " };
                format!("{marker} {name}")
            }
            AccountListItem::AddAccount => "+ add account".to_string(),
        })
        .collect()
}

pub fn describe_switch(outcome: &SwitchOutcome) -> String {
    match outcome {
        SwitchOutcome::AlreadyCurrent => "Account is already current".to_string(),
        SwitchOutcome::Switched(name) => format!("Switched to {name}"),
    }
}

pub fn describe_removal(name: &AccountName, outcome: &RemovalOutcome) -> String {
    match outcome {
        RemovalOutcome::Removed => format!("Removed {name}"),
        RemovalOutcome::FallbackSelected(fallback) => {
            format!("Removed {name}; current account is now {fallback}")
        }
        RemovalOutcome::AccountCreationRequired => format!(
            "Removed {name}; no accounts left. Run `cloudacct add --user <user> --server <url>`."
        ),
        RemovalOutcome::Declined => format!("Account store declined removing {name}"),
    }
}

pub fn print_result(result: &ManageAccountsResult) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Close `session` and print the change report.
pub async fn finish_session(session: CliSession) -> Result<ManageAccountsResult, CliError> {
    let result = session.finish().await?;
    print_result(&result)?;
    Ok(result)
}
