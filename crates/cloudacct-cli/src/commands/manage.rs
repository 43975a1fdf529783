use std::path::Path;
use std::str::FromStr;

use cloudacct_core::reconcile::ManageAccountsResult;
use cloudacct_core::session::RemovalOutcome;
use cloudacct_core::{AccountName, NewAccount};

use crate::commands::common::{
    describe_removal, describe_switch, finish_session, open_session, parse_account_name,
    CliSession,
};
use crate::error::CliError;

/// One step of a scripted manage session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Add { user: String, server: String },
    Remove(AccountName),
    Switch(AccountName),
    Sync(AccountName),
    Credentials(AccountName),
}

impl FromStr for SessionAction {
    type Err = CliError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidAction(raw.to_string());
        let (kind, argument) = raw.trim().split_once(':').ok_or_else(invalid)?;
        let argument = argument.trim();

        match kind.trim().to_ascii_lowercase().as_str() {
            "add" => {
                let (user, server) = argument.split_once(',').ok_or_else(invalid)?;
                Ok(Self::Add {
                    user: user.trim().to_string(),
                    server: server.trim().to_string(),
                })
            }
            "remove" | "rm" => Ok(Self::Remove(parse_account_name(argument)?)),
            "switch" => Ok(Self::Switch(parse_account_name(argument)?)),
            "sync" => Ok(Self::Sync(parse_account_name(argument)?)),
            "credentials" => Ok(Self::Credentials(parse_account_name(argument)?)),
            _ => Err(invalid()),
        }
    }
}

/// Run `actions` in one session. Failing actions are reported and skipped.
pub async fn run_manage(
    actions: &[SessionAction],
    registry_path: &Path,
    config_path: &Path,
) -> Result<ManageAccountsResult, CliError> {
    let session = open_session(registry_path, config_path).await?;

    for action in actions {
        match apply_action(&session, action).await {
            Ok(message) => println!("{message}"),
            Err(error) => {
                tracing::warn!("Session action {:?} failed: {}", action, error);
                eprintln!("Skipped {action:?}: {error}");
            }
        }
    }

    finish_session(session).await
}

async fn apply_action(session: &CliSession, action: &SessionAction) -> Result<String, CliError> {
    match action {
        SessionAction::Add { user, server } => {
            let name = session
                .create_account(&NewAccount::new(user.as_str(), server.as_str()))
                .await?;
            Ok(format!("Added {name}"))
        }
        SessionAction::Remove(name) => {
            let outcome = session.remove_account(name).await?;
            if outcome == RemovalOutcome::AccountCreationRequired {
                tracing::info!("Last account removed during manage session");
            }
            Ok(describe_removal(name, &outcome))
        }
        SessionAction::Switch(name) => {
            let outcome = session.switch_account(name).await?;
            Ok(describe_switch(&outcome))
        }
        SessionAction::Sync(name) => {
            let request = session.refresh_account(name, session.store()).await?;
            Ok(format!("Synchronizing account {}", request.account))
        }
        SessionAction::Credentials(name) => {
            let request = session.credentials_update(name).await?;
            Ok(format!(
                "Credentials update requested for {}",
                request.account
            ))
        }
    }
}
