use std::path::Path;

use cloudacct_core::NewAccount;

use crate::commands::common::{
    describe_removal, describe_switch, finish_session, open_session, parse_account_name,
};
use crate::error::CliError;

pub async fn run_add(
    user: &str,
    server: &str,
    registry_path: &Path,
    config_path: &Path,
) -> Result<(), CliError> {
    let session = open_session(registry_path, config_path).await?;
    let name = session
        .create_account(&NewAccount::new(user, server))
        .await?;
    println!("Added {name}");
    finish_session(session).await?;
    Ok(())
}

pub async fn run_remove(
    raw_name: &str,
    confirmed: bool,
    registry_path: &Path,
    config_path: &Path,
) -> Result<(), CliError> {
    let name = parse_account_name(raw_name)?;
    let session = open_session(registry_path, config_path).await?;
    let confirmation = session.prepare_removal(&name).await?;

    if !confirmed {
        println!("About to remove {}.", confirmation.account);
        if confirmation.has_camera_uploads_attached {
            println!("Camera uploads are attached to this account and will stop.");
        }
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }

    let outcome = session.remove_account(&name).await?;
    println!("{}", describe_removal(&name, &outcome));
    finish_session(session).await?;
    Ok(())
}

pub async fn run_switch(
    raw_name: &str,
    registry_path: &Path,
    config_path: &Path,
) -> Result<(), CliError> {
    let name = parse_account_name(raw_name)?;
    let session = open_session(registry_path, config_path).await?;
    let outcome = session.switch_account(&name).await?;
    println!("{}", describe_switch(&outcome));
    finish_session(session).await?;
    Ok(())
}

pub async fn run_sync(
    raw_name: &str,
    registry_path: &Path,
    config_path: &Path,
) -> Result<(), CliError> {
    let name = parse_account_name(raw_name)?;
    let session = open_session(registry_path, config_path).await?;
    let request = session.refresh_account(&name, session.store()).await?;
    println!("Synchronizing account {}", request.account);
    println!("{}", serde_json::to_string_pretty(&request)?);
    finish_session(session).await?;
    Ok(())
}

pub async fn run_credentials(
    raw_name: &str,
    registry_path: &Path,
    config_path: &Path,
) -> Result<(), CliError> {
    let name = parse_account_name(raw_name)?;
    let session = open_session(registry_path, config_path).await?;
    let request = session.credentials_update(&name).await?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    finish_session(session).await?;
    Ok(())
}
