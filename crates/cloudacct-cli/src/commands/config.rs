use std::path::Path;

use cloudacct_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config::{load_config, save_config};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, config_path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            account_type,
            sync_authority,
            camera_uploads_account,
            single_account,
        } => run_config_init(
            account_type,
            sync_authority,
            camera_uploads_account,
            single_account,
            config_path,
        ),
        ConfigCommands::Show => {
            let config = load_config(config_path).map_err(CliError::Config)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run_config_init(
    account_type: Option<String>,
    sync_authority: Option<String>,
    camera_uploads_account: Option<String>,
    single_account: bool,
    config_path: &Path,
) -> Result<(), CliError> {
    let mut config = load_config(config_path).map_err(CliError::Config)?;

    if let Some(value) = normalize_text_option(account_type) {
        config.account_type = value;
    }
    if let Some(value) = normalize_text_option(sync_authority) {
        config.sync_authority = value;
    }
    if let Some(value) = normalize_text_option(camera_uploads_account) {
        config.camera_uploads_account = Some(value);
    }
    if single_account {
        config.multi_account_support = false;
    }

    save_config(&config, config_path).map_err(CliError::Config)?;
    println!("Configuration written to {}", config_path.display());
    Ok(())
}
