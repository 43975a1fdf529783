use std::path::Path;

use crate::commands::common::{format_account_lines, open_session};
use crate::error::CliError;

pub async fn run_list(as_json: bool, registry_path: &Path, config_path: &Path) -> Result<(), CliError> {
    let session = open_session(registry_path, config_path).await?;
    let items = session.list_items().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        if items.iter().all(|item| item.account().is_none()) {
            println!("No accounts registered");
        }
        for line in format_account_lines(&items) {
            println!("{line}");
        }
    }

    Ok(())
}
