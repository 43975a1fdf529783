//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use cloudacct_core::util::normalize_text_option;
use cloudacct_core::AccountsConfig;

const CONFIG_FILE_NAME: &str = "config.json";
const REGISTRY_FILE_NAME: &str = "accounts.json";

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| panic!("Failed to resolve CLI config directory"))
        .join("cloudacct")
        .join(CONFIG_FILE_NAME)
}

pub fn default_registry_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| panic!("Failed to resolve CLI data directory"))
        .join("cloudacct")
        .join(REGISTRY_FILE_NAME)
}

pub fn resolve_config_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path
        .or_else(|| env_path("CLOUDACCT_CONFIG"))
        .unwrap_or_else(default_config_path)
}

pub fn resolve_registry_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path
        .or_else(|| env_path("CLOUDACCT_REGISTRY"))
        .unwrap_or_else(default_registry_path)
}

fn env_path(key: &str) -> Option<PathBuf> {
    normalize_text_option(std::env::var(key).ok()).map(PathBuf::from)
}

pub fn load_config(path: &Path) -> Result<AccountsConfig, String> {
    if !path.exists() {
        return Ok(AccountsConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
    AccountsConfig::from_json(&raw)
        .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))
}

pub fn save_config(config: &AccountsConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create config directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }

    let mut normalized = config.clone();
    normalized.normalize();
    let serialized = serde_json::to_string_pretty(&normalized)
        .map_err(|error| format!("Failed to serialize config: {error}"))?;
    std::fs::write(path, serialized)
        .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, AccountsConfig::default());
    }

    #[test]
    fn config_roundtrip_normalizes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = AccountsConfig {
            account_type: " nextcloud ".to_string(),
            multi_account_support: false,
            sync_authority: " org.example.files ".to_string(),
            camera_uploads_account: Some(" alice@cloud ".to_string()),
        };

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(
            loaded,
            AccountsConfig {
                account_type: "nextcloud".to_string(),
                multi_account_support: false,
                sync_authority: "org.example.files".to_string(),
                camera_uploads_account: Some("alice@cloud".to_string()),
            }
        );
    }

    #[test]
    fn explicit_paths_win() {
        let explicit = PathBuf::from("/tmp/cloudacct-explicit.json");
        assert_eq!(resolve_config_path(Some(explicit.clone())), explicit);
        assert_eq!(resolve_registry_path(Some(explicit.clone())), explicit);
    }

    #[test]
    fn environment_paths_apply_without_flags() {
        std::env::set_var("CLOUDACCT_CONFIG", " /tmp/cloudacct-env-config.json ");
        std::env::set_var("CLOUDACCT_REGISTRY", "/tmp/cloudacct-env-accounts.json");

        let config = resolve_config_path(None);
        let registry = resolve_registry_path(None);
        let flagged = resolve_registry_path(Some(PathBuf::from("/tmp/flag.json")));

        std::env::remove_var("CLOUDACCT_CONFIG");
        std::env::remove_var("CLOUDACCT_REGISTRY");

        assert_eq!(config, PathBuf::from("/tmp/cloudacct-env-config.json"));
        assert_eq!(registry, PathBuf::from("/tmp/cloudacct-env-accounts.json"));
        assert_eq!(flagged, PathBuf::from("/tmp/flag.json"));
    }
}
