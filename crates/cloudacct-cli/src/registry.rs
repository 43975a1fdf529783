//! JSON-file account registry standing in for the platform account subsystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use cloudacct_core::store::AccountStoreResult;
use cloudacct_core::sync::{SyncRequest, SyncScheduler};
use cloudacct_core::{AccountName, AccountStore, AccountStoreError, AccountType, NewAccount};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::CliError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryFile {
    #[serde(default = "default_registry_version")]
    pub version: u32,
    #[serde(default)]
    pub current_account: Option<AccountName>,
    #[serde(default)]
    pub accounts: Vec<RegisteredAccount>,
    #[serde(default)]
    pub pending_syncs: Vec<SyncRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredAccount {
    pub name: AccountName,
    pub account_type: AccountType,
    pub server_url: String,
    /// Registration timestamp (Unix ms)
    pub added_at: i64,
}

const fn default_registry_version() -> u32 {
    1
}

impl RegistryFile {
    fn contains(&self, name: &AccountName) -> bool {
        self.accounts.iter().any(|account| &account.name == name)
    }
}

/// Account store persisted as a JSON file; every mutation is written through.
#[derive(Debug, Clone)]
pub struct JsonAccountStore {
    path: PathBuf,
    state: Arc<Mutex<RegistryFile>>,
}

impl JsonAccountStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CliError> {
        let path = path.into();
        let registry = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str::<RegistryFile>(&raw).map_err(|error| {
                CliError::Registry(format!(
                    "Failed to parse registry at {}: {}",
                    path.display(),
                    error
                ))
            })?
        } else {
            RegistryFile {
                version: default_registry_version(),
                ..RegistryFile::default()
            }
        };

        Ok(Self {
            path,
            state: Arc::new(Mutex::new(registry)),
        })
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> RegistryFile {
        self.state.lock().await.clone()
    }

    /// Apply `change` to a copy of the registry, persist it, then commit.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut RegistryFile) -> AccountStoreResult<T> + Send,
    ) -> AccountStoreResult<T> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let value = change(&mut next)?;
        write_registry(&self.path, &next)
            .map_err(|error| AccountStoreError::failed(error.to_string()))?;
        *state = next;
        Ok(value)
    }
}

fn write_registry(path: &Path, registry: &RegistryFile) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(registry)?;
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, serialized)?;
    std::fs::rename(&temp_path, path)?;
    Ok(())
}

#[async_trait]
impl AccountStore for JsonAccountStore {
    async fn list_accounts(
        &self,
        account_type: &AccountType,
    ) -> AccountStoreResult<Vec<AccountName>> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .iter()
            .filter(|account| &account.account_type == account_type)
            .map(|account| account.name.clone())
            .collect())
    }

    async fn current_account(&self) -> AccountStoreResult<Option<AccountName>> {
        let state = self.state.lock().await;
        Ok(state
            .current_account
            .as_ref()
            .filter(|current| state.contains(current))
            .cloned())
    }

    async fn set_current_account(&self, name: &AccountName) -> AccountStoreResult<()> {
        self.mutate(|registry| {
            if !registry.contains(name) {
                return Err(AccountStoreError::failed(format!(
                    "account '{name}' is not registered"
                )));
            }
            registry.current_account = Some(name.clone());
            Ok(())
        })
        .await
    }

    async fn add_account(
        &self,
        account_type: &AccountType,
        account: &NewAccount,
    ) -> AccountStoreResult<AccountName> {
        let name = account
            .account_name()
            .map_err(|error| AccountStoreError::failed(error.to_string()))?;
        let server_url = account.server_url.trim().trim_end_matches('/').to_string();

        self.mutate(|registry| {
            if registry.contains(&name) {
                return Err(AccountStoreError::failed(format!(
                    "account '{name}' already exists"
                )));
            }
            registry.accounts.push(RegisteredAccount {
                name: name.clone(),
                account_type: account_type.clone(),
                server_url,
                added_at: Utc::now().timestamp_millis(),
            });
            Ok(name.clone())
        })
        .await
    }

    async fn remove_account(&self, name: &AccountName) -> AccountStoreResult<bool> {
        self.mutate(|registry| {
            let before = registry.accounts.len();
            registry.accounts.retain(|account| &account.name != name);
            let removed = registry.accounts.len() != before;
            if removed {
                registry.pending_syncs.retain(|request| &request.account != name);
                if registry.current_account.as_ref() == Some(name) {
                    registry.current_account = None;
                }
            }
            Ok(removed)
        })
        .await
    }
}

#[async_trait]
impl SyncScheduler for JsonAccountStore {
    async fn request_sync(&self, request: SyncRequest) -> cloudacct_core::Result<()> {
        self.mutate(|registry| {
            registry.pending_syncs.push(request);
            Ok(())
        })
        .await
        .map_err(|error| cloudacct_core::Error::Sync(error.to_string()))
    }
}
