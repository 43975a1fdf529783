//! In-memory account store

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{AccountStore, AccountStoreError, AccountStoreResult};
use crate::models::{AccountName, AccountType, NewAccount};

#[derive(Debug, Default)]
struct MemoryState {
    accounts: Vec<(AccountType, AccountName)>,
    current: Option<AccountName>,
    scripted_errors: VecDeque<AccountStoreError>,
    declined_removals: usize,
}

impl MemoryState {
    fn contains(&self, name: &AccountName) -> bool {
        self.accounts.iter().any(|(_, registered)| registered == name)
    }

    fn take_scripted_error(&mut self) -> AccountStoreResult<()> {
        self.scripted_errors.pop_front().map_or(Ok(()), Err)
    }
}

/// Thread-safe account store kept in memory, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `accounts` of `account_type`, with `current` set.
    #[must_use]
    pub fn with_accounts(
        account_type: &AccountType,
        accounts: impl IntoIterator<Item = AccountName>,
        current: Option<AccountName>,
    ) -> Self {
        let state = MemoryState {
            accounts: accounts
                .into_iter()
                .map(|name| (account_type.clone(), name))
                .collect(),
            current,
            scripted_errors: VecDeque::new(),
            declined_removals: 0,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Make the next mutating operation (add, remove, set current) fail with `error`.
    pub async fn fail_next(&self, error: AccountStoreError) {
        self.state.lock().await.scripted_errors.push_back(error);
    }

    /// Make the next removal report `false` and leave the account in place.
    pub async fn decline_next_removal(&self) {
        self.state.lock().await.declined_removals += 1;
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn list_accounts(
        &self,
        account_type: &AccountType,
    ) -> AccountStoreResult<Vec<AccountName>> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .iter()
            .filter(|(registered_type, _)| registered_type == account_type)
            .map(|(_, name)| name.clone())
            .collect())
    }

    async fn current_account(&self) -> AccountStoreResult<Option<AccountName>> {
        let state = self.state.lock().await;
        Ok(state
            .current
            .as_ref()
            .filter(|current| state.contains(current))
            .cloned())
    }

    async fn set_current_account(&self, name: &AccountName) -> AccountStoreResult<()> {
        let mut state = self.state.lock().await;
        state.take_scripted_error()?;
        if !state.contains(name) {
            return Err(AccountStoreError::failed(format!(
                "account '{name}' is not registered"
            )));
        }
        state.current = Some(name.clone());
        Ok(())
    }

    async fn add_account(
        &self,
        account_type: &AccountType,
        account: &NewAccount,
    ) -> AccountStoreResult<AccountName> {
        let mut state = self.state.lock().await;
        state.take_scripted_error()?;
        let name = account
            .account_name()
            .map_err(|error| AccountStoreError::failed(error.to_string()))?;
        if state.contains(&name) {
            return Err(AccountStoreError::failed(format!(
                "account '{name}' already exists"
            )));
        }
        state.accounts.push((account_type.clone(), name.clone()));
        Ok(name)
    }

    async fn remove_account(&self, name: &AccountName) -> AccountStoreResult<bool> {
        let mut state = self.state.lock().await;
        state.take_scripted_error()?;
        if state.declined_removals > 0 {
            state.declined_removals -= 1;
            return Ok(false);
        }
        let before = state.accounts.len();
        state.accounts.retain(|(_, registered)| registered != name);
        let removed = state.accounts.len() != before;
        if removed && state.current.as_ref() == Some(name) {
            state.current = None;
        }
        Ok(removed)
    }
}
