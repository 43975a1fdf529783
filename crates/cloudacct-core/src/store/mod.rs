//! Account store abstraction.
//!
//! The account store is owned by the platform: it enumerates registered
//! accounts, remembers which one is current and runs the add/remove flows.
//! Every operation completes exactly once with success, failure or
//! cancellation.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AccountName, AccountType, NewAccount};
use crate::reconcile::LiveAccountState;

pub use memory::MemoryAccountStore;

#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account operation canceled")]
    Canceled,
    #[error("Account operation failed: {0}")]
    Failed(String),
}

impl AccountStoreError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

pub type AccountStoreResult<T> = Result<T, AccountStoreError>;

/// Platform account subsystem as seen by the manage-accounts session
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Accounts of `account_type` in the store's natural enumeration order
    async fn list_accounts(&self, account_type: &AccountType)
        -> AccountStoreResult<Vec<AccountName>>;

    /// The current account, if one is set and still registered
    async fn current_account(&self) -> AccountStoreResult<Option<AccountName>>;

    /// Make `name` the current account
    async fn set_current_account(&self, name: &AccountName) -> AccountStoreResult<()>;

    /// Run the add-account flow and register the resulting account
    async fn add_account(
        &self,
        account_type: &AccountType,
        account: &NewAccount,
    ) -> AccountStoreResult<AccountName>;

    /// Remove `name`; `Ok(false)` when the store declined the removal
    async fn remove_account(&self, name: &AccountName) -> AccountStoreResult<bool>;

    /// Query the live account set and current account together
    async fn live_state(&self, account_type: &AccountType) -> AccountStoreResult<LiveAccountState> {
        let accounts = self.list_accounts(account_type).await?;
        let current = self
            .current_account()
            .await?
            .filter(|current| accounts.contains(current));
        Ok(LiveAccountState::new(accounts, current))
    }
}
