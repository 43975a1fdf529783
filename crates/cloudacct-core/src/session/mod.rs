//! Manage-accounts session.
//!
//! One session backs one visit of the account management screen. It owns
//! the snapshot taken when the screen opened, forwards user actions to the
//! account store and reports, when the screen closes, whether the account
//! list or the current account changed in the meantime.

use serde::Serialize;

use crate::config::AccountsConfig;
use crate::error::{Error, Result};
use crate::models::{AccountListItem, AccountName, AccountType, NewAccount};
use crate::reconcile::{
    select_fallback_account, AccountSetSnapshot, LiveAccountState, ManageAccountsResult,
};
use crate::store::{AccountStore, AccountStoreError};
use crate::sync::{SyncRequest, SyncScheduler};

/// Outcome of selecting an account in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The selected account already is the current one; the screen just closes
    AlreadyCurrent,
    /// The selected account became current
    Switched(AccountName),
}

/// State reached after an account removal completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Account removed; the current account is unaffected
    Removed,
    /// The current account was removed and this one took its place
    FallbackSelected(AccountName),
    /// No account is left; the caller has to start account creation
    AccountCreationRequired,
    /// The store refused to remove the account
    Declined,
}

/// Data shown in the removal confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalConfirmation {
    pub account: AccountName,
    pub has_camera_uploads_attached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsAction {
    UpdateToken,
}

/// Navigation payload for the login screen when credentials change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialsUpdateRequest {
    pub account: AccountName,
    pub action: CredentialsAction,
}

pub struct ManageAccountsSession<S: AccountStore> {
    store: S,
    config: AccountsConfig,
    account_type: AccountType,
    snapshot: AccountSetSnapshot,
}

impl<S: AccountStore> ManageAccountsSession<S> {
    /// Open a session, capturing the account set as it is right now.
    pub async fn open(store: S, config: AccountsConfig) -> Result<Self> {
        let account_type = config.account_type();
        let live = store.live_state(&account_type).await?;
        let snapshot = AccountSetSnapshot::capture(&live);
        tracing::debug!(
            "Opened account session with {} account(s), current: {}",
            snapshot.accounts().len(),
            snapshot.current().map_or("none", AccountName::as_str)
        );

        Ok(Self {
            store,
            config,
            account_type,
            snapshot,
        })
    }

    #[must_use]
    pub const fn snapshot(&self) -> &AccountSetSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn config(&self) -> &AccountsConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub async fn live_state(&self) -> Result<LiveAccountState> {
        Ok(self.store.live_state(&self.account_type).await?)
    }

    /// Rows of the account list, followed by the "add account" row when
    /// multi-account support is enabled.
    pub async fn list_items(&self) -> Result<Vec<AccountListItem>> {
        let live = self.live_state().await?;
        let mut items = live
            .accounts()
            .iter()
            .map(|name| AccountListItem::Account {
                name: name.clone(),
                is_current: live.current() == Some(name),
            })
            .collect::<Vec<_>>();

        if self.config.multi_account_support {
            items.push(AccountListItem::AddAccount);
        }

        Ok(items)
    }

    pub async fn switch_account(&self, name: &AccountName) -> Result<SwitchOutcome> {
        let live = self.live_state().await?;
        if !live.contains(name) {
            return Err(Error::NotFound(name.to_string()));
        }
        if live.current() == Some(name) {
            return Ok(SwitchOutcome::AlreadyCurrent);
        }

        self.store.set_current_account(name).await?;
        tracing::info!("Switched current account to {}", name);
        Ok(SwitchOutcome::Switched(name.clone()))
    }

    /// Register a new account and make it current.
    pub async fn create_account(&self, account: &NewAccount) -> Result<AccountName> {
        let name = match self.store.add_account(&self.account_type, account).await {
            Ok(name) => name,
            Err(AccountStoreError::Canceled) => {
                tracing::error!("Account creation canceled");
                return Err(AccountStoreError::Canceled.into());
            }
            Err(error) => {
                tracing::error!("Account creation finished in exception: {}", error);
                return Err(error.into());
            }
        };

        self.store.set_current_account(&name).await?;
        tracing::info!("Added account {} and made it current", name);
        Ok(name)
    }

    pub async fn prepare_removal(&self, name: &AccountName) -> Result<RemovalConfirmation> {
        self.require_registered(name).await?;
        let has_camera_uploads_attached =
            self.config.camera_uploads_account().as_ref() == Some(name);
        Ok(RemovalConfirmation {
            account: name.clone(),
            has_camera_uploads_attached,
        })
    }

    /// Remove an account, then repair the current account if needed.
    pub async fn remove_account(&self, name: &AccountName) -> Result<RemovalOutcome> {
        self.require_registered(name).await?;

        let removed = match self.store.remove_account(name).await {
            Ok(removed) => removed,
            Err(error) => {
                tracing::warn!("Removing account {} failed: {}", name, error);
                return Err(error.into());
            }
        };
        if !removed {
            tracing::warn!("Account store declined removing {}", name);
            return Ok(RemovalOutcome::Declined);
        }
        tracing::info!("Removed account {}", name);

        let live = self.live_state().await?;
        if live.is_empty() {
            tracing::info!("No accounts left, account creation required");
            return Ok(RemovalOutcome::AccountCreationRequired);
        }
        if live.current().is_some() {
            return Ok(RemovalOutcome::Removed);
        }

        let Some(fallback) = select_fallback_account(&live) else {
            return Ok(RemovalOutcome::AccountCreationRequired);
        };
        self.store.set_current_account(&fallback).await?;
        tracing::info!("Current account removed, falling back to {}", fallback);
        Ok(RemovalOutcome::FallbackSelected(fallback))
    }

    /// Ask `scheduler` for an immediate sync of `name`.
    pub async fn refresh_account(
        &self,
        name: &AccountName,
        scheduler: &dyn SyncScheduler,
    ) -> Result<SyncRequest> {
        self.require_registered(name).await?;
        let request = SyncRequest::manual_refresh(name.clone(), self.config.sync_authority.clone());
        tracing::info!(
            "Requesting sync for {} at {}",
            request.account,
            request.authority
        );
        scheduler.request_sync(request.clone()).await?;
        Ok(request)
    }

    pub async fn credentials_update(&self, name: &AccountName) -> Result<CredentialsUpdateRequest> {
        self.require_registered(name).await?;
        Ok(CredentialsUpdateRequest {
            account: name.clone(),
            action: CredentialsAction::UpdateToken,
        })
    }

    pub async fn account_set_changed(&self) -> Result<bool> {
        Ok(self.snapshot.has_account_set_changed(&self.live_state().await?))
    }

    pub async fn current_account_changed(&self) -> Result<bool> {
        Ok(self
            .snapshot
            .has_current_account_changed(&self.live_state().await?))
    }

    /// Close the session and report what changed since it opened.
    pub async fn finish(self) -> Result<ManageAccountsResult> {
        let live = self.live_state().await?;
        let result = ManageAccountsResult::evaluate(&self.snapshot, &live);
        tracing::debug!(
            "Closing account session: list changed {}, current changed {}",
            result.account_list_changed,
            result.current_account_changed
        );
        Ok(result)
    }

    async fn require_registered(&self, name: &AccountName) -> Result<()> {
        let accounts = self.store.list_accounts(&self.account_type).await?;
        if accounts.contains(name) {
            Ok(())
        } else {
            Err(Error::NotFound(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryAccountStore;
    use crate::sync::QueuedSyncScheduler;
    use pretty_assertions::assert_eq;

    fn name(value: &str) -> AccountName {
        AccountName::new(value).unwrap()
    }

    fn store(accounts: &[&str], current: Option<&str>) -> MemoryAccountStore {
        MemoryAccountStore::with_accounts(
            &AccountType::default(),
            accounts.iter().map(|account| name(account)),
            current.map(name),
        )
    }

    async fn open(store: &MemoryAccountStore) -> ManageAccountsSession<MemoryAccountStore> {
        ManageAccountsSession::open(store.clone(), AccountsConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn untouched_session_reports_no_changes() {
        let store = store(&["a@h", "b@h"], Some("a@h"));
        let session = open(&store).await;
        assert_eq!(
            session.finish().await.unwrap(),
            ManageAccountsResult::default()
        );
    }

    #[tokio::test]
    async fn list_items_mark_current_and_append_add_row() {
        let store = store(&["a@h", "b@h"], Some("b@h"));
        let session = open(&store).await;
        assert_eq!(
            session.list_items().await.unwrap(),
            vec![
                AccountListItem::Account {
                    name: name("a@h"),
                    is_current: false,
                },
                AccountListItem::Account {
                    name: name("b@h"),
                    is_current: true,
                },
                AccountListItem::AddAccount,
            ]
        );
    }

    #[tokio::test]
    async fn list_items_skip_add_row_without_multi_account() {
        let store = store(&["a@h"], Some("a@h"));
        let config = AccountsConfig {
            multi_account_support: false,
            ..AccountsConfig::default()
        };
        let session = ManageAccountsSession::open(store, config).await.unwrap();
        let items = session.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].account(), Some(&name("a@h")));
    }

    #[tokio::test]
    async fn switching_to_current_account_changes_nothing() {
        let store = store(&["a@h", "b@h"], Some("a@h"));
        let session = open(&store).await;
        assert_eq!(
            session.switch_account(&name("a@h")).await.unwrap(),
            SwitchOutcome::AlreadyCurrent
        );
        assert!(!session.current_account_changed().await.unwrap());
    }

    #[tokio::test]
    async fn switching_account_reports_current_change_only() {
        let store = store(&["a@h", "b@h"], Some("a@h"));
        let session = open(&store).await;
        assert_eq!(
            session.switch_account(&name("b@h")).await.unwrap(),
            SwitchOutcome::Switched(name("b@h"))
        );
        assert_eq!(
            session.finish().await.unwrap(),
            ManageAccountsResult {
                account_list_changed: false,
                current_account_changed: true,
            }
        );
    }

    #[tokio::test]
    async fn switching_to_unknown_account_fails() {
        let store = store(&["a@h"], Some("a@h"));
        let session = open(&store).await;
        let error = session.switch_account(&name("x@h")).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn created_account_becomes_current() {
        let store = store(&["a@h"], Some("a@h"));
        let session = open(&store).await;
        let created = session
            .create_account(&NewAccount::new("bob", "https://h"))
            .await
            .unwrap();
        assert_eq!(created, name("bob@h"));
        assert_eq!(
            session.finish().await.unwrap(),
            ManageAccountsResult {
                account_list_changed: true,
                current_account_changed: true,
            }
        );
    }

    #[tokio::test]
    async fn canceled_creation_leaves_state_untouched() {
        let store = store(&["a@h"], Some("a@h"));
        let session = open(&store).await;
        store.fail_next(AccountStoreError::Canceled).await;

        let error = session
            .create_account(&NewAccount::new("bob", "https://h"))
            .await
            .unwrap_err();
        assert!(error.is_canceled());
        assert_eq!(
            session.finish().await.unwrap(),
            ManageAccountsResult::default()
        );
    }

    #[tokio::test]
    async fn removing_other_account_keeps_current() {
        let store = store(&["a@h", "b@h", "c@h"], Some("a@h"));
        let session = open(&store).await;
        assert_eq!(
            session.remove_account(&name("b@h")).await.unwrap(),
            RemovalOutcome::Removed
        );
        assert_eq!(
            session.finish().await.unwrap(),
            ManageAccountsResult {
                account_list_changed: true,
                current_account_changed: false,
            }
        );
    }

    #[tokio::test]
    async fn removing_current_account_falls_back_to_first() {
        let store = store(&["a@h", "b@h", "c@h"], Some("b@h"));
        let session = open(&store).await;
        assert_eq!(
            session.remove_account(&name("b@h")).await.unwrap(),
            RemovalOutcome::FallbackSelected(name("a@h"))
        );
        assert_eq!(store.current_account().await.unwrap(), Some(name("a@h")));
        assert_eq!(
            session.finish().await.unwrap(),
            ManageAccountsResult {
                account_list_changed: true,
                current_account_changed: true,
            }
        );
    }

    #[tokio::test]
    async fn removing_last_account_requires_creation() {
        let store = store(&["a@h"], Some("a@h"));
        let session = open(&store).await;
        assert_eq!(
            session.remove_account(&name("a@h")).await.unwrap(),
            RemovalOutcome::AccountCreationRequired
        );
        assert_eq!(
            session.finish().await.unwrap(),
            ManageAccountsResult {
                account_list_changed: true,
                current_account_changed: false,
            }
        );
    }

    #[tokio::test]
    async fn store_declining_removal_reports_declined() {
        let store = store(&["a@h", "b@h"], Some("a@h"));
        let session = open(&store).await;
        store.decline_next_removal().await;

        assert_eq!(
            session.remove_account(&name("a@h")).await.unwrap(),
            RemovalOutcome::Declined
        );
        let live = session.live_state().await.unwrap();
        assert_eq!(live.accounts(), &[name("a@h"), name("b@h")]);
        assert_eq!(live.current(), Some(&name("a@h")));
        assert_eq!(session.finish().await.unwrap(), ManageAccountsResult::default());
    }

    #[tokio::test]
    async fn failed_removal_keeps_snapshot() {
        let store = store(&["a@h", "b@h"], Some("a@h"));
        let session = open(&store).await;
        let snapshot_before = session.snapshot().clone();
        store
            .fail_next(AccountStoreError::failed("server unreachable"))
            .await;

        assert!(session.remove_account(&name("a@h")).await.is_err());
        assert_eq!(session.snapshot(), &snapshot_before);
        assert!(!session.account_set_changed().await.unwrap());
    }

    #[tokio::test]
    async fn removal_confirmation_flags_camera_uploads() {
        let store = store(&["a@h", "b@h"], Some("a@h"));
        let config = AccountsConfig {
            camera_uploads_account: Some("b@h".to_string()),
            ..AccountsConfig::default()
        };
        let session = ManageAccountsSession::open(store, config).await.unwrap();

        assert!(
            session
                .prepare_removal(&name("b@h"))
                .await
                .unwrap()
                .has_camera_uploads_attached
        );
        assert!(
            !session
                .prepare_removal(&name("a@h"))
                .await
                .unwrap()
                .has_camera_uploads_attached
        );
    }

    #[tokio::test]
    async fn refresh_submits_manual_sync_request() {
        let store = store(&["a@h"], Some("a@h"));
        let session = open(&store).await;
        let scheduler = QueuedSyncScheduler::new();

        let request = session
            .refresh_account(&name("a@h"), &scheduler)
            .await
            .unwrap();
        assert_eq!(request.authority, "org.owncloud");
        assert_eq!(scheduler.pending().await, vec![request]);
    }

    #[tokio::test]
    async fn credentials_update_targets_registered_account() {
        let store = store(&["a@h"], Some("a@h"));
        let session = open(&store).await;
        let request = session.credentials_update(&name("a@h")).await.unwrap();
        assert_eq!(request.action, CredentialsAction::UpdateToken);
        assert!(session.credentials_update(&name("x@h")).await.is_err());
    }

    #[tokio::test]
    async fn reconciler_runs_on_removal_completion_task() {
        let store = store(&["a@h", "b@h"], Some("a@h"));
        let session = open(&store).await;
        let snapshot = session.snapshot().clone();

        let worker_store = store.clone();
        let result = tokio::spawn(async move {
            worker_store.remove_account(&name("b@h")).await.unwrap();
            let live = worker_store
                .live_state(&AccountType::default())
                .await
                .unwrap();
            ManageAccountsResult::evaluate(&snapshot, &live)
        })
        .await
        .unwrap();

        assert_eq!(
            result,
            ManageAccountsResult {
                account_list_changed: true,
                current_account_changed: false,
            }
        );
    }
}
