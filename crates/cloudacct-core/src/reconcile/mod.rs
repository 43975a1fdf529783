//! Account set reconciliation.
//!
//! A [`AccountSetSnapshot`] is captured once when the manage-accounts
//! session opens. When the session closes it is compared against the live
//! state of the account store to tell the caller whether the set of
//! accounts and the current account changed while the screen was shown.
//!
//! Everything here is a pure function of its inputs: no locking, no I/O,
//! callable from any thread.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::AccountName;

/// Accounts registered right now, in the store's enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveAccountState {
    accounts: Vec<AccountName>,
    current: Option<AccountName>,
}

impl LiveAccountState {
    #[must_use]
    pub const fn new(accounts: Vec<AccountName>, current: Option<AccountName>) -> Self {
        Self { accounts, current }
    }

    /// Registered accounts in enumeration order.
    #[must_use]
    pub fn accounts(&self) -> &[AccountName] {
        &self.accounts
    }

    #[must_use]
    pub const fn current(&self) -> Option<&AccountName> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn contains(&self, name: &AccountName) -> bool {
        self.accounts.contains(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account_set(&self) -> BTreeSet<&AccountName> {
        self.accounts.iter().collect()
    }
}

/// Immutable point-in-time capture of the account set and current account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSetSnapshot {
    accounts: BTreeSet<AccountName>,
    current: Option<AccountName>,
}

impl AccountSetSnapshot {
    /// Capture `live`.
    ///
    /// The recorded current account always belongs to the recorded set; a
    /// current account the store no longer enumerates is recorded as absent.
    #[must_use]
    pub fn capture(live: &LiveAccountState) -> Self {
        let accounts: BTreeSet<AccountName> = live.accounts.iter().cloned().collect();
        let current = live
            .current
            .as_ref()
            .filter(|name| accounts.contains(*name))
            .cloned();
        Self { accounts, current }
    }

    #[must_use]
    pub const fn accounts(&self) -> &BTreeSet<AccountName> {
        &self.accounts
    }

    #[must_use]
    pub const fn current(&self) -> Option<&AccountName> {
        self.current.as_ref()
    }

    /// True iff the live account set differs from the captured one.
    #[must_use]
    pub fn has_account_set_changed(&self, live: &LiveAccountState) -> bool {
        self.accounts.iter().collect::<BTreeSet<_>>() != live.account_set()
    }

    /// True iff the live state has a current account and it is not the
    /// captured one. A missing live current account is never a change.
    #[must_use]
    pub fn has_current_account_changed(&self, live: &LiveAccountState) -> bool {
        live.current
            .as_ref()
            .is_some_and(|current| self.current.as_ref() != Some(current))
    }
}

/// Payload handed back to the caller of the manage-accounts screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageAccountsResult {
    pub account_list_changed: bool,
    pub current_account_changed: bool,
}

impl ManageAccountsResult {
    #[must_use]
    pub fn evaluate(snapshot: &AccountSetSnapshot, live: &LiveAccountState) -> Self {
        Self {
            account_list_changed: snapshot.has_account_set_changed(live),
            current_account_changed: snapshot.has_current_account_changed(live),
        }
    }
}

/// Capture a snapshot of `live`. See [`AccountSetSnapshot::capture`].
#[must_use]
pub fn capture(live: &LiveAccountState) -> AccountSetSnapshot {
    AccountSetSnapshot::capture(live)
}

#[must_use]
pub fn has_account_set_changed(snapshot: &AccountSetSnapshot, live: &LiveAccountState) -> bool {
    snapshot.has_account_set_changed(live)
}

#[must_use]
pub fn has_current_account_changed(
    snapshot: &AccountSetSnapshot,
    live: &LiveAccountState,
) -> bool {
    snapshot.has_current_account_changed(live)
}

/// Pick the account that becomes current when the current one disappeared.
///
/// Returns the first account in enumeration order, or `None` when no
/// account is left and the caller has to start account creation.
#[must_use]
pub fn select_fallback_account(live: &LiveAccountState) -> Option<AccountName> {
    live.accounts.first().cloned()
}
