//! Rows of the account list

use serde::Serialize;

use super::AccountName;

/// A row in the account list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountListItem {
    /// A registered account
    Account {
        name: AccountName,
        is_current: bool,
    },
    /// Trailing "add account" action, shown when multi-account is enabled
    AddAccount,
}

impl AccountListItem {
    /// The account behind this row, if it is an account row.
    #[must_use]
    pub const fn account(&self) -> Option<&AccountName> {
        match self {
            Self::Account { name, .. } => Some(name),
            Self::AddAccount => None,
        }
    }
}
