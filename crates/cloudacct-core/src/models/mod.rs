//! Data models for cloudacct

mod account;
mod list_item;

pub use account::{AccountName, AccountType, NewAccount, DEFAULT_ACCOUNT_TYPE};
pub use list_item::AccountListItem;
