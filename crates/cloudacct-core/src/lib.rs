//! cloudacct-core - Core library for cloudacct
//!
//! This crate contains the account models, the account-set reconciler, the
//! account store abstraction and the session controller behind the
//! "manage accounts" screen of a cloud-storage client.

pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod sync;
pub mod util;

pub use config::AccountsConfig;
pub use error::{Error, Result};
pub use models::{AccountName, AccountType, NewAccount};
pub use reconcile::{AccountSetSnapshot, LiveAccountState, ManageAccountsResult};
pub use session::ManageAccountsSession;
pub use store::{AccountStore, AccountStoreError, MemoryAccountStore};
