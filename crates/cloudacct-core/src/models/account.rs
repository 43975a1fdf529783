//! Account identity models

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Account type registered by this client with the platform account subsystem
pub const DEFAULT_ACCOUNT_TYPE: &str = "owncloud";

/// Unique name of a registered account, usually `user@host`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    /// Create an account name.
    ///
    /// Names are opaque: surrounding whitespace is trimmed and empty names
    /// are rejected, everything else is kept as given.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        normalize_text_option(Some(name.into()))
            .map(Self)
            .ok_or_else(|| Error::InvalidInput("account name must not be empty".into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// User part of a `user@host` name, or the whole name when there is no `@`.
    #[must_use]
    pub fn user(&self) -> &str {
        self.0.rsplit_once('@').map_or(&self.0, |(user, _)| user)
    }

    /// Host part of a `user@host` name.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.0.rsplit_once('@').map(|(_, host)| host)
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AccountName> for String {
    fn from(value: AccountName) -> Self {
        value.0
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Account type under which accounts are registered
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountType(String);

impl AccountType {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccountType {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_TYPE)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a completed add-account (login) flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    /// Login user name on the server
    pub username: String,
    /// Server base URL, including scheme
    pub server_url: String,
}

impl NewAccount {
    #[must_use]
    pub fn new(username: impl Into<String>, server_url: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            server_url: server_url.into(),
        }
    }

    /// Derive the account name `user@host[:port][/path]` from the server URL.
    pub fn account_name(&self) -> Result<AccountName> {
        let username = normalize_text_option(Some(self.username.clone()))
            .ok_or_else(|| Error::InvalidInput("username must not be empty".into()))?;
        let server_url = normalize_text_option(Some(self.server_url.clone()))
            .ok_or_else(|| Error::InvalidInput("server URL must not be empty".into()))?;
        if !is_http_url(&server_url) {
            return Err(Error::InvalidInput(
                "server URL must include http:// or https://".into(),
            ));
        }

        let scheme = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("Invalid regex");
        let host = scheme.replace(&server_url, "");
        let host = host.trim_end_matches('/');
        if host.is_empty() {
            return Err(Error::InvalidInput(format!(
                "server URL '{server_url}' has no host"
            )));
        }

        AccountName::new(format!("{username}@{host}"))
    }
}
