//! Account management configuration shared by all front ends.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{AccountName, AccountType, DEFAULT_ACCOUNT_TYPE};
use crate::util::normalize_text_option;

const DEFAULT_SYNC_AUTHORITY: &str = "org.owncloud";

/// Build- or user-provided settings for the manage-accounts session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AccountsConfig {
    /// Account type the client registers accounts under
    #[serde(default = "default_account_type")]
    pub account_type: String,
    /// Whether the account list offers an "add account" row
    #[serde(default = "default_multi_account_support")]
    pub multi_account_support: bool,
    /// Content authority passed along with sync requests
    #[serde(default = "default_sync_authority")]
    pub sync_authority: String,
    /// Account that camera uploads are attached to, if any
    #[serde(default)]
    pub camera_uploads_account: Option<String>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            account_type: default_account_type(),
            multi_account_support: default_multi_account_support(),
            sync_authority: default_sync_authority(),
            camera_uploads_account: None,
        }
    }
}

fn default_account_type() -> String {
    DEFAULT_ACCOUNT_TYPE.to_string()
}

const fn default_multi_account_support() -> bool {
    true
}

fn default_sync_authority() -> String {
    DEFAULT_SYNC_AUTHORITY.to_string()
}

impl AccountsConfig {
    /// Parse and normalize a JSON config payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(payload)?;
        config.normalize();
        Ok(config)
    }

    #[must_use]
    pub fn account_type(&self) -> AccountType {
        AccountType::new(self.account_type.clone())
    }

    /// The camera-uploads account, if one is configured.
    #[must_use]
    pub fn camera_uploads_account(&self) -> Option<AccountName> {
        normalize_text_option(self.camera_uploads_account.clone())
            .and_then(|name| AccountName::new(name).ok())
    }

    /// Trim text fields; blank values fall back to their defaults.
    pub fn normalize(&mut self) {
        self.account_type = normalize_text_option(Some(self.account_type.clone()))
            .unwrap_or_else(default_account_type);
        self.sync_authority = normalize_text_option(Some(self.sync_authority.clone()))
            .unwrap_or_else(default_sync_authority);
        self.camera_uploads_account =
            normalize_text_option(self.camera_uploads_account.clone());
    }
}
