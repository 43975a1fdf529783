use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] cloudacct_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Account name cannot be empty")]
    EmptyAccountName,
    #[error("Invalid session action '{0}'. Expected add:<user>,<url>, remove:<name>, switch:<name>, sync:<name> or credentials:<name>")]
    InvalidAction(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Account registry error: {0}")]
    Registry(String),
}
