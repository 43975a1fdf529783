//! Sync requests for a single account.
//!
//! Refreshing an account from the account list asks the platform sync
//! scheduler for an expedited, manual, run-once sync of that account's
//! content authority. Running the sync itself is the scheduler's business.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::AccountName;
use crate::util::unix_timestamp_millis_now;
use crate::Result;

/// A one-shot sync request for one account and content authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub id: Uuid,
    pub account: AccountName,
    pub authority: String,
    pub expedited: bool,
    pub manual: bool,
    pub run_once: bool,
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
    /// Request timestamp (Unix ms)
    pub requested_at: i64,
}

impl SyncRequest {
    #[must_use]
    pub fn builder(account: AccountName, authority: impl Into<String>) -> SyncRequestBuilder {
        SyncRequestBuilder {
            account,
            authority: authority.into(),
            expedited: false,
            manual: false,
            run_once: false,
            extras: BTreeMap::new(),
        }
    }

    /// The request issued when the user refreshes an account by hand.
    #[must_use]
    pub fn manual_refresh(account: AccountName, authority: impl Into<String>) -> Self {
        Self::builder(account, authority)
            .expedited(true)
            .manual(true)
            .run_once()
            .build()
    }
}

#[derive(Debug, Clone)]
pub struct SyncRequestBuilder {
    account: AccountName,
    authority: String,
    expedited: bool,
    manual: bool,
    run_once: bool,
    extras: BTreeMap<String, String>,
}

impl SyncRequestBuilder {
    #[must_use]
    pub const fn expedited(mut self, expedited: bool) -> Self {
        self.expedited = expedited;
        self
    }

    #[must_use]
    pub const fn manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    #[must_use]
    pub const fn run_once(mut self) -> Self {
        self.run_once = true;
        self
    }

    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> SyncRequest {
        SyncRequest {
            id: Uuid::now_v7(),
            account: self.account,
            authority: self.authority,
            expedited: self.expedited,
            manual: self.manual,
            run_once: self.run_once,
            extras: self.extras,
            requested_at: unix_timestamp_millis_now(),
        }
    }
}

/// Platform sync scheduler
#[async_trait]
pub trait SyncScheduler: Send + Sync {
    async fn request_sync(&self, request: SyncRequest) -> Result<()>;
}

/// Scheduler that only queues requests, for hosts that drain them later.
#[derive(Debug, Clone, Default)]
pub struct QueuedSyncScheduler {
    queue: Arc<Mutex<Vec<SyncRequest>>>,
}

impl QueuedSyncScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn pending(&self) -> Vec<SyncRequest> {
        self.queue.lock().await.clone()
    }

    pub async fn drain(&self) -> Vec<SyncRequest> {
        std::mem::take(&mut *self.queue.lock().await)
    }
}

#[async_trait]
impl SyncScheduler for QueuedSyncScheduler {
    async fn request_sync(&self, request: SyncRequest) -> Result<()> {
        tracing::debug!(
            "Queued sync {} for {} at {}",
            request.id,
            request.account,
            request.authority
        );
        self.queue.lock().await.push(request);
        Ok(())
    }
}
