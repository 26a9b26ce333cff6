//! Service layer tying storage to insert notifications.
//!
//! `FeedbackService` wraps `FeedbackDb` (raw database access) and the shared
//! `InsertFeed`. All repo methods are implemented as `impl FeedbackService`.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use fb_config::FbConfig;
use tracing::debug;

use crate::FeedbackDb;
use crate::error::DatabaseError;
use crate::realtime::{InsertFeed, Subscription};

/// Record source for the dashboard.
///
/// Every successful `create_feedback` publishes the stored record to the
/// insert feed, so subscribers in the same process see it immediately.
/// Rows written by other processes reach the feed through
/// [`crate::poller::spawn_insert_poller`].
pub struct FeedbackService {
    db: FeedbackDb,
    feed: Arc<InsertFeed>,
}

impl FeedbackService {
    /// Create a service backed by a local database file, or `":memory:"` for tests.
    ///
    /// Creates the parent directory of `db_path` when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created or the
    /// database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        ensure_parent_dir(db_path)?;
        let db = FeedbackDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create a service talking directly to a remote Turso database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection fails.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = FeedbackDb::open_remote(url, auth_token).await?;
        Ok(Self::from_db(db))
    }

    /// Create a service backed by a synced Turso embedded replica.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the replica cannot be opened or synced.
    pub async fn new_synced(
        local_replica_path: &str,
        remote_url: &str,
        auth_token: &str,
        sync_interval: Duration,
    ) -> Result<Self, DatabaseError> {
        ensure_parent_dir(local_replica_path)?;
        let db =
            FeedbackDb::open_synced(local_replica_path, remote_url, auth_token, sync_interval)
                .await?;
        Ok(Self::from_db(db))
    }

    /// Open whichever store the configuration points at.
    ///
    /// Turso with a replica path opens an embedded replica; Turso without one
    /// connects remotely; otherwise the local database file is used.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` from the selected open path. Callers decide
    /// whether to fall back to local storage.
    pub async fn open(config: &FbConfig) -> Result<Self, DatabaseError> {
        let turso = &config.turso;
        if !turso.is_configured() {
            return Self::new_local(&config.database.local_path).await;
        }
        if turso.has_local_replica() {
            debug!(host = turso.host(), "opening embedded replica");
            Self::new_synced(
                &turso.local_replica_path,
                &turso.url,
                &turso.auth_token,
                Duration::from_secs(turso.sync_interval_secs),
            )
            .await
        } else {
            debug!(host = turso.host(), "opening remote connection");
            Self::new_remote(&turso.url, &turso.auth_token).await
        }
    }

    /// Create from an existing `FeedbackDb` (for testing).
    #[must_use]
    pub fn from_db(db: FeedbackDb) -> Self {
        Self {
            db,
            feed: Arc::new(InsertFeed::default()),
        }
    }

    /// Access the underlying database.
    #[must_use]
    pub const fn db(&self) -> &FeedbackDb {
        &self.db
    }

    /// Shared handle to the insert feed.
    #[must_use]
    pub fn feed(&self) -> Arc<InsertFeed> {
        Arc::clone(&self.feed)
    }

    /// Register for "record inserted" notifications.
    #[must_use]
    pub fn subscribe_inserts(&self) -> Subscription {
        self.feed.subscribe()
    }
}

fn ensure_parent_dir(db_path: &str) -> Result<(), DatabaseError> {
    if db_path == ":memory:" {
        return Ok(());
    }
    match Path::new(db_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Other(anyhow::anyhow!(
                    "failed to create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}
