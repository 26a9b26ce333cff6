//! # fb-db
//!
//! libSQL record source for fbdesk.
//!
//! Owns the `feedback` table: creation of new submissions, full fetches for
//! the dashboard, cursor-based fetches for the insert poller, and the
//! broadcast feed that pushes "new record" notifications to subscribers.
//!
//! Uses the `libsql` crate, which covers local files, Turso remote databases,
//! and Turso embedded replicas behind the same connection API.

pub mod error;
pub mod helpers;
mod migrations;
pub mod poller;
pub mod realtime;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;
use tracing::info;

/// How the handle reaches its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Local file or `:memory:`.
    Local,
    /// Direct remote connection to Turso.
    Remote,
    /// Local embedded replica synced with Turso.
    Replica,
}

/// Central database handle for feedback storage.
///
/// Wraps a libSQL database and a single connection.
pub struct FeedbackDb {
    db: libsql::Database,
    conn: libsql::Connection,
    mode: StoreMode,
}

impl FeedbackDb {
    /// Open a local-only database at the given path (no cloud sync).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::finish_open(db, StoreMode::Local).await
    }

    /// Open a direct connection to a remote Turso database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::finish_open(db, StoreMode::Remote).await
    }

    /// Open an embedded replica at `replica_path` that syncs with `url`.
    ///
    /// Performs an initial sync before running migrations so the local file
    /// reflects the remote schema.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the replica cannot be opened, synced, or migrated.
    pub async fn open_synced(
        replica_path: &str,
        url: &str,
        auth_token: &str,
        sync_interval: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote_replica(replica_path, url.to_string(), auth_token.to_string())
            .sync_interval(sync_interval)
            .build()
            .await?;
        db.sync().await?;
        Self::finish_open(db, StoreMode::Replica).await
    }

    async fn finish_open(db: libsql::Database, mode: StoreMode) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;
        let handle = Self { db, conn, mode };
        handle.run_migrations().await?;
        info!(?mode, "feedback store ready");
        Ok(handle)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn mode(&self) -> StoreMode {
        self.mode
    }

    #[must_use]
    pub fn is_synced_replica(&self) -> bool {
        self.mode == StoreMode::Replica
    }

    /// Pull remote changes into the embedded replica. No-op for other modes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the sync round-trip fails.
    pub async fn sync(&self) -> Result<(), DatabaseError> {
        if self.is_synced_replica() {
            self.db.sync().await?;
        }
        Ok(())
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"fdb-a3f8b2c1d4e5f607"`.
    ///
    /// Uses `randomblob(8)` in SQL to produce 16-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(8)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
