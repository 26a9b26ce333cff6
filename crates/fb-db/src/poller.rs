//! Background discovery of rows written by other processes.
//!
//! The poller keeps an [`InsertCursor`] and, on every tick, publishes rows
//! inserted past it to the service's insert feed. Rows this process wrote
//! itself were already published by `create_feedback`; the feed drops them
//! as duplicates.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::DatabaseError;
use crate::repos::InsertCursor;
use crate::service::FeedbackService;

/// Running poller. Dropping the handle also stops it; [`stop`](Self::stop) waits for the exit.
pub struct PollerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the poller to exit and wait for it.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "insert poller task ended abnormally");
        }
    }
}

/// Start polling `service` every `interval` for inserts made after this call.
///
/// # Errors
///
/// Returns `DatabaseError` if the starting cursor cannot be read.
pub async fn spawn_insert_poller(
    service: Arc<FeedbackService>,
    interval: Duration,
) -> Result<PollerHandle, DatabaseError> {
    let cursor = service.latest_cursor().await?;
    let (shutdown, mut stop_rx) = oneshot::channel();
    info!(interval_ms = interval.as_millis(), "insert poller started");

    let task = tokio::spawn(async move {
        let mut cursor = cursor;
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately; skip it so the first poll is one interval out.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    cursor = poll_once(&service, cursor).await;
                }
            }
        }
        debug!("insert poller stopped");
    });

    Ok(PollerHandle { shutdown, task })
}

/// One polling pass. Failures are logged and the cursor is left where it was.
async fn poll_once(service: &FeedbackService, cursor: InsertCursor) -> InsertCursor {
    if let Err(e) = service.db().sync().await {
        warn!(error = %e, "replica sync failed; polling local state");
    }
    match service.fetch_inserted_after(cursor).await {
        Ok((records, next)) => {
            let feed = service.feed();
            for record in records {
                feed.publish(record);
            }
            next
        }
        Err(e) => {
            warn!(error = %e, "insert poll failed");
            cursor
        }
    }
}
