//! `fbk watch`: keep a dashboard live while new feedback arrives.
//!
//! Inserts reach the session through the service's insert feed, fed by this
//! process and by the background poller for rows other processes write. By
//! default each insert triggers a full refetch; only the latest fetch may
//! replace the records. `--merge` prepends pushed records instead.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone, Utc};
use fb_core::entities::Feedback;
use fb_dashboard::analytics::QuickStats;
use fb_dashboard::dashboard::Notice;
use fb_dashboard::{Dashboard, DashboardSettings, PageView, RefreshOutcome, RefreshTicket};
use fb_db::error::DatabaseError;
use fb_db::poller::spawn_insert_poller;
use fb_db::realtime::InsertEvent;
use fb_db::service::FeedbackService;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::cli::root_commands::WatchArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::list::{page_footer, page_table};
use crate::commands::shared::view::build_view;
use crate::commands::stats::recency_label;
use crate::context::AppContext;
use crate::output::output;

/// What `fbk watch` prints each time the view changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WatchUpdate {
    /// Newest first.
    pub notices: Vec<Notice>,
    pub quick_stats: QuickStats,
    pub page: PageView,
}

/// What the event loop should do next.
#[derive(Debug)]
enum Step {
    Render(WatchUpdate),
    Refetch(RefreshTicket),
}

struct WatchSession<Tz: TimeZone> {
    dashboard: Dashboard<Tz>,
    merge: bool,
}

impl<Tz: TimeZone> WatchSession<Tz> {
    fn new(dashboard: Dashboard<Tz>, merge: bool) -> Self {
        Self { dashboard, merge }
    }

    fn on_event(&mut self, event: InsertEvent, now: DateTime<Utc>) -> Option<Step> {
        match event {
            InsertEvent::Inserted(record) if self.merge => self
                .dashboard
                .merge_insert(record)
                .then(|| Step::Render(self.update(now))),
            InsertEvent::Inserted(record) => Some(Step::Refetch(self.dashboard.on_insert(&record))),
            InsertEvent::Missed(_) => Some(Step::Refetch(self.dashboard.begin_refresh())),
        }
    }

    /// Apply a finished fetch. Stale responses render nothing.
    fn on_fetch<E: Display>(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Feedback>, E>,
        now: DateTime<Utc>,
    ) -> Option<WatchUpdate> {
        match self.dashboard.complete_refresh(ticket, result) {
            RefreshOutcome::Stale { .. } => None,
            RefreshOutcome::Applied { .. } | RefreshOutcome::Failed => Some(self.update(now)),
        }
    }

    fn update(&mut self, now: DateTime<Utc>) -> WatchUpdate {
        WatchUpdate {
            notices: self.dashboard.take_notices(),
            quick_stats: self.dashboard.quick_stats(now),
            page: self.dashboard.page(),
        }
    }
}

type FetchResult = (RefreshTicket, Result<Vec<Feedback>, DatabaseError>);

fn spawn_fetch(fetches: &mut JoinSet<FetchResult>, service: &Arc<FeedbackService>, ticket: RefreshTicket) {
    let service = Arc::clone(service);
    fetches.spawn(async move { (ticket, service.fetch_all().await) });
}

/// Handle `fbk watch`. Runs until interrupted.
pub async fn handle(args: &WatchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let now = Utc::now();
    let view = build_view(
        &args.filter,
        &args.order,
        &now.with_timezone(&Local),
        ctx.config.dashboard.default_range_days,
    )?;
    let settings = DashboardSettings::from_config(&ctx.config.dashboard);
    let recency_hours = ctx.config.dashboard.recency_hours;
    let mut session = WatchSession::new(Dashboard::new(settings, Local, now).with_view(view), args.merge);

    // Subscribe before the first fetch so nothing inserted in between is lost.
    let mut subscription = ctx.service.subscribe_inserts();
    let poller = spawn_insert_poller(
        Arc::clone(&ctx.service),
        Duration::from_millis(ctx.config.watch.poll_interval_ms),
    )
    .await
    .context("failed to start insert poller")?;

    let mut fetches = JoinSet::new();
    spawn_fetch(&mut fetches, &ctx.service, session.dashboard.begin_refresh());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            _ = &mut shutdown => break Ok(()),
            Some(joined) = fetches.join_next() => {
                let (ticket, fetched) = match joined {
                    Ok(done) => done,
                    Err(error) => break Err(anyhow::Error::new(error).context("feedback fetch task failed")),
                };
                if let Some(update) = session.on_fetch(ticket, fetched, Utc::now()) {
                    if let Err(error) = emit(&update, flags, recency_hours) {
                        break Err(error);
                    }
                }
            }
            event = subscription.recv() => match event {
                Some(event) => match session.on_event(event, Utc::now()) {
                    Some(Step::Refetch(ticket)) => spawn_fetch(&mut fetches, &ctx.service, ticket),
                    Some(Step::Render(update)) => {
                        if let Err(error) = emit(&update, flags, recency_hours) {
                            break Err(error);
                        }
                    }
                    None => {}
                },
                None => break Ok(()),
            },
        }
    };

    subscription.unsubscribe();
    poller.stop().await;
    fetches.shutdown().await;
    tracing::debug!("watch stopped");
    result
}

fn emit(update: &WatchUpdate, flags: &GlobalFlags, recency_hours: u32) -> anyhow::Result<()> {
    if flags.format != OutputFormat::Table {
        return output(update, flags.format);
    }
    for notice in update.notices.iter().rev() {
        println!("» {notice}");
    }
    println!("{}", page_table(&update.page, &Local));
    if !flags.quiet {
        println!("{}", status_line(update, recency_hours));
    }
    println!();
    Ok(())
}

fn status_line(update: &WatchUpdate, recency_hours: u32) -> String {
    format!(
        "{} | {} total, {} in the {}, {} users",
        page_footer(&update.page),
        update.quick_stats.total,
        update.quick_stats.recent,
        recency_label(recency_hours),
        update.quick_stats.unique_users
    )
}
