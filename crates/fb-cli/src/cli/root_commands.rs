use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Submit a feedback record
    Submit(SubmitArgs),
    /// List one page of feedback
    List(ListArgs),
    /// Show analytics: distribution, contributors, trend, hourly activity
    Stats(StatsArgs),
    /// Export the filtered, sorted view to CSV
    Export(ExportArgs),
    /// Follow new feedback as it arrives
    Watch(WatchArgs),
    /// Print the JSON Schema of a command response
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SubmitArgs {
    /// Submitter name
    #[arg(long)]
    pub name: String,

    /// Submitter email
    #[arg(long)]
    pub email: String,

    /// Feedback body
    #[arg(long)]
    pub text: String,

    /// suggestion, bug_report, or feature_request (default: suggestion)
    #[arg(long)]
    pub category: Option<String>,
}

/// Filters shared by every dashboard command.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Case-insensitive match against name, email, and feedback text
    #[arg(short, long)]
    pub search: Option<String>,

    /// all, suggestion, bug_report, feature_request
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Earliest creation time: YYYY-MM-DD (local start of day) or RFC 3339
    #[arg(long)]
    pub since: Option<String>,

    /// Latest creation time: YYYY-MM-DD (local end of day) or RFC 3339
    #[arg(long)]
    pub until: Option<String>,

    /// Drop the configured default date range
    #[arg(long, conflicts_with_all = ["since", "until"])]
    pub all_dates: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// newest or oldest first: desc, asc
    #[arg(long, default_value = "desc")]
    pub order: String,

    /// 1-based page number; clamped to the last page
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Clone, Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// all (every record) or filtered (current view)
    #[arg(long, default_value = "all")]
    pub scope: String,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[arg(long, default_value = "desc")]
    pub order: String,

    /// Write here instead of the configured export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[arg(long, default_value = "desc")]
    pub order: String,

    /// Prepend pushed records instead of refetching everything
    #[arg(long)]
    pub merge: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    /// A stored record
    Feedback,
    /// A submission before storage
    NewFeedback,
    /// `fbk submit` output
    Submit,
    /// `fbk list` output
    Page,
    /// `fbk stats` output
    Stats,
    /// `fbk export` output
    Export,
    /// One `fbk watch` update
    Watch,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub target: SchemaTarget,
}
