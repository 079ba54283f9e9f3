//! Command line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Fixed cost amortization and sales aggregation for small businesses.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate sales and fixed costs over a range.
    Stats(RangeArgs),
    /// Summary for a range plus the current month's goal.
    Dashboard(DashboardArgs),
    /// List every fixed cost charge due in a range.
    Schedule(RangeArgs),
}

/// Ledger, tenant and range selection shared by every command.
#[derive(Debug, Args)]
pub struct RangeArgs {
    /// JSON ledger snapshot to read.
    #[arg(long)]
    pub ledger: PathBuf,

    /// Tenant whose ledger is used.
    #[arg(long)]
    pub tenant: String,

    /// Range start, `YYYY-MM-DD` or RFC 3339.
    #[arg(long)]
    pub start: String,

    /// Range end, `YYYY-MM-DD` or RFC 3339. A date-only end covers the whole local day.
    #[arg(long)]
    pub end: String,

    /// Restrict to one product id ("all" for every product).
    #[arg(long)]
    pub product: Option<String>,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Day whose month the goal covers. Defaults to today in the business timezone.
    #[arg(long)]
    pub today: Option<NaiveDate>,
}
