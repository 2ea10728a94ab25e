pub mod add;
pub mod dashboard;
pub mod delete;
pub mod demo;
pub mod export;
pub mod init;
pub mod list;
pub mod stats;
pub mod status;
pub mod target;

use clap::{Args, Parser, Subcommand};

use crate::error::{Result, TourlogError};
use crate::models::{Outcome, OwnershipType};
use crate::month;

/// Resolve an optional YYYY-MM argument, defaulting to the current month.
pub(crate) fn resolve_month(month_arg: Option<&str>) -> Result<String> {
    match month_arg {
        Some(m) => {
            if month::parse(m).is_none() {
                return Err(TourlogError::InvalidMonth(m.to_string()));
            }
            Ok(m.to_string())
        }
        None => Ok(month::current()),
    }
}

#[derive(Parser)]
#[command(name = "tourlog", about = "Timeshare tour sales tracker for one salesperson.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up tourlog: choose a data directory for the sale history.
    Init {
        /// Path for tourlog data (default: ~/Documents/tourlog)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record a tour.
    Add(AddArgs),
    /// Delete a sale by id (a unique prefix is enough).
    Delete {
        /// Sale id, as shown in `tourlog list`
        id: String,
    },
    /// List a month's tours.
    List {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Case-insensitive search over client, notes, membership, ownership
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a month's numbers against its targets.
    Stats {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Case-insensitive search over client, notes, membership, ownership
        #[arg(long)]
        search: Option<String>,
    },
    /// Show or set monthly targets.
    Target {
        #[command(subcommand)]
        command: TargetCommands,
    },
    /// Export a month's tours to CSV.
    Export {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Case-insensitive search over client, notes, membership, ownership
        #[arg(long)]
        search: Option<String>,
        /// Output file path (default: <data_dir>/exports/sales-YYYY-MM.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Load sample sale data to explore tourlog.
    Demo,
    /// Show the data directory and history summary.
    Status,
}

#[derive(Args)]
pub struct AddArgs {
    /// Client name
    #[arg(long)]
    pub client: String,
    /// Tour number for the day
    #[arg(long, default_value_t = 1)]
    pub tour: u32,
    /// Tour outcome
    #[arg(long, value_enum, default_value = "sold")]
    pub outcome: Outcome,
    /// Tour date: YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Sale amount in dollars (SOLD tours)
    #[arg(long, default_value_t = 0.0)]
    pub amount: f64,
    /// Bonus points awarded (SOLD tours)
    #[arg(long, default_value_t = 0.0)]
    pub bonus_points: f64,
    /// Membership id issued with the sale
    #[arg(long)]
    pub membership_id: Option<String>,
    /// Ownership type
    #[arg(long, value_enum, default_value = "deed")]
    pub ownership: OwnershipType,
    /// Client's existing ownership, if any
    #[arg(long)]
    pub existing_ownership: Option<String>,
    /// Free-form notes
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Follow-up reminder
    #[arg(long)]
    pub follow_up: Option<String>,
}

#[derive(Subcommand)]
pub enum TargetCommands {
    /// Show a month's targets.
    Show {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Set a month's targets. Omitted values keep their current setting.
    Set {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Average sale price target, dollars
        #[arg(long)]
        asp: Option<f64>,
        /// Monthly sales goal, dollars
        #[arg(long)]
        goal: Option<f64>,
    },
}
