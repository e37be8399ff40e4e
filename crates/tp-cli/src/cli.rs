//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tp_core::ConflictStrategy;

/// Timeline planner.
///
/// Computes per-day hour estimates for projects and checks timeline
/// placements for conflicts, reading everything from a JSON plan file.
#[derive(Debug, Parser)]
#[command(name = "tp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show per-day hour estimates.
    Estimate {
        /// Path to the JSON plan document.
        #[arg(long)]
        plan: PathBuf,

        /// Only show this project.
        #[arg(long)]
        project: Option<String>,

        /// Ignore auto-estimate days before this date (YYYY-MM-DD).
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check a candidate date range for conflicts.
    Overlap {
        /// Path to the JSON plan document.
        #[arg(long)]
        plan: PathBuf,

        /// Candidate start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Candidate end date (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,

        /// Project to leave out of the check (usually the one being moved).
        #[arg(long)]
        exclude: Option<String>,

        /// Only consider projects on this row.
        #[arg(long)]
        row: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate moving a project to a new range and resolve any conflict.
    Resolve {
        /// Path to the JSON plan document.
        #[arg(long)]
        plan: PathBuf,

        /// The project being dragged.
        #[arg(long)]
        project: String,

        /// Requested start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Requested end date (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,

        /// Target row. Defaults to the project's current row.
        #[arg(long)]
        row: Option<String>,

        /// Conflict strategy: adjust, reject or force.
        #[arg(long)]
        strategy: Option<ConflictStrategy>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Find the nearest free slot for a date range.
    Slot {
        /// Path to the JSON plan document.
        #[arg(long)]
        plan: PathBuf,

        /// Requested start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Requested end date (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,

        /// Only avoid projects on this row.
        #[arg(long)]
        row: Option<String>,

        /// Project to ignore while searching.
        #[arg(long)]
        exclude: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
