use std::io;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tp_cli::commands::{estimate, overlap, resolve, slot};
use tp_cli::{Cli, Commands, Config, PlanDocument};
use tp_core::DateRange;

fn requested_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange> {
    DateRange::new(start, end).context("invalid --start/--end")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Estimate {
            plan,
            project,
            as_of,
            json,
        }) => {
            let plan = PlanDocument::load(plan)?;
            // Read "today" once so every project shares the same cutoff
            let today = as_of.or_else(|| {
                config
                    .skip_past_days
                    .then(|| chrono::Local::now().date_naive())
            });
            estimate::run(&mut stdout, &plan, project.as_deref(), today, *json)?;
        }
        Some(Commands::Overlap {
            plan,
            start,
            end,
            exclude,
            row,
            json,
        }) => {
            let plan = PlanDocument::load(plan)?;
            let candidate = requested_range(*start, *end)?;
            overlap::run(
                &mut stdout,
                &plan,
                &candidate,
                exclude.as_deref(),
                row.as_deref(),
                *json,
            )?;
        }
        Some(Commands::Resolve {
            plan,
            project,
            start,
            end,
            row,
            strategy,
            json,
        }) => {
            let plan = PlanDocument::load(plan)?;
            let requested = requested_range(*start, *end)?;
            resolve::run(
                &mut stdout,
                &plan,
                project,
                &requested,
                row.as_deref(),
                strategy.unwrap_or(config.default_strategy),
                &config.slot_search(),
                *json,
            )?;
        }
        Some(Commands::Slot {
            plan,
            start,
            end,
            row,
            exclude,
            json,
        }) => {
            let plan = PlanDocument::load(plan)?;
            let requested = requested_range(*start, *end)?;
            slot::run(
                &mut stdout,
                &plan,
                &requested,
                row.as_deref(),
                exclude.as_deref(),
                &config.slot_search(),
                *json,
            )?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
