//! Timeline planner CLI library.
//!
//! This crate provides the CLI interface for the scheduling core.

mod cli;
pub mod commands;
mod config;
mod plan;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use plan::PlanDocument;
