//! Estimate command for listing per-day hour estimates.
//!
//! This module implements `tp estimate`, which runs the day-estimate engine
//! for one or all projects in a plan and prints the result.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tp_core::{DayEstimate, EstimateSummary, compute_all_estimates, summarize_estimates};

use super::format_hours;
use crate::PlanDocument;

/// JSON output shape.
#[derive(Debug, Serialize)]
pub struct EstimateReport {
    pub estimates: Vec<DayEstimate>,
    pub summary: EstimateSummary,
}

/// Computes estimates for the selected projects.
pub fn build_report(
    plan: &PlanDocument,
    project: Option<&str>,
    today: Option<NaiveDate>,
) -> Result<EstimateReport> {
    let selected = match project {
        Some(id) => vec![plan.project(id)?.clone()],
        None => plan.projects.clone(),
    };

    let estimates = compute_all_estimates(
        &selected,
        &plan.milestones,
        &plan.events,
        &plan.holidays,
        &plan.settings,
        today,
    );
    let summary = summarize_estimates(&estimates);
    Ok(EstimateReport { estimates, summary })
}

/// Formats a report as human-readable text, one line per estimate.
pub fn format_report(report: &EstimateReport) -> String {
    let mut output = String::new();

    if report.estimates.is_empty() {
        output.push_str("No estimates.\n");
        return output;
    }

    for estimate in &report.estimates {
        write!(
            output,
            "{}  {}  {}  {}",
            estimate.date,
            estimate.project_id,
            format_hours(estimate.hours),
            estimate.source
        )
        .unwrap();
        if let Some(milestone) = &estimate.milestone_id {
            write!(output, " ({milestone})").unwrap();
        }
        output.push('\n');
    }

    writeln!(output, "Total: {}", format_hours(report.summary.total_hours)).unwrap();
    for (source, hours) in &report.summary.by_source {
        writeln!(output, "  {source}: {}", format_hours(*hours)).unwrap();
    }
    if let Some((date, hours)) = report.summary.peak_day() {
        writeln!(output, "Peak: {date} ({})", format_hours(hours)).unwrap();
    }
    output
}

pub fn run<W: Write>(
    writer: &mut W,
    plan: &PlanDocument,
    project: Option<&str>,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let report = build_report(plan, project, today)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(&report))?;
    }

    Ok(())
}
