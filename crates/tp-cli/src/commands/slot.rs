//! Slot command: the nearest free placement for a range.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tp_core::{
    DateRange, Project, ProjectId, RowId, SlotSearchConfig, find_nearest_available_slot_with,
};

use crate::PlanDocument;

#[derive(Debug, Serialize)]
pub struct SlotReport {
    pub requested: DateRange,
    pub slot: Option<DateRange>,
}

/// Searches for a free slot among the plan's projects, optionally limited to
/// one row and ignoring one project.
pub fn find(
    plan: &PlanDocument,
    requested: &DateRange,
    row: Option<&str>,
    exclude: Option<&str>,
    search: &SlotSearchConfig,
) -> Result<SlotReport> {
    let row = row.map(RowId::new).transpose()?;
    let exclude = exclude.map(ProjectId::new).transpose()?;

    let existing: Vec<Project> = plan
        .projects
        .iter()
        .filter(|p| exclude.as_ref().is_none_or(|id| p.id != *id))
        .filter(|p| row.as_ref().is_none_or(|row| p.is_on_row(row)))
        .cloned()
        .collect();

    let slot = find_nearest_available_slot_with(requested, &existing, search);
    Ok(SlotReport {
        requested: *requested,
        slot,
    })
}

pub fn format_report(report: &SlotReport) -> String {
    match report.slot {
        Some(slot) => format!("Nearest free slot for {}: {slot}\n", report.requested),
        None => format!("No free slot near {}\n", report.requested),
    }
}

pub fn run<W: Write>(
    writer: &mut W,
    plan: &PlanDocument,
    requested: &DateRange,
    row: Option<&str>,
    exclude: Option<&str>,
    search: &SlotSearchConfig,
    json: bool,
) -> Result<()> {
    let report = find(plan, requested, row, exclude, search)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(&report))?;
    }

    Ok(())
}
