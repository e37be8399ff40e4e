//! Resolve command: validates a drag of one project and applies a conflict
//! strategy when the new position collides with its row.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tp_core::{
    ConflictDetail, ConflictStrategy, DateAdjustmentResult, DateRange, Project, ProjectId, RowId,
    SlotSearchConfig, detect_live_drag_conflicts, resolve_drag_conflicts_with,
};

use crate::PlanDocument;

/// JSON output shape.
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub project_id: ProjectId,
    pub row_id: RowId,
    pub strategy: ConflictStrategy,
    pub conflicts: Vec<ConflictDetail>,
    pub result: DateAdjustmentResult,
}

/// Checks `requested` for `project_id` and resolves any conflict.
///
/// Once a conflict is found, slot search avoids every other project on the
/// row, not only the ones that overlap the request.
pub fn resolve(
    plan: &PlanDocument,
    project_id: &str,
    requested: &DateRange,
    row: Option<&str>,
    strategy: ConflictStrategy,
    search: &SlotSearchConfig,
) -> Result<ResolveReport> {
    let project = plan.project(project_id)?;
    let row_id = match row {
        Some(row) => RowId::new(row)?,
        None => project.row_id.clone(),
    };

    let detection = detect_live_drag_conflicts(requested, &plan.projects, &project.id, &row_id);
    let row_projects: Vec<Project> = if detection.has_conflicts {
        plan.projects
            .iter()
            .filter(|p| p.id != project.id && p.is_on_row(&row_id))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let result = resolve_drag_conflicts_with(requested, &row_projects, strategy, search);
    Ok(ResolveReport {
        project_id: project.id.clone(),
        row_id,
        strategy,
        conflicts: detection.conflict_details,
        result,
    })
}

/// Formats a report as human-readable text.
pub fn format_report(report: &ResolveReport) -> String {
    let mut output = String::new();
    let result = &report.result;
    let original = DateRange {
        start: result.original_start_date,
        end: result.original_end_date,
    };

    writeln!(
        output,
        "{} on {}: requested {original} ({})",
        report.project_id, report.row_id, report.strategy
    )
    .unwrap();
    for detail in &report.conflicts {
        writeln!(
            output,
            "  conflicts with {} ({:?}, {} day(s))",
            detail.project_id, detail.overlap_type, detail.overlap_days
        )
        .unwrap();
    }

    match &result.adjustment_reason {
        None => output.push_str("OK: no conflicts\n"),
        Some(reason) if result.was_adjusted => {
            writeln!(output, "Adjusted to {}: {reason}", result.adjusted_range()).unwrap();
        }
        Some(reason) => {
            writeln!(output, "Kept {original}: {reason}").unwrap();
        }
    }
    output
}

#[expect(
    clippy::too_many_arguments,
    reason = "mirrors the resolve subcommand's flags"
)]
pub fn run<W: Write>(
    writer: &mut W,
    plan: &PlanDocument,
    project_id: &str,
    requested: &DateRange,
    row: Option<&str>,
    strategy: ConflictStrategy,
    search: &SlotSearchConfig,
    json: bool,
) -> Result<()> {
    let report = resolve(plan, project_id, requested, row, strategy, search)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(&report))?;
    }

    Ok(())
}
