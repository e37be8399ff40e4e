//! Overlap command for checking a candidate range against the timeline.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use tp_core::{
    ConflictDetectionResult, DateRange, OverlapScope, ProjectId, RowId, check_project_overlap,
};

use crate::PlanDocument;

/// Checks `candidate` against the plan, narrowed by `exclude` and `row`.
pub fn check(
    plan: &PlanDocument,
    candidate: &DateRange,
    exclude: Option<&str>,
    row: Option<&str>,
) -> Result<ConflictDetectionResult> {
    let exclude = exclude.map(ProjectId::new).transpose()?;
    let row = row.map(RowId::new).transpose()?;

    let mut scope = OverlapScope::all_rows();
    if let Some(id) = &exclude {
        scope = scope.excluding(id);
    }
    if let Some(row) = &row {
        scope = scope.same_row(row);
    }
    Ok(check_project_overlap(candidate, &plan.projects, &scope))
}

/// Formats a detection result as human-readable text.
pub fn format_result(candidate: &DateRange, result: &ConflictDetectionResult) -> String {
    let mut output = String::new();

    if !result.has_conflicts {
        writeln!(output, "No conflicts for {candidate}.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{} conflict(s) for {candidate}:",
        result.conflict_details.len()
    )
    .unwrap();
    for (detail, project) in result
        .conflict_details
        .iter()
        .zip(&result.conflicting_projects)
    {
        let end = project
            .fixed_end()
            .map_or_else(|| "ongoing".to_string(), |end| end.to_string());
        writeln!(
            output,
            "  {}  {}..{}  {:?}, {} day(s)",
            detail.project_id, project.start_date, end, detail.overlap_type, detail.overlap_days
        )
        .unwrap();
    }
    output
}

pub fn run<W: Write>(
    writer: &mut W,
    plan: &PlanDocument,
    candidate: &DateRange,
    exclude: Option<&str>,
    row: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = check(plan, candidate, exclude, row)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        write!(writer, "{}", format_result(candidate, &result))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insta::assert_snapshot;

    const PLAN: &str = r#"{
        "projects": [
            {"id": "a", "start_date": "2025-01-06", "end_date": "2025-01-09", "row_id": "r1"},
            {"id": "b", "start_date": "2025-01-05", "end_date": "2025-01-08", "row_id": "r1"},
            {"id": "c", "start_date": "2025-01-01", "row_id": "r2", "continuous": true}
        ]
    }"#;

    fn plan() -> PlanDocument {
        serde_json::from_str(PLAN).unwrap()
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, start).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, end).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_all_rows_snapshot() {
        let candidate = range(5, 8);
        let result = check(&plan(), &candidate, Some("b"), None).unwrap();
        assert_snapshot!(format_result(&candidate, &result), @r"
        2 conflict(s) for 2025-01-05..=2025-01-08:
          a  2025-01-06..2025-01-09  Partial, 2 day(s)
          c  2025-01-01..ongoing  Complete, 3 day(s)
        ");
    }

    #[test]
    fn test_row_scope() {
        let candidate = range(5, 8);
        let result = check(&plan(), &candidate, Some("b"), Some("r1")).unwrap();
        assert_eq!(result.conflicting_projects.len(), 1);
        assert_eq!(result.conflict_details[0].project_id.as_str(), "a");
    }

    #[test]
    fn test_no_conflicts_snapshot() {
        let candidate = range(20, 22);
        let result = check(&plan(), &candidate, None, Some("r1")).unwrap();
        assert_snapshot!(format_result(&candidate, &result), @"No conflicts for 2025-01-20..=2025-01-22.");
    }

    #[test]
    fn test_json_output() {
        let mut output = Vec::new();
        run(&mut output, &plan(), &range(5, 8), Some("b"), Some("r1"), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["has_conflicts"], true);
        assert_eq!(value["conflict_details"][0]["overlap_type"], "partial");
    }

    #[test]
    fn test_invalid_row_is_an_error() {
        assert!(check(&plan(), &range(5, 8), None, Some("")).is_err());
    }
}
