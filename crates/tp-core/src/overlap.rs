//! Date-range conflict detection between projects on the timeline.
//!
//! Ranges are inclusive. A continuous project has no end: it conflicts with
//! any candidate that ends on or after its start.

use serde::Serialize;

use crate::project::Project;
use crate::types::{DateRange, ProjectId, RowId};

/// How a candidate range overlaps an existing project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapType {
    /// One range fully contains the other.
    Complete,
    /// The ranges share some but not all days.
    Partial,
    /// The ranges only touch on a shared boundary date.
    Adjacent,
}

/// One conflicting project and how it overlaps the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictDetail {
    pub project_id: ProjectId,
    pub overlap_type: OverlapType,
    /// Whole days between the start and end of the shared span, measured
    /// midnight to midnight. A single shared boundary date measures zero.
    pub overlap_days: i64,
}

/// Result of checking a candidate range against a set of projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConflictDetectionResult {
    pub has_conflicts: bool,
    pub conflicting_projects: Vec<Project>,
    pub conflict_details: Vec<ConflictDetail>,
}

/// Which projects an overlap check considers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapScope<'a> {
    exclude_project_id: Option<&'a ProjectId>,
    row_id: Option<&'a RowId>,
}

impl<'a> OverlapScope<'a> {
    /// Every project on every row.
    #[must_use]
    pub const fn all_rows() -> Self {
        Self {
            exclude_project_id: None,
            row_id: None,
        }
    }

    /// Skips the project being moved, so it never conflicts with itself.
    #[must_use]
    pub const fn excluding(mut self, project_id: &'a ProjectId) -> Self {
        self.exclude_project_id = Some(project_id);
        self
    }

    /// Only considers projects on `row_id`.
    #[must_use]
    pub const fn same_row(mut self, row_id: &'a RowId) -> Self {
        self.row_id = Some(row_id);
        self
    }

    fn includes(&self, project: &Project) -> bool {
        if self.exclude_project_id.is_some_and(|id| *id == project.id) {
            return false;
        }
        self.row_id.is_none_or(|row| project.is_on_row(row))
    }
}

/// Inclusive interval intersection test.
pub fn intervals_overlap<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Whether `project` occupies any day of `candidate`.
pub fn project_conflicts_with(project: &Project, candidate: &DateRange) -> bool {
    match project.fixed_end() {
        None => candidate.end >= project.start_date,
        Some(end) => intervals_overlap(candidate.start, candidate.end, project.start_date, end),
    }
}

/// Describes how an already-conflicting `project` overlaps `candidate`.
pub fn classify_overlap(project: &Project, candidate: &DateRange) -> ConflictDetail {
    let project_start = project.start_date;
    // An open-ended project reaches at least as far as the candidate.
    let project_end = project
        .fixed_end()
        .unwrap_or_else(|| candidate.end.max(project_start));

    let shared_start = candidate.start.max(project_start);
    let shared_end = candidate.end.min(project_end);
    let overlap_days = (shared_end - shared_start).num_days().max(0);

    let candidate_inside = project_start <= candidate.start && project_end >= candidate.end;
    let project_inside = project.fixed_end().is_some()
        && candidate.start <= project_start
        && candidate.end >= project_end;

    let overlap_type = if candidate_inside || project_inside {
        OverlapType::Complete
    } else if overlap_days == 0 {
        OverlapType::Adjacent
    } else {
        OverlapType::Partial
    };

    ConflictDetail {
        project_id: project.id.clone(),
        overlap_type,
        overlap_days,
    }
}

/// Checks `candidate` against every project in `scope`.
pub fn check_project_overlap(
    candidate: &DateRange,
    projects: &[Project],
    scope: &OverlapScope<'_>,
) -> ConflictDetectionResult {
    let mut result = ConflictDetectionResult::default();
    for project in projects.iter().filter(|p| scope.includes(p)) {
        if project_conflicts_with(project, candidate) {
            result.conflict_details.push(classify_overlap(project, candidate));
            result.conflicting_projects.push(project.clone());
        }
    }
    result.has_conflicts = !result.conflicting_projects.is_empty();
    tracing::debug!(
        %candidate,
        conflicts = result.conflicting_projects.len(),
        "checked project overlap"
    );
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::date;

    pub(crate) fn placed(id: &str, row: &str, start: NaiveDate, end: Option<NaiveDate>) -> Project {
        Project {
            id: ProjectId::new(id).unwrap(),
            name: None,
            start_date: start,
            end_date: end,
            estimated_hours: 0.0,
            auto_estimate_days: None,
            row_id: RowId::new(row).unwrap(),
            continuous: end.is_none(),
        }
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    #[test]
    fn intervals_overlap_is_inclusive() {
        assert!(intervals_overlap(1, 5, 5, 9));
        assert!(intervals_overlap(3, 4, 1, 9));
        assert!(!intervals_overlap(1, 4, 5, 9));
    }

    #[test]
    fn partial_overlap_is_reported() {
        let a = placed("a", "r1", date(2025, 1, 6), Some(date(2025, 1, 9)));
        let candidate = range(date(2025, 1, 5), date(2025, 1, 8));
        let result = check_project_overlap(&candidate, &[a], &OverlapScope::all_rows());

        assert!(result.has_conflicts);
        assert_eq!(result.conflict_details.len(), 1);
        assert_eq!(result.conflict_details[0].overlap_type, OverlapType::Partial);
        assert_eq!(result.conflict_details[0].overlap_days, 2);
    }

    #[test]
    fn containment_is_complete_in_both_directions() {
        let wide = placed("wide", "r1", date(2025, 1, 1), Some(date(2025, 1, 31)));
        let inner = range(date(2025, 1, 10), date(2025, 1, 12));
        assert_eq!(
            classify_overlap(&wide, &inner).overlap_type,
            OverlapType::Complete
        );

        let narrow = placed("narrow", "r1", date(2025, 1, 10), Some(date(2025, 1, 12)));
        let outer = range(date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(
            classify_overlap(&narrow, &outer).overlap_type,
            OverlapType::Complete
        );
    }

    #[test]
    fn shared_boundary_date_is_adjacent() {
        let a = placed("a", "r1", date(2025, 1, 1), Some(date(2025, 1, 5)));
        let candidate = range(date(2025, 1, 5), date(2025, 1, 9));
        let result = check_project_overlap(&candidate, &[a], &OverlapScope::all_rows());

        assert!(result.has_conflicts);
        assert_eq!(result.conflict_details[0].overlap_type, OverlapType::Adjacent);
        assert_eq!(result.conflict_details[0].overlap_days, 0);
    }

    #[test]
    fn excluded_project_never_conflicts_with_itself() {
        let a = placed("a", "r1", date(2025, 1, 1), Some(date(2025, 1, 10)));
        let candidate = range(date(2025, 1, 2), date(2025, 1, 4));
        let result = check_project_overlap(
            &candidate,
            std::slice::from_ref(&a),
            &OverlapScope::all_rows().excluding(&a.id),
        );
        assert!(!result.has_conflicts);
        assert!(result.conflicting_projects.is_empty());
    }

    #[test]
    fn same_row_scope_ignores_other_rows() {
        let a = placed("a", "r1", date(2025, 1, 1), Some(date(2025, 1, 10)));
        let b = placed("b", "r2", date(2025, 1, 1), Some(date(2025, 1, 10)));
        let candidate = range(date(2025, 1, 2), date(2025, 1, 4));
        let row = RowId::new("r2").unwrap();

        let result = check_project_overlap(&candidate, &[a, b], &OverlapScope::all_rows().same_row(&row));
        assert_eq!(result.conflicting_projects.len(), 1);
        assert_eq!(result.conflicting_projects[0].id.as_str(), "b");
    }

    #[test]
    fn continuous_project_blocks_everything_from_its_start() {
        let c = placed("c", "r1", date(2025, 1, 1), None);

        let far_future = range(date(2030, 6, 1), date(2030, 6, 5));
        assert!(project_conflicts_with(&c, &far_future));

        let ends_on_start = range(date(2024, 12, 20), date(2025, 1, 1));
        assert!(project_conflicts_with(&c, &ends_on_start));

        let ends_before = range(date(2024, 12, 20), date(2024, 12, 31));
        assert!(!project_conflicts_with(&c, &ends_before));
    }

    #[test]
    fn continuous_project_classification() {
        let c = placed("c", "r1", date(2025, 1, 1), None);

        let inside = range(date(2025, 3, 1), date(2025, 3, 4));
        let detail = classify_overlap(&c, &inside);
        assert_eq!(detail.overlap_type, OverlapType::Complete);
        assert_eq!(detail.overlap_days, 3);

        let straddling = range(date(2024, 12, 28), date(2025, 1, 3));
        let detail = classify_overlap(&c, &straddling);
        assert_eq!(detail.overlap_type, OverlapType::Partial);
        assert_eq!(detail.overlap_days, 2);
    }

    #[test]
    fn continuous_flag_ignores_stored_end_date() {
        let mut c = placed("c", "r1", date(2025, 1, 1), Some(date(2025, 1, 10)));
        c.continuous = true;
        let later = range(date(2025, 2, 1), date(2025, 2, 3));
        assert!(project_conflicts_with(&c, &later));
    }
}
