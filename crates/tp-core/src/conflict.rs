//! Turns a detected drag/resize conflict into an accept, adjust, reject or
//! force decision.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::overlap::{ConflictDetectionResult, OverlapScope, check_project_overlap};
use crate::project::Project;
use crate::slot::{SlotSearchConfig, find_nearest_available_slot_with};
use crate::types::{ConflictStrategy, DateRange, ProjectId, RowId};

/// Why a request was (or was not) moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentReason {
    Rejected,
    Forced,
    NoSlotFound,
    Moved { days: i64 },
}

impl fmt::Display for AdjustmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "conflicts detected — rejected"),
            Self::Forced => write!(f, "forced — conflicts ignored"),
            Self::NoSlotFound => write!(f, "no suitable slot found"),
            Self::Moved { days } => {
                let unit = if days.abs() == 1 { "day" } else { "days" };
                write!(f, "moved {days} {unit} to the nearest free slot")
            }
        }
    }
}

impl Serialize for AdjustmentReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Outcome of resolving a requested placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateAdjustmentResult {
    pub original_start_date: NaiveDate,
    pub original_end_date: NaiveDate,
    pub adjusted_start_date: NaiveDate,
    pub adjusted_end_date: NaiveDate,
    pub was_adjusted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_reason: Option<AdjustmentReason>,
    /// Signed day offset from the requested start to the adjusted start.
    pub days_moved: i64,
}

impl DateAdjustmentResult {
    fn unchanged(requested: &DateRange, reason: Option<AdjustmentReason>) -> Self {
        Self {
            original_start_date: requested.start,
            original_end_date: requested.end,
            adjusted_start_date: requested.start,
            adjusted_end_date: requested.end,
            was_adjusted: false,
            adjustment_reason: reason,
            days_moved: 0,
        }
    }

    /// The range the caller should commit.
    #[must_use]
    pub const fn adjusted_range(&self) -> DateRange {
        DateRange {
            start: self.adjusted_start_date,
            end: self.adjusted_end_date,
        }
    }
}

/// Resolves `requested` against `conflicting_projects` using `strategy`.
///
/// With no conflicting projects the request passes through unchanged.
pub fn resolve_drag_conflicts(
    requested: &DateRange,
    conflicting_projects: &[Project],
    strategy: ConflictStrategy,
) -> DateAdjustmentResult {
    resolve_drag_conflicts_with(
        requested,
        conflicting_projects,
        strategy,
        &SlotSearchConfig::default(),
    )
}

/// Like [`resolve_drag_conflicts`] with an explicit slot search bound.
pub fn resolve_drag_conflicts_with(
    requested: &DateRange,
    conflicting_projects: &[Project],
    strategy: ConflictStrategy,
    search: &SlotSearchConfig,
) -> DateAdjustmentResult {
    if conflicting_projects.is_empty() {
        return DateAdjustmentResult::unchanged(requested, None);
    }

    let result = match strategy {
        ConflictStrategy::Reject => {
            DateAdjustmentResult::unchanged(requested, Some(AdjustmentReason::Rejected))
        }
        ConflictStrategy::Force => {
            DateAdjustmentResult::unchanged(requested, Some(AdjustmentReason::Forced))
        }
        ConflictStrategy::Adjust => {
            match find_nearest_available_slot_with(requested, conflicting_projects, search) {
                Some(slot) => {
                    let days = (slot.start - requested.start).num_days();
                    DateAdjustmentResult {
                        original_start_date: requested.start,
                        original_end_date: requested.end,
                        adjusted_start_date: slot.start,
                        adjusted_end_date: slot.end,
                        was_adjusted: true,
                        adjustment_reason: Some(AdjustmentReason::Moved { days }),
                        days_moved: days,
                    }
                }
                None => DateAdjustmentResult::unchanged(
                    requested,
                    Some(AdjustmentReason::NoSlotFound),
                ),
            }
        }
    };

    tracing::debug!(
        %requested,
        %strategy,
        was_adjusted = result.was_adjusted,
        days_moved = result.days_moved,
        "resolved drag conflict"
    );
    result
}

/// Is this interactive drag position valid on its row?
///
/// Only projects on `row_id` are considered, and the dragged project is
/// excluded from its own check.
pub fn detect_live_drag_conflicts(
    candidate: &DateRange,
    projects: &[Project],
    dragged_project_id: &ProjectId,
    row_id: &RowId,
) -> ConflictDetectionResult {
    let scope = OverlapScope::all_rows()
        .excluding(dragged_project_id)
        .same_row(row_id);
    check_project_overlap(candidate, projects, &scope)
}
