//! Scheduling core for the timeline planner.
//!
//! This crate contains the pure, synchronous logic for:
//! - Day estimates: how many hours each project is expected to take on each
//!   day, reconciling logged events, milestone budgets and project budgets
//! - Overlap resolution: detecting date conflicts between projects sharing a
//!   timeline row and finding a nearby free slot
//!
//! Nothing here performs I/O or keeps state between calls.

mod allocation;
pub mod calendar;
pub mod classify;
mod conflict;
mod estimate;
pub mod event;
pub mod overlap;
pub mod project;
pub mod recurrence;
mod slot;
mod summary;
pub mod types;

pub use allocation::{DayAllocation, allocate_segment, remaining_hours, spread_evenly};
pub use calendar::{Holiday, Settings, WeeklyWorkHours, WorkSlot, WorkingDayCalendar, is_working_day};
pub use classify::{DayEventHours, EventsByDate, classify_events};
pub use conflict::{
    AdjustmentReason, DateAdjustmentResult, detect_live_drag_conflicts, resolve_drag_conflicts,
    resolve_drag_conflicts_with,
};
pub use estimate::{
    DayEstimate, EstimateSource, compute_all_estimates, compute_project_estimates,
    compute_project_estimates_as_of,
};
pub use event::CalendarEvent;
pub use overlap::{
    ConflictDetail, ConflictDetectionResult, OverlapScope, OverlapType, check_project_overlap,
};
pub use project::{AutoEstimateDays, Milestone, MonthlyRule, Project, RecurringConfig};
pub use recurrence::generate_occurrences;
pub use slot::{SlotSearchConfig, find_nearest_available_slot, find_nearest_available_slot_with};
pub use summary::{EstimateSummary, summarize_estimates};
pub use types::{
    ConflictStrategy, DateRange, EventId, MilestoneId, ProjectId, RowId, ValidationError,
};
