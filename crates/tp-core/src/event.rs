//! Logged calendar events.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, ProjectId};

/// A block of time logged against a project.
///
/// Timestamps are local wall-clock times; the event belongs to the calendar
/// date of its start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,

    pub project_id: ProjectId,

    pub start_time: NaiveDateTime,

    pub end_time: NaiveDateTime,

    /// Completed events count as done work; others are still planned.
    #[serde(default)]
    pub completed: bool,
}

impl CalendarEvent {
    /// Duration in hours. Events ending before they start count as zero.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "event durations in seconds are far below f64 precision limits"
    )]
    pub fn duration_hours(&self) -> f64 {
        let seconds = (self.end_time - self.start_time).num_seconds().max(0);
        seconds as f64 / 3600.0
    }

    /// The calendar date the event is attributed to.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}
