//! Groups logged events by calendar date and splits planned from completed hours.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::CalendarEvent;
use crate::types::DateRange;

/// Event hours logged on one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DayEventHours {
    /// Hours from events not yet marked completed.
    pub planned_hours: f64,
    /// Hours from completed events.
    pub completed_hours: f64,
}

impl DayEventHours {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.planned_hours + self.completed_hours
    }
}

/// Event hours keyed by date, in date order.
pub type EventsByDate = BTreeMap<NaiveDate, DayEventHours>;

/// Sums event durations per start date, keeping planned and completed apart.
///
/// Callers pass events for a single project.
pub fn classify_events<'a, I>(events: I) -> EventsByDate
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut by_date = EventsByDate::new();
    for event in events {
        let day = by_date.entry(event.date()).or_default();
        if event.completed {
            day.completed_hours += event.duration_hours();
        } else {
            day.planned_hours += event.duration_hours();
        }
    }
    by_date
}

/// Planned plus completed hours logged inside `range`.
pub fn event_hours_in(by_date: &EventsByDate, range: DateRange) -> f64 {
    by_date
        .range(range.start..=range.end)
        .map(|(_, hours)| hours.total())
        .sum()
}
