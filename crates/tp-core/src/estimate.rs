//! Per-day hour estimates for a project.
//!
//! Three sources compete for each date, in strict priority order:
//!
//! 1. Logged events. A date with event hours is blocked for every other source.
//! 2. Milestone budgets, walked in end-date order. Each milestone spreads what
//!    is left of its allocation over its segment; recurring milestones do this
//!    once per recurrence sub-interval.
//! 3. The project's own `estimated_hours`, only when the project has no
//!    milestones and is not continuous.
//!
//! Each date receives at most one source, so the concatenation needs no
//! deduplication. Everything is recomputed from the inputs on every call.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::allocation::{DayAllocation, allocate_segment, remaining_hours, spread_evenly};
use crate::calendar::{Holiday, Settings, WorkingDayCalendar};
use crate::classify::{EventsByDate, classify_events, event_hours_in};
use crate::event::CalendarEvent;
use crate::project::{Milestone, Project};
use crate::recurrence::generate_occurrences;
use crate::types::{DateRange, MilestoneId, ProjectId};

/// Where a day's hours came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateSource {
    Event,
    MilestoneAllocation,
    ProjectAutoEstimate,
}

impl EstimateSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::MilestoneAllocation => "milestone-allocation",
            Self::ProjectAutoEstimate => "project-auto-estimate",
        }
    }
}

impl std::fmt::Display for EstimateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estimated hours for one project on one day. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEstimate {
    pub date: NaiveDate,
    pub project_id: ProjectId,
    pub hours: f64,
    pub source: EstimateSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<MilestoneId>,
    pub is_working_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_planned_event: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed_event: Option<bool>,
}

/// Day estimates for `project`, considering every date in its window.
pub fn compute_project_estimates(
    project: &Project,
    milestones: &[Milestone],
    events: &[CalendarEvent],
    holidays: &[Holiday],
    settings: &Settings,
) -> Vec<DayEstimate> {
    compute_project_estimates_as_of(project, milestones, events, holidays, settings, None)
}

/// Like [`compute_project_estimates`], but auto-estimate hours are only
/// spread over dates on or after `today`.
///
/// Read the current date once per render and pass it to every call, so one
/// timeline never mixes two notions of "today".
pub fn compute_project_estimates_as_of(
    project: &Project,
    milestones: &[Milestone],
    events: &[CalendarEvent],
    holidays: &[Holiday],
    settings: &Settings,
    today: Option<NaiveDate>,
) -> Vec<DayEstimate> {
    let calendar = WorkingDayCalendar::new(settings, holidays);
    let by_date = classify_events(events.iter().filter(|e| e.project_id == project.id));

    let mut estimates = Vec::new();
    let mut blocked = BTreeSet::new();

    for (&date, hours) in &by_date {
        if hours.total() <= 0.0 {
            continue;
        }
        blocked.insert(date);
        estimates.push(DayEstimate {
            date,
            project_id: project.id.clone(),
            hours: hours.total(),
            source: EstimateSource::Event,
            milestone_id: None,
            is_working_day: calendar.is_working_day(date, Some(project)),
            is_planned_event: Some(hours.planned_hours > 0.0),
            is_completed_event: Some(hours.completed_hours > 0.0),
        });
    }
    let event_count = estimates.len();

    let mut project_milestones: Vec<&Milestone> = milestones
        .iter()
        .filter(|m| m.project_id == project.id)
        .collect();
    project_milestones.sort_by_key(|m| m.end_date);

    let allocator = ProjectAllocator {
        project,
        calendar,
        by_date: &by_date,
        blocked: &blocked,
    };

    if project_milestones.is_empty() {
        estimates.extend(allocator.auto_estimates(today));
    } else {
        let mut previous_end: Option<NaiveDate> = None;
        for milestone in project_milestones {
            let segment_start = milestone
                .start_date
                .or_else(|| previous_end.map(|end| end + Duration::days(1)))
                .unwrap_or(project.start_date);
            previous_end = Some(milestone.end_date);
            estimates.extend(allocator.milestone_estimates(milestone, segment_start));
        }
    }

    tracing::debug!(
        project = %project.id,
        events = event_count,
        total = estimates.len(),
        "computed day estimates"
    );
    estimates
}

/// Runs [`compute_project_estimates_as_of`] for every project in parallel.
///
/// Output keeps the order of `projects`.
pub fn compute_all_estimates(
    projects: &[Project],
    milestones: &[Milestone],
    events: &[CalendarEvent],
    holidays: &[Holiday],
    settings: &Settings,
    today: Option<NaiveDate>,
) -> Vec<DayEstimate> {
    projects
        .par_iter()
        .map(|project| {
            compute_project_estimates_as_of(project, milestones, events, holidays, settings, today)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Shared state for allocating one project's milestone and fallback budgets.
struct ProjectAllocator<'a> {
    project: &'a Project,
    calendar: WorkingDayCalendar<'a>,
    by_date: &'a EventsByDate,
    blocked: &'a BTreeSet<NaiveDate>,
}

impl ProjectAllocator<'_> {
    fn milestone_estimates(
        &self,
        milestone: &Milestone,
        segment_start: NaiveDate,
    ) -> Vec<DayEstimate> {
        // Events across the whole segment can exhaust a recurring budget too.
        if let Ok(segment) = DateRange::new(segment_start, milestone.end_date) {
            let consumed = event_hours_in(self.by_date, segment);
            if remaining_hours(milestone.time_allocation_hours, consumed) <= 0.0 {
                tracing::debug!(
                    milestone = %milestone.id,
                    %segment,
                    consumed,
                    "milestone budget already consumed"
                );
                return Vec::new();
            }
        }

        let allocations = match milestone.recurrence() {
            Some(config) => {
                let anchors = generate_occurrences(
                    config,
                    self.project.start_date,
                    self.project.fixed_end(),
                    self.project.continuous,
                );
                let bounds = self.project.window();
                anchors
                    .windows(2)
                    .filter_map(|pair| {
                        DateRange::new(pair[0] + Duration::days(1), pair[1])
                            .ok()
                            .and_then(|sub| sub.clamp_to(&bounds))
                    })
                    .flat_map(|sub| self.allocate(milestone, sub))
                    .collect()
            }
            None => match DateRange::new(segment_start, milestone.end_date) {
                Ok(segment) => self.allocate(milestone, segment),
                Err(err) => {
                    tracing::debug!(milestone = %milestone.id, %err, "skipping empty milestone segment");
                    Vec::new()
                }
            },
        };

        allocations
            .into_iter()
            .map(|allocation| DayEstimate {
                date: allocation.date,
                project_id: self.project.id.clone(),
                hours: allocation.hours,
                source: EstimateSource::MilestoneAllocation,
                milestone_id: Some(milestone.id.clone()),
                is_working_day: true,
                is_planned_event: None,
                is_completed_event: None,
            })
            .collect()
    }

    /// Allocates one segment, then drops blocked and out-of-project days and
    /// spreads the same remaining budget over the survivors.
    fn allocate(&self, milestone: &Milestone, segment: DateRange) -> Vec<DayAllocation> {
        let consumed = event_hours_in(self.by_date, segment);
        let remaining = remaining_hours(milestone.time_allocation_hours, consumed);
        if remaining <= 0.0 {
            return Vec::new();
        }

        let candidates = allocate_segment(
            segment,
            milestone.time_allocation_hours,
            consumed,
            |date| self.calendar.is_working_day(date, Some(self.project)),
        );
        let fixed_end = self.project.fixed_end();
        let survivors: Vec<NaiveDate> = candidates
            .iter()
            .map(|allocation| allocation.date)
            .filter(|date| !self.blocked.contains(date))
            .filter(|date| fixed_end.is_none_or(|end| *date <= end))
            .collect();

        if survivors.len() == candidates.len() {
            return candidates;
        }
        tracing::debug!(
            milestone = %milestone.id,
            %segment,
            candidates = candidates.len(),
            survivors = survivors.len(),
            remaining,
            "redistributing milestone hours"
        );
        spread_evenly(&survivors, remaining)
    }

    fn auto_estimates(&self, today: Option<NaiveDate>) -> Vec<DayEstimate> {
        let project = self.project;
        let budget = project.estimated_hours;
        if project.continuous || !budget.is_finite() || budget <= 0.0 {
            return Vec::new();
        }

        let window = project.window();
        let consumed = event_hours_in(self.by_date, window);
        let remaining = remaining_hours(budget, consumed);
        let eligible: Vec<NaiveDate> = self
            .calendar
            .working_days_in(window, Some(project))
            .into_iter()
            .filter(|date| today.is_none_or(|today| *date >= today))
            .filter(|date| !self.blocked.contains(date))
            .collect();

        spread_evenly(&eligible, remaining)
            .into_iter()
            .map(|allocation| DayEstimate {
                date: allocation.date,
                project_id: project.id.clone(),
                hours: allocation.hours,
                source: EstimateSource::ProjectAutoEstimate,
                milestone_id: None,
                is_working_day: true,
                is_planned_event: None,
                is_completed_event: None,
            })
            .collect()
    }
}
