//! Working-day eligibility.
//!
//! A date can receive allocated hours when it is not inside any holiday and
//! its weekday is enabled, either by the project's own auto-estimate flags or,
//! failing that, by the user's weekly work hours.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::project::Project;
use crate::types::DateRange;

/// An inclusive range of days off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Holiday {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// One block of working time within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Work slots for each day of the week. Days without slots are days off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWorkHours {
    #[serde(default)]
    pub monday: Vec<WorkSlot>,
    #[serde(default)]
    pub tuesday: Vec<WorkSlot>,
    #[serde(default)]
    pub wednesday: Vec<WorkSlot>,
    #[serde(default)]
    pub thursday: Vec<WorkSlot>,
    #[serde(default)]
    pub friday: Vec<WorkSlot>,
    #[serde(default)]
    pub saturday: Vec<WorkSlot>,
    #[serde(default)]
    pub sunday: Vec<WorkSlot>,
}

impl WeeklyWorkHours {
    /// Monday to Friday, 09:00 to 17:00.
    #[must_use]
    pub fn standard() -> Self {
        let day = vec![WorkSlot {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }];
        Self {
            monday: day.clone(),
            tuesday: day.clone(),
            wednesday: day.clone(),
            thursday: day.clone(),
            friday: day,
            saturday: Vec::new(),
            sunday: Vec::new(),
        }
    }

    #[must_use]
    pub fn slots_for(&self, weekday: Weekday) -> &[WorkSlot] {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

/// User-level scheduling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "WeeklyWorkHours::standard")]
    pub weekly_work_hours: WeeklyWorkHours,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weekly_work_hours: WeeklyWorkHours::standard(),
        }
    }
}

/// Whether `date` can receive allocated hours.
///
/// Holidays always win. Otherwise the project's `auto_estimate_days` decide,
/// and without those the weekday must have at least one work slot.
pub fn is_working_day(
    date: NaiveDate,
    project: Option<&Project>,
    settings: &Settings,
    holidays: &[Holiday],
) -> bool {
    if holidays.iter().any(|holiday| holiday.contains(date)) {
        return false;
    }
    let weekday = date.weekday();
    match project.and_then(|p| p.auto_estimate_days.as_ref()) {
        Some(days) => days.is_enabled(weekday),
        None => !settings.weekly_work_hours.slots_for(weekday).is_empty(),
    }
}

/// Borrowed view over the settings and holidays of one computation.
#[derive(Debug, Clone, Copy)]
pub struct WorkingDayCalendar<'a> {
    settings: &'a Settings,
    holidays: &'a [Holiday],
}

impl<'a> WorkingDayCalendar<'a> {
    pub const fn new(settings: &'a Settings, holidays: &'a [Holiday]) -> Self {
        Self { settings, holidays }
    }

    pub fn is_working_day(&self, date: NaiveDate, project: Option<&Project>) -> bool {
        is_working_day(date, project, self.settings, self.holidays)
    }

    /// Working days in `range`, in order.
    pub fn working_days_in(&self, range: DateRange, project: Option<&Project>) -> Vec<NaiveDate> {
        range
            .iter_days()
            .filter(|date| self.is_working_day(*date, project))
            .collect()
    }
}
