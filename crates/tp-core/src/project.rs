//! Projects, milestones and phases as seen by the scheduling core.

use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{DateRange, MilestoneId, ProjectId, RowId, ValidationError};

/// How far past its start a continuous project is planned.
pub const CONTINUOUS_HORIZON_DAYS: i64 = 365;

/// A project placed on a timeline row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub start_date: NaiveDate,

    /// Ignored when `continuous` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Total budget used by the auto-estimate fallback.
    #[serde(default)]
    pub estimated_hours: f64,

    /// Per-weekday opt-in for allocation. When absent, the user's weekly
    /// work hours decide which weekdays are eligible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_estimate_days: Option<AutoEstimateDays>,

    pub row_id: RowId,

    /// Open-ended project: no fixed end, blocks its row indefinitely.
    #[serde(default)]
    pub continuous: bool,
}

impl Project {
    /// The end date used for allocation and overlap, `None` for continuous projects.
    ///
    /// A non-continuous project without an end date is treated as lasting one day.
    #[must_use]
    pub fn fixed_end(&self) -> Option<NaiveDate> {
        if self.continuous {
            None
        } else {
            Some(self.end_date.unwrap_or(self.start_date).max(self.start_date))
        }
    }

    /// The dates this project may receive allocations on.
    ///
    /// Continuous projects are bounded by [`CONTINUOUS_HORIZON_DAYS`].
    #[must_use]
    pub fn window(&self) -> DateRange {
        let end = self
            .fixed_end()
            .unwrap_or_else(|| self.start_date + Duration::days(CONTINUOUS_HORIZON_DAYS));
        DateRange {
            start: self.start_date,
            end,
        }
    }

    #[must_use]
    pub fn is_on_row(&self, row_id: &RowId) -> bool {
        &self.row_id == row_id
    }
}

const fn enabled() -> bool {
    true
}

/// Weekday flags controlling which days a project accepts allocations on.
///
/// Days missing from input default to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one flag per weekday mirrors the stored settings"
)]
pub struct AutoEstimateDays {
    #[serde(default = "enabled")]
    pub monday: bool,
    #[serde(default = "enabled")]
    pub tuesday: bool,
    #[serde(default = "enabled")]
    pub wednesday: bool,
    #[serde(default = "enabled")]
    pub thursday: bool,
    #[serde(default = "enabled")]
    pub friday: bool,
    #[serde(default = "enabled")]
    pub saturday: bool,
    #[serde(default = "enabled")]
    pub sunday: bool,
}

impl Default for AutoEstimateDays {
    fn default() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: true,
            sunday: true,
        }
    }
}

impl AutoEstimateDays {
    /// Monday through Friday enabled, weekends off.
    #[must_use]
    pub const fn weekdays() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

/// A budgeted checkpoint inside a project.
///
/// A milestone with an explicit `start_date` is a phase: its segment starts
/// there instead of the day after the previous milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,

    pub project_id: ProjectId,

    #[serde(alias = "due_date")]
    pub end_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub time_allocation_hours: f64,

    #[serde(default)]
    pub is_recurring: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_config: Option<RecurringConfig>,
}

impl Milestone {
    /// The recurrence pattern, if this milestone recurs and has one configured.
    #[must_use]
    pub fn recurrence(&self) -> Option<&RecurringConfig> {
        if self.is_recurring {
            self.recurring_config.as_ref()
        } else {
            None
        }
    }
}

const fn default_interval() -> u32 {
    1
}

/// How a recurring milestone repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecurringConfig {
    /// Every `interval` days, anchored on the project start.
    Daily {
        #[serde(default = "default_interval")]
        interval: u32,
    },
    /// On `day_of_week`, every `interval` weeks.
    Weekly {
        #[serde(default = "default_interval")]
        interval: u32,
        day_of_week: Weekday,
    },
    /// Once every `interval` months.
    Monthly {
        #[serde(default = "default_interval")]
        interval: u32,
        rule: MonthlyRule,
    },
}

/// Which day of the month a monthly recurrence lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum MonthlyRule {
    /// A fixed day of the month, clamped to the month's last day.
    Date { day: u32 },
    /// The Nth `day_of_week` of the month; `week_of_month = 5` means the last one.
    DayOfWeek {
        week_of_month: u32,
        day_of_week: Weekday,
    },
}

impl RecurringConfig {
    /// Step size in pattern units. Zero is treated as one.
    #[must_use]
    pub fn interval(&self) -> u32 {
        let raw = match self {
            Self::Daily { interval }
            | Self::Weekly { interval, .. }
            | Self::Monthly { interval, .. } => *interval,
        };
        raw.max(1)
    }

    /// Reports fields that the expander would have to clamp.
    pub const fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Monthly {
                rule: MonthlyRule::Date { day },
                ..
            } if *day < 1 || *day > 31 => Err(ValidationError::OutOfRange {
                field: "monthly date",
                value: *day,
                min: 1,
                max: 31,
            }),
            Self::Monthly {
                rule: MonthlyRule::DayOfWeek { week_of_month, .. },
                ..
            } if *week_of_month < 1 || *week_of_month > 5 => Err(ValidationError::OutOfRange {
                field: "week of month",
                value: *week_of_month,
                min: 1,
                max: 5,
            }),
            _ => Ok(()),
        }
    }
}
