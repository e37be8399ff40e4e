//! Core type definitions with validation.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A date range whose start falls after its end.
    #[error("range start {start} is after range end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    /// Invalid conflict strategy value.
    #[error("invalid conflict strategy: {value}")]
    InvalidStrategy { value: String },

    /// A recurrence field outside its allowed range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated project identifier.
    ProjectId, "project ID"
);

define_string_id!(
    /// A validated milestone (or phase) identifier.
    MilestoneId, "milestone ID"
);

define_string_id!(
    /// A validated calendar event identifier.
    EventId, "event ID"
);

define_string_id!(
    /// A validated timeline row identifier.
    ///
    /// Projects sharing a row compete for the same horizontal space, so overlap
    /// checks are usually scoped to one row.
    RowId, "row ID"
);

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ValidationError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A single-day range.
    #[must_use]
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Number of calendar days covered, counting both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the same-length range moved by `days` (negative moves earlier).
    #[must_use]
    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }

    /// Intersection with another range, if any.
    #[must_use]
    pub fn clamp_to(&self, bounds: &Self) -> Option<Self> {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Iterates every date in the range, in order.
    pub fn iter_days(self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.days().max(0)).map(move |offset| start + Duration::days(offset))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// How a drag or resize conflict should be handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStrategy {
    /// Move the request to the nearest free slot.
    #[default]
    Adjust,
    /// Refuse the request.
    Reject,
    /// Accept the request despite the overlap.
    Force,
}

impl ConflictStrategy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adjust => "adjust",
            Self::Reject => "reject",
            Self::Force => "force",
        }
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConflictStrategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adjust" => Ok(Self::Adjust),
            "reject" => Ok(Self::Reject),
            "force" => Ok(Self::Force),
            _ => Err(ValidationError::InvalidStrategy {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
