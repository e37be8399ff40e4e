//! Even spreading of an hour budget across the working days of a segment.
//!
//! # Algorithm Summary
//!
//! 1. `remaining = max(0, total - consumed)`; non-finite budgets count as zero
//! 2. Collect the eligible days of the segment
//! 3. Give every eligible day `remaining / eligible_count` hours
//!
//! There is no front- or back-loading: every day in the result carries the
//! same share, and the shares sum to `remaining`.

use chrono::NaiveDate;

use crate::types::DateRange;

/// Hours assigned to a single day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayAllocation {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Budget left after subtracting already logged hours.
///
/// Non-finite inputs and overdrawn budgets yield zero.
pub fn remaining_hours(total_allocation: f64, consumed_hours: f64) -> f64 {
    let remaining = total_allocation - consumed_hours.max(0.0);
    if remaining.is_finite() && remaining > 0.0 {
        remaining
    } else {
        0.0
    }
}

/// Divides `remaining` equally across `dates`.
///
/// Returns an empty list when there is nothing to spread or nowhere to put it.
#[expect(
    clippy::cast_precision_loss,
    reason = "day counts are far below f64 precision limits"
)]
pub fn spread_evenly(dates: &[NaiveDate], remaining: f64) -> Vec<DayAllocation> {
    if dates.is_empty() || remaining <= 0.0 || !remaining.is_finite() {
        return Vec::new();
    }
    let hours = remaining / dates.len() as f64;
    dates
        .iter()
        .map(|&date| DayAllocation { date, hours })
        .collect()
}

/// Allocates what is left of `total_allocation` over the eligible days of `segment`.
pub fn allocate_segment<F>(
    segment: DateRange,
    total_allocation: f64,
    consumed_hours: f64,
    is_eligible: F,
) -> Vec<DayAllocation>
where
    F: Fn(NaiveDate) -> bool,
{
    let remaining = remaining_hours(total_allocation, consumed_hours);
    if remaining <= 0.0 {
        return Vec::new();
    }
    let eligible: Vec<NaiveDate> = segment.iter_days().filter(|d| is_eligible(*d)).collect();
    spread_evenly(&eligible, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    use crate::types::date;

    fn weekdays_only(d: NaiveDate) -> bool {
        !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn total(allocations: &[DayAllocation]) -> f64 {
        allocations.iter().map(|a| a.hours).sum()
    }

    #[test]
    fn spreads_remaining_evenly_over_eligible_days() {
        let segment = DateRange::new(date(2025, 1, 1), date(2025, 1, 10)).unwrap();
        let allocations = allocate_segment(segment, 20.0, 0.0, weekdays_only);

        assert_eq!(allocations.len(), 8);
        assert!(allocations.iter().all(|a| (a.hours - 2.5).abs() < 1e-12));
        assert!(allocations.iter().all(|a| weekdays_only(a.date)));
    }

    #[test]
    fn consumed_hours_reduce_the_budget() {
        let segment = DateRange::new(date(2025, 1, 6), date(2025, 1, 10)).unwrap();
        let allocations = allocate_segment(segment, 10.0, 4.0, weekdays_only);

        assert_eq!(allocations.len(), 5);
        assert!((total(&allocations) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn overdrawn_budget_yields_nothing() {
        let segment = DateRange::new(date(2025, 1, 6), date(2025, 1, 10)).unwrap();
        assert!(allocate_segment(segment, 10.0, 12.0, weekdays_only).is_empty());
        assert!(allocate_segment(segment, 10.0, 10.0, weekdays_only).is_empty());
    }

    #[test]
    fn no_eligible_days_yields_nothing() {
        // Jan 4-5, 2025 is a weekend
        let segment = DateRange::new(date(2025, 1, 4), date(2025, 1, 5)).unwrap();
        assert!(allocate_segment(segment, 10.0, 0.0, weekdays_only).is_empty());
    }

    #[test]
    fn non_finite_budgets_are_ignored() {
        assert!(remaining_hours(f64::NAN, 0.0).abs() < f64::EPSILON);
        assert!(remaining_hours(f64::INFINITY, 0.0).abs() < f64::EPSILON);
        assert!(remaining_hours(-5.0, 0.0).abs() < f64::EPSILON);
        assert!((remaining_hours(8.0, 3.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spread_evenly_sums_to_remaining() {
        let dates: Vec<_> = (1..=7).map(|d| date(2025, 1, d)).collect();
        let allocations = spread_evenly(&dates, 15.0);

        assert_eq!(allocations.len(), 7);
        assert!((total(&allocations) - 15.0).abs() < 1e-9);
    }
}
