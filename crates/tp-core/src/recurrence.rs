//! Recurrence expansion for recurring milestones.
//!
//! Produces the anchor dates that bound allocation segments: the first
//! occurrence on or after the project start, one extra anchor one period
//! earlier so the first segment has a start, then every later occurrence up
//! to the project end (or the continuous-project horizon).

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::project::{CONTINUOUS_HORIZON_DAYS, MonthlyRule, RecurringConfig};

/// Upper bound on anchors returned for one milestone.
pub const MAX_OCCURRENCES: usize = 120;

/// A recurrence pinned to its first occurrence, indexable in both directions.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Fixed step in days (daily and weekly patterns).
    Days { first: NaiveDate, step: i64 },
    /// Fixed step in months, resolved through a monthly rule.
    Months {
        first_month: i32,
        step: i32,
        rule: MonthlyRule,
    },
}

impl Pattern {
    fn anchored(config: &RecurringConfig, start: NaiveDate) -> Self {
        let interval = config.interval();
        match *config {
            RecurringConfig::Daily { .. } => Self::Days {
                first: start,
                step: i64::from(interval),
            },
            RecurringConfig::Weekly { day_of_week, .. } => {
                let ahead = (i64::from(day_of_week.num_days_from_monday())
                    - i64::from(start.weekday().num_days_from_monday()))
                .rem_euclid(7);
                Self::Days {
                    first: start + Duration::days(ahead),
                    step: 7 * i64::from(interval),
                }
            }
            RecurringConfig::Monthly { rule, .. } => {
                let start_month = month_index(start);
                let first_month = match occurrence_in_month(start_month, rule) {
                    Some(date) if date >= start => start_month,
                    _ => start_month + 1,
                };
                Self::Months {
                    first_month,
                    step: i32::try_from(interval).unwrap_or(i32::MAX),
                    rule,
                }
            }
        }
    }

    /// Occurrence `k` periods after the first (negative goes back).
    fn nth(&self, k: i32) -> Option<NaiveDate> {
        match *self {
            Self::Days { first, step } => {
                first.checked_add_signed(Duration::days(step.checked_mul(i64::from(k))?))
            }
            Self::Months {
                first_month,
                step,
                rule,
            } => occurrence_in_month(first_month.checked_add(step.checked_mul(k)?)?, rule),
        }
    }
}

/// Expands a recurrence into sorted anchor dates.
///
/// Continuous projects (or projects without an end) use
/// `project_start + 365 days` as the horizon. Output never exceeds
/// [`MAX_OCCURRENCES`] entries.
pub fn generate_occurrences(
    config: &RecurringConfig,
    project_start: NaiveDate,
    project_end: Option<NaiveDate>,
    continuous: bool,
) -> Vec<NaiveDate> {
    let horizon = match project_end {
        Some(end) if !continuous => end,
        _ => project_start + Duration::days(CONTINUOUS_HORIZON_DAYS),
    };
    let pattern = Pattern::anchored(config, project_start);

    let mut occurrences = Vec::new();
    if let Some(before) = pattern.nth(-1) {
        occurrences.push(before);
    }

    let mut k = 0;
    while occurrences.len() < MAX_OCCURRENCES {
        match pattern.nth(k) {
            Some(next) if next <= horizon => occurrences.push(next),
            _ => break,
        }
        k += 1;
    }

    if occurrences.len() == MAX_OCCURRENCES && pattern.nth(k).is_some_and(|next| next <= horizon) {
        tracing::warn!(
            ?config,
            %project_start,
            %horizon,
            cap = MAX_OCCURRENCES,
            "recurrence truncated at occurrence cap"
        );
    }

    occurrences.sort_unstable();
    occurrences.dedup();
    occurrences
}

/// Months since year 0, so month arithmetic never needs carry handling.
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + i32::try_from(date.month0()).unwrap_or(0)
}

fn occurrence_in_month(index: i32, rule: MonthlyRule) -> Option<NaiveDate> {
    let year = index.div_euclid(12);
    let month = u32::try_from(index.rem_euclid(12)).unwrap_or(0) + 1;
    match rule {
        MonthlyRule::Date { day } => {
            let day = day.clamp(1, last_day_of_month(year, month)?);
            NaiveDate::from_ymd_opt(year, month, day)
        }
        MonthlyRule::DayOfWeek {
            week_of_month,
            day_of_week,
        } => match week_of_month.clamp(1, 5) {
            5 => last_weekday_of_month(year, month, day_of_week),
            n => {
                let first = first_weekday_of_month(year, month, day_of_week)?;
                Some(first + Duration::weeks(i64::from(n - 1)))
            }
        },
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
}

fn first_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let ahead = (i64::from(weekday.num_days_from_monday())
        - i64::from(first.weekday().num_days_from_monday()))
    .rem_euclid(7);
    Some(first + Duration::days(ahead))
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last = NaiveDate::from_ymd_opt(year, month, last_day_of_month(year, month)?)?;
    let back = (i64::from(last.weekday().num_days_from_monday())
        - i64::from(weekday.num_days_from_monday()))
    .rem_euclid(7);
    Some(last - Duration::days(back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::date;

    #[test]
    fn weekly_emits_anchor_before_first_occurrence() {
        let config = RecurringConfig::Weekly {
            interval: 1,
            day_of_week: Weekday::Mon,
        };
        // Jan 1, 2025 is a Wednesday
        let anchors = generate_occurrences(&config, date(2025, 1, 1), Some(date(2025, 1, 21)), false);

        assert_eq!(
            anchors,
            vec![
                date(2024, 12, 30),
                date(2025, 1, 6),
                date(2025, 1, 13),
                date(2025, 1, 20),
            ]
        );
    }

    #[test]
    fn weekly_continuous_project_runs_to_horizon() {
        let config = RecurringConfig::Weekly {
            interval: 1,
            day_of_week: Weekday::Mon,
        };
        let anchors = generate_occurrences(&config, date(2025, 1, 1), Some(date(2025, 1, 21)), true);

        assert_eq!(anchors.first(), Some(&date(2024, 12, 30)));
        assert_eq!(anchors.get(1), Some(&date(2025, 1, 6)));
        // Dec 29, 2025 is the last Monday before the Jan 1, 2026 horizon
        assert_eq!(anchors.last(), Some(&date(2025, 12, 29)));
        assert_eq!(anchors.len(), 53);
        assert!(anchors.iter().all(|d| d.weekday() == Weekday::Mon));
    }

    #[test]
    fn daily_interval_steps_from_project_start() {
        let config = RecurringConfig::Daily { interval: 2 };
        let anchors = generate_occurrences(&config, date(2025, 1, 1), Some(date(2025, 1, 7)), false);

        assert_eq!(
            anchors,
            vec![
                date(2024, 12, 30),
                date(2025, 1, 1),
                date(2025, 1, 3),
                date(2025, 1, 5),
                date(2025, 1, 7),
            ]
        );
    }

    #[test]
    fn monthly_date_clamps_to_short_months() {
        let config = RecurringConfig::Monthly {
            interval: 1,
            rule: MonthlyRule::Date { day: 31 },
        };
        let anchors =
            generate_occurrences(&config, date(2025, 1, 15), Some(date(2025, 4, 30)), false);

        assert_eq!(
            anchors,
            vec![
                date(2024, 12, 31),
                date(2025, 1, 31),
                date(2025, 2, 28),
                date(2025, 3, 31),
                date(2025, 4, 30),
            ]
        );
    }

    #[test]
    fn monthly_date_before_start_moves_to_next_month() {
        let config = RecurringConfig::Monthly {
            interval: 1,
            rule: MonthlyRule::Date { day: 5 },
        };
        let anchors =
            generate_occurrences(&config, date(2025, 1, 10), Some(date(2025, 3, 1)), false);

        assert_eq!(anchors, vec![date(2025, 1, 5), date(2025, 2, 5)]);
    }

    #[test]
    fn monthly_nth_weekday() {
        let config = RecurringConfig::Monthly {
            interval: 1,
            rule: MonthlyRule::DayOfWeek {
                week_of_month: 2,
                day_of_week: Weekday::Tue,
            },
        };
        let anchors =
            generate_occurrences(&config, date(2025, 1, 1), Some(date(2025, 3, 31)), false);

        assert_eq!(
            anchors,
            vec![
                date(2024, 12, 10),
                date(2025, 1, 14),
                date(2025, 2, 11),
                date(2025, 3, 11),
            ]
        );
    }

    #[test]
    fn monthly_last_weekday() {
        let config = RecurringConfig::Monthly {
            interval: 1,
            rule: MonthlyRule::DayOfWeek {
                week_of_month: 5,
                day_of_week: Weekday::Fri,
            },
        };
        let anchors =
            generate_occurrences(&config, date(2025, 1, 1), Some(date(2025, 2, 28)), false);

        assert_eq!(
            anchors,
            vec![date(2024, 12, 27), date(2025, 1, 31), date(2025, 2, 28)]
        );
    }

    #[test]
    fn occurrence_cap_bounds_output() {
        let config = RecurringConfig::Daily { interval: 1 };
        let anchors = generate_occurrences(&config, date(2025, 1, 1), None, true);

        assert_eq!(anchors.len(), MAX_OCCURRENCES);
        assert!(anchors.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn zero_interval_behaves_like_one() {
        let config = RecurringConfig::Daily { interval: 0 };
        let anchors = generate_occurrences(&config, date(2025, 1, 1), Some(date(2025, 1, 3)), false);

        assert_eq!(
            anchors,
            vec![
                date(2024, 12, 31),
                date(2025, 1, 1),
                date(2025, 1, 2),
                date(2025, 1, 3),
            ]
        );
    }

    #[test]
    fn last_day_of_month_handles_leap_years() {
        assert_eq!(last_day_of_month(2024, 2), Some(29));
        assert_eq!(last_day_of_month(2025, 2), Some(28));
        assert_eq!(last_day_of_month(2025, 12), Some(31));
    }
}
