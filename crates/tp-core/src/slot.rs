//! Bounded search for the nearest conflict-free placement of a range.
//!
//! The scan is linear in both directions: each attempt checks every project,
//! so cost is `O(max_attempts * projects)`. That is fine for one user's
//! timeline and is not meant for large shared calendars.

use crate::overlap::project_conflicts_with;
use crate::project::Project;
use crate::types::DateRange;

/// Configuration for slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSearchConfig {
    /// Days to try in each direction before giving up.
    /// Default: 365.
    pub max_attempts: u32,
}

impl Default for SlotSearchConfig {
    fn default() -> Self {
        Self { max_attempts: 365 }
    }
}

/// Finds a same-length range near `requested` that conflicts with none of
/// `existing`, using the default search bound.
pub fn find_nearest_available_slot(requested: &DateRange, existing: &[Project]) -> Option<DateRange> {
    find_nearest_available_slot_with(requested, existing, &SlotSearchConfig::default())
}

/// Like [`find_nearest_available_slot`] with an explicit search bound.
///
/// Forward candidates start the day after `requested.end`, one day further
/// per attempt. If all fail, backward candidates end the day before
/// `requested.start`. `None` means no free window within the bound.
pub fn find_nearest_available_slot_with(
    requested: &DateRange,
    existing: &[Project],
    config: &SlotSearchConfig,
) -> Option<DateRange> {
    let span = requested.days() - 1;
    let is_free = |window: &DateRange| !existing.iter().any(|p| project_conflicts_with(p, window));

    let attempts = 1..=i64::from(config.max_attempts);
    let found = attempts
        .clone()
        .map(|offset| requested.shifted(span + offset))
        .find(|window| is_free(window))
        .or_else(|| {
            attempts
                .map(|offset| requested.shifted(-(span + offset)))
                .find(|window| is_free(window))
        });

    if found.is_none() {
        tracing::warn!(
            %requested,
            max_attempts = config.max_attempts,
            "no free slot within search bound"
        );
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::tests::placed;
    use crate::types::date;

    #[test]
    fn moves_forward_past_occupied_project() {
        let a = placed("a", "r1", date(2025, 1, 6), Some(date(2025, 1, 9)));
        let requested = DateRange::new(date(2025, 1, 5), date(2025, 1, 8)).unwrap();

        let slot = find_nearest_available_slot(&requested, &[a]).unwrap();
        assert_eq!(slot.start, date(2025, 1, 10));
        assert_eq!(slot.end, date(2025, 1, 13));
        assert_eq!(slot.days(), requested.days());
    }

    #[test]
    fn first_forward_window_starts_after_requested_end() {
        let requested = DateRange::new(date(2025, 1, 5), date(2025, 1, 8)).unwrap();
        let slot = find_nearest_available_slot(&requested, &[]).unwrap();
        assert_eq!(slot.start, date(2025, 1, 9));
    }

    #[test]
    fn continuous_project_forces_backward_search() {
        let c = placed("c", "r1", date(2025, 1, 1), None);
        let requested = DateRange::new(date(2025, 3, 3), date(2025, 3, 5)).unwrap();

        let slot = find_nearest_available_slot(&requested, &[c]).unwrap();
        assert_eq!(slot.end, date(2024, 12, 31));
        assert_eq!(slot.start, date(2024, 12, 29));
    }

    #[test]
    fn exhausted_search_returns_none() {
        let c = placed("c", "r1", date(2025, 1, 1), None);
        let requested = DateRange::new(date(2025, 3, 3), date(2025, 3, 5)).unwrap();
        let config = SlotSearchConfig { max_attempts: 10 };

        assert!(find_nearest_available_slot_with(&requested, &[c], &config).is_none());
    }

    #[test]
    fn backward_window_skips_blocking_projects() {
        let c = placed("c", "r1", date(2025, 2, 1), None);
        let before = placed("before", "r1", date(2025, 1, 20), Some(date(2025, 1, 31)));
        let requested = DateRange::new(date(2025, 2, 10), date(2025, 2, 11)).unwrap();

        let slot = find_nearest_available_slot(&requested, &[c, before]).unwrap();
        assert_eq!(slot.start, date(2025, 1, 18));
        assert_eq!(slot.end, date(2025, 1, 19));
    }
}
