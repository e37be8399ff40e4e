//! Aggregates day estimates for timeline headers and reports.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::estimate::{DayEstimate, EstimateSource};

/// Totals over a set of day estimates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EstimateSummary {
    pub total_hours: f64,
    pub by_source: BTreeMap<EstimateSource, f64>,
    pub by_day: BTreeMap<NaiveDate, f64>,
}

impl EstimateSummary {
    /// The busiest day and its hours.
    #[must_use]
    pub fn peak_day(&self) -> Option<(NaiveDate, f64)> {
        self.by_day
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(date, hours)| (*date, *hours))
    }
}

/// Sums hours per source and per day.
pub fn summarize_estimates(estimates: &[DayEstimate]) -> EstimateSummary {
    let mut summary = EstimateSummary::default();
    for estimate in estimates {
        summary.total_hours += estimate.hours;
        *summary.by_source.entry(estimate.source).or_default() += estimate.hours;
        *summary.by_day.entry(estimate.date).or_default() += estimate.hours;
    }
    summary
}
