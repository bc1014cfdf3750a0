use super::granularity::Granularity;
use crate::models::{Bucket, SummaryFigures};
use serde::{Deserialize, Serialize};

/// Headline generation figures that bucketed series are reconciled against
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeTotals {
    pub today_kwh: Option<f64>,
    pub month_to_date_kwh: Option<f64>,
    pub year_to_date_kwh: Option<f64>,
}

impl AuthoritativeTotals {
    /// Reference figure for `granularity`.
    ///
    /// Upstream reports no weekly figure, so week uses seven times today's total.
    pub fn for_granularity(&self, granularity: Granularity) -> Option<f64> {
        match granularity {
            Granularity::Day => self.today_kwh,
            Granularity::Week => self.today_kwh.map(|today| today * 7.0),
            Granularity::Month => self.month_to_date_kwh,
            Granularity::Year => self.year_to_date_kwh,
        }
    }
}

impl From<&SummaryFigures> for AuthoritativeTotals {
    fn from(summary: &SummaryFigures) -> Self {
        Self {
            today_kwh: summary.today_total_generation_kwh,
            month_to_date_kwh: summary.month_to_date_generation_kwh,
            year_to_date_kwh: summary.year_to_date_generation_kwh,
        }
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// `authoritative / raw_sum` when both are finite and positive, otherwise 1
pub fn normalization_factor(authoritative: Option<f64>, raw_sum: f64) -> f64 {
    match authoritative {
        Some(reference) if is_positive(reference) && is_positive(raw_sum) => reference / raw_sum,
        _ => 1.0,
    }
}

/// Scale `buckets` so their totals sum to `authoritative`. Returns the factor applied.
pub fn normalize(buckets: &mut [Bucket], authoritative: Option<f64>) -> f64 {
    let raw_sum: f64 = buckets.iter().map(|bucket| bucket.total).sum();
    let factor = normalization_factor(authoritative, raw_sum);

    tracing::debug!(raw_sum, ?authoritative, factor, "normalizing series");

    if factor != 1.0 {
        for bucket in buckets.iter_mut() {
            bucket.scale(factor);
        }
    }
    factor
}
