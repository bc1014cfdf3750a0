//! Turns raw per-installation readings into fixed-shape chart series that
//! agree with the dashboard's headline totals.

pub mod bucketer;
pub mod categorizer;
pub mod granularity;
pub mod live;
pub mod normalizer;
pub mod synthetic;

pub use bucketer::{bucket_readings, BucketSet};
pub use granularity::Granularity;
pub use live::merge_live_update;
pub use normalizer::{normalization_factor, normalize, AuthoritativeTotals};
pub use synthetic::synthesize;

use crate::models::{Bucket, Reading};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// A chart series together with where its numbers came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "buckets", rename_all = "lowercase")]
pub enum Series {
    /// Built from readings
    Real(Vec<Bucket>),
    /// Shaped from headline totals only; illustrative, not measured.
    /// The tag records how the series was built: a live merge may later put a
    /// measured hour into it without changing the tag.
    Synthetic(Vec<Bucket>),
    /// Nothing to show
    Empty,
}

impl Series {
    pub fn buckets(&self) -> &[Bucket] {
        match self {
            Series::Real(buckets) | Series::Synthetic(buckets) => buckets,
            Series::Empty => &[],
        }
    }

    pub fn buckets_mut(&mut self) -> &mut [Bucket] {
        match self {
            Series::Real(buckets) | Series::Synthetic(buckets) => buckets,
            Series::Empty => &mut [],
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Series::Synthetic(_))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets().is_empty()
    }

    pub fn total(&self) -> f64 {
        self.buckets().iter().map(|bucket| bucket.total).sum()
    }
}

/// Pure aggregation pipeline: bucket, categorize, normalize, with the
/// synthetic fallback when no reading is usable.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    offset: FixedOffset,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::utc()
    }
}

impl Aggregator {
    /// Aggregator that reads local time at `offset` from UTC
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn offset(&self) -> &FixedOffset {
        &self.offset
    }

    pub fn aggregate(
        &self,
        readings: &[Reading],
        granularity: Granularity,
        totals: &AuthoritativeTotals,
    ) -> Series {
        let set = bucket_readings(readings, granularity, &self.offset);

        if set.usable_readings() == 0 {
            return match synthesize(granularity, totals) {
                Some(buckets) => {
                    tracing::info!(%granularity, "no usable readings, using synthetic series");
                    Series::Synthetic(buckets)
                }
                None => {
                    tracing::info!(%granularity, "no readings and no reference total");
                    Series::Empty
                }
            };
        }

        let usable = set.usable_readings();
        let mut buckets = set.into_buckets();
        let factor = normalize(&mut buckets, totals.for_granularity(granularity));
        tracing::debug!(
            %granularity,
            usable,
            buckets = buckets.len(),
            factor,
            "aggregated readings"
        );

        Series::Real(buckets)
    }
}

/// Aggregate with local time taken as UTC
pub fn aggregate(
    readings: &[Reading],
    granularity: Granularity,
    totals: &AuthoritativeTotals,
) -> Series {
    Aggregator::utc().aggregate(readings, granularity, totals)
}
