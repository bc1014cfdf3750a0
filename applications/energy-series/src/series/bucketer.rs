use super::categorizer::categorize;
use super::granularity::Granularity;
use crate::models::{Bucket, Reading};
use chrono::{FixedOffset, NaiveDateTime};

#[derive(Debug, Clone)]
struct Slot {
    bucket: Bucket,
    readings: usize,
}

/// Fixed, pre-labelled slots for one granularity, indexed in canonical order
#[derive(Debug, Clone)]
pub struct BucketSet {
    granularity: Granularity,
    slots: Vec<Slot>,
}

impl BucketSet {
    /// Every slot of `granularity`, zeroed
    pub fn new(granularity: Granularity) -> Self {
        let slots = (0..granularity.slot_count())
            .map(|index| Slot {
                bucket: Bucket::empty(granularity.label(index)),
                readings: 0,
            })
            .collect();
        Self { granularity, slots }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Add one reading taken at local time `at`
    pub fn accumulate(&mut self, at: &NaiveDateTime, reading: &Reading) {
        let index = self.granularity.slot_of(at);
        if let Some(slot) = self.slots.get_mut(index) {
            categorize(&mut slot.bucket, reading);
            slot.readings += 1;
        }
    }

    /// Number of readings that landed in a slot
    pub fn usable_readings(&self) -> usize {
        self.slots.iter().map(|slot| slot.readings).sum()
    }

    /// Sum of bucket totals before any normalization
    pub fn raw_total(&self) -> f64 {
        self.slots.iter().map(|slot| slot.bucket.total).sum()
    }

    /// Buckets in canonical order. Month drops slots no reading landed in.
    pub fn into_buckets(self) -> Vec<Bucket> {
        let omit_empty = self.granularity.omits_empty_slots();
        self.slots
            .into_iter()
            .filter(|slot| !omit_empty || slot.readings > 0)
            .map(|slot| slot.bucket)
            .collect()
    }
}

/// Bucket readings for `granularity`, reading local time in `offset`.
///
/// Readings without a timestamp are skipped. The rest are accumulated in
/// ascending time order so repeated runs sum in the same order.
pub fn bucket_readings(
    readings: &[Reading],
    granularity: Granularity,
    offset: &FixedOffset,
) -> BucketSet {
    let mut timed: Vec<(NaiveDateTime, &Reading)> = readings
        .iter()
        .filter_map(|reading| reading.timestamp.map(|ts| (ts.local(offset), reading)))
        .collect();
    timed.sort_by_key(|(at, _)| *at);

    let dropped = readings.len() - timed.len();
    if dropped > 0 {
        tracing::debug!(dropped, "skipped readings without a timestamp");
    }

    let mut set = BucketSet::new(granularity);
    for (at, reading) in &timed {
        set.accumulate(at, reading);
    }
    set
}
