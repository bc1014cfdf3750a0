use super::granularity::Granularity;
use crate::models::{Bucket, EnergyUpdate};
use chrono::FixedOffset;

/// Patch the current-hour bucket of a rendered day series from a streamed point.
///
/// The bucket's generation and consumption are replaced by the point's
/// instantaneous kW values, not added to. Any other granularity, a point
/// without a timestamp, or an hour with no bucket leaves the series untouched.
/// Returns whether a bucket changed.
pub fn merge_live_update(
    buckets: &mut [Bucket],
    granularity: Granularity,
    update: &EnergyUpdate,
    offset: &FixedOffset,
) -> bool {
    if granularity != Granularity::Day {
        return false;
    }
    let Some(timestamp) = update.timestamp else {
        return false;
    };

    let hour = Granularity::Day.slot_of(&timestamp.local(offset));
    let label = Granularity::Day.label(hour);

    match buckets.iter_mut().find(|bucket| bucket.label == label) {
        Some(bucket) => {
            bucket.set_generation(update.generation_kw());
            bucket.consumption = update.consumption_kw();
            true
        }
        None => false,
    }
}
