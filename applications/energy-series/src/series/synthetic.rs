//! Illustrative series shaped from headline totals alone, used when no
//! reading is available. The output is never measured data.

use super::categorizer::fixed_mix;
use super::granularity::Granularity;
use super::normalizer::{is_positive, AuthoritativeTotals};
use crate::models::Bucket;
use std::ops::RangeInclusive;

/// Hours of the day that receive generation
pub const DAYLIGHT_HOURS: RangeInclusive<usize> = 6..=18;
/// Each daylight hour gets this share of the daily total
const DAYLIGHT_DIVISOR: f64 = 12.0;
const WEEKEND_FACTOR: f64 = 0.8;
const SYNTHETIC_MONTH_DAYS: usize = 30;
/// Zero-based months treated as summer
const SUMMER_MONTHS: RangeInclusive<usize> = 4..=8;
const SUMMER_FACTOR: f64 = 1.3;
const OFF_SEASON_FACTOR: f64 = 0.8;
const CONSUMPTION_SHARE: f64 = 0.8;

/// Build a complete heuristic series for `granularity`, or `None` when there is
/// no positive reference total to shape it from.
pub fn synthesize(granularity: Granularity, totals: &AuthoritativeTotals) -> Option<Vec<Bucket>> {
    let slot_totals = match granularity {
        Granularity::Day => day_shape(positive(totals.today_kwh)?),
        Granularity::Week => week_shape(positive(totals.today_kwh)?),
        Granularity::Month => month_shape(positive(totals.month_to_date_kwh)?),
        Granularity::Year => {
            let yearly = positive(totals.year_to_date_kwh)
                .or_else(|| positive(totals.month_to_date_kwh).map(|monthly| monthly * 12.0))?;
            year_shape(yearly)
        }
    };

    Some(
        slot_totals
            .into_iter()
            .enumerate()
            .map(|(index, total)| synthetic_bucket(granularity.label(index), total))
            .collect(),
    )
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| is_positive(*v))
}

fn synthetic_bucket(label: String, total_kwh: f64) -> Bucket {
    let mut bucket = Bucket::empty(label);
    fixed_mix(&mut bucket, total_kwh);
    bucket.add_consumption(total_kwh * CONSUMPTION_SHARE);
    bucket
}

fn day_shape(daily: f64) -> Vec<f64> {
    (0..Granularity::Day.slot_count())
        .map(|hour| {
            if DAYLIGHT_HOURS.contains(&hour) {
                daily / DAYLIGHT_DIVISOR
            } else {
                0.0
            }
        })
        .collect()
}

fn week_shape(daily: f64) -> Vec<f64> {
    (0..Granularity::Week.slot_count())
        .map(|day| if day >= 5 { daily * WEEKEND_FACTOR } else { daily })
        .collect()
}

fn month_shape(monthly: f64) -> Vec<f64> {
    vec![monthly / SYNTHETIC_MONTH_DAYS as f64; SYNTHETIC_MONTH_DAYS]
}

fn year_shape(yearly: f64) -> Vec<f64> {
    let weights: Vec<f64> = (0..Granularity::Year.slot_count())
        .map(|month| {
            if SUMMER_MONTHS.contains(&month) {
                SUMMER_FACTOR
            } else {
                OFF_SEASON_FACTOR
            }
        })
        .collect();
    let weight_sum: f64 = weights.iter().sum();
    weights.iter().map(|w| yearly * w / weight_sum).collect()
}
