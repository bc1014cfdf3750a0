//! Routes each reading's generation into the residential, commercial or
//! industrial share of its bucket.

use crate::models::{Bucket, InstallationType, Reading};

/// Add a reading's contribution to its bucket.
///
/// The generation figure is routed to exactly one category and the bucket's
/// total is rebuilt from the categories, so the total and the partition can
/// never disagree.
pub fn categorize(bucket: &mut Bucket, reading: &Reading) {
    bucket.add_generation(reading.category(), reading.generation_kw());
    bucket.add_consumption(reading.consumption_kw());
}

/// Split a slot total into the fixed category mix used for illustrative series
pub fn fixed_mix(bucket: &mut Bucket, total_kwh: f64) {
    bucket.add_generation(InstallationType::Residential, total_kwh * 0.6);
    bucket.add_generation(InstallationType::Commercial, total_kwh * 0.3);
    bucket.add_generation(InstallationType::Industrial, total_kwh * 0.1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(kind: Option<&str>, watts: f64) -> Reading {
        Reading {
            power_generation_watts: watts,
            power_consumption_watts: watts / 2.0,
            installation_type: kind.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_routes_by_type_case_insensitively() {
        let mut bucket = Bucket::empty("12:00");
        categorize(&mut bucket, &reading(Some("Commercial"), 2000.0));
        categorize(&mut bucket, &reading(Some("industrial"), 1000.0));
        categorize(&mut bucket, &reading(Some("RESIDENTIAL"), 500.0));

        assert_eq!(bucket.commercial, 2.0);
        assert_eq!(bucket.industrial, 1.0);
        assert_eq!(bucket.residential, 0.5);
        assert_eq!(bucket.total, 3.5);
        assert_eq!(bucket.consumption, 1.75);
    }

    #[test]
    fn test_unset_and_unknown_types_go_residential() {
        let mut bucket = Bucket::empty("12:00");
        categorize(&mut bucket, &reading(None, 1000.0));
        categorize(&mut bucket, &reading(Some("utility-scale"), 1000.0));

        assert_eq!(bucket.residential, 2.0);
        assert_eq!(bucket.commercial, 0.0);
        assert_eq!(bucket.industrial, 0.0);
    }

    #[test]
    fn test_fixed_mix() {
        let mut bucket = Bucket::empty("Jan");
        fixed_mix(&mut bucket, 10.0);

        assert!((bucket.residential - 6.0).abs() < 1e-12);
        assert!((bucket.commercial - 3.0).abs() < 1e-12);
        assert!((bucket.industrial - 1.0).abs() < 1e-12);
        assert_eq!(bucket.total, bucket.category_sum());
    }
}
