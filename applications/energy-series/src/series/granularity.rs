use crate::error::AppError;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Time resolution of a chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// 24 hourly slots
    Day,
    /// 7 weekday slots, Monday first
    Week,
    /// Up to 31 day-of-month slots
    Month,
    /// 12 calendar month slots
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    pub fn slot_count(self) -> usize {
        match self {
            Granularity::Day => 24,
            Granularity::Week => 7,
            Granularity::Month => 31,
            Granularity::Year => 12,
        }
    }

    /// Canonical label of slot `index`
    pub fn label(self, index: usize) -> String {
        match self {
            Granularity::Day => format!("{}:00", index),
            Granularity::Week => WEEKDAYS[index % 7].to_string(),
            Granularity::Month => (index + 1).to_string(),
            Granularity::Year => MONTHS[index % 12].to_string(),
        }
    }

    /// Slot a local wall-clock time falls into
    pub fn slot_of(self, local: &NaiveDateTime) -> usize {
        match self {
            Granularity::Day => local.hour() as usize,
            Granularity::Week => local.weekday().num_days_from_monday() as usize,
            Granularity::Month => local.day0() as usize,
            Granularity::Year => local.month0() as usize,
        }
    }

    /// Whether slots nothing contributed to are dropped from the output.
    /// Only month does this, since months shorter than 31 days pad the tail.
    pub fn omits_empty_slots(self) -> bool {
        matches!(self, Granularity::Month)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            other => Err(AppError::Validation(format!(
                "unknown granularity: {}",
                other
            ))),
        }
    }
}
