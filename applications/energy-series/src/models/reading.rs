use super::timestamp::{self, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Category an installation is reported under on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstallationType {
    Residential,
    Commercial,
    Industrial,
}

impl InstallationType {
    /// Case-insensitive match against the known categories. Unset or
    /// unrecognized values fall back to residential.
    pub fn classify(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
            Some("COMMERCIAL") => InstallationType::Commercial,
            Some("INDUSTRIAL") => InstallationType::Industrial,
            _ => InstallationType::Residential,
        }
    }
}

impl fmt::Display for InstallationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstallationType::Residential => "RESIDENTIAL",
            InstallationType::Commercial => "COMMERCIAL",
            InstallationType::Industrial => "INDUSTRIAL",
        };
        f.write_str(s)
    }
}

/// A single power reading from one installation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub installation_id: Option<i64>,
    #[serde(default, alias = "energyProduced", deserialize_with = "deserialize_watts")]
    pub power_generation_watts: f64,
    #[serde(default, alias = "energyConsumed", deserialize_with = "deserialize_watts")]
    pub power_consumption_watts: f64,
    #[serde(default)]
    pub installation_type: Option<String>,
}

impl Reading {
    pub fn category(&self) -> InstallationType {
        InstallationType::classify(self.installation_type.as_deref())
    }

    pub fn generation_kw(&self) -> f64 {
        watts_to_kw(self.power_generation_watts)
    }

    pub fn consumption_kw(&self) -> f64 {
        watts_to_kw(self.power_consumption_watts)
    }
}

/// Convert watts to kilowatts; negative or non-finite input counts as zero
pub fn watts_to_kw(watts: f64) -> f64 {
    if watts.is_finite() && watts > 0.0 {
        watts / 1000.0
    } else {
        0.0
    }
}

/// Null or missing power values count as zero
pub(crate) fn deserialize_watts<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
