use super::reading::{deserialize_watts, watts_to_kw};
use super::timestamp::{self, Timestamp};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ENERGY_UPDATE: &str = "ENERGY_UPDATE";

/// Envelope of a message delivered by the real-time transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl StreamEvent {
    pub fn energy_update(update: &EnergyUpdate) -> Result<Self> {
        Ok(Self {
            kind: ENERGY_UPDATE.to_string(),
            payload: serde_json::to_value(update)?,
        })
    }

    /// Decode the payload if this is an energy update; other event types yield `None`
    pub fn into_energy_update(self) -> Result<Option<EnergyUpdate>> {
        if self.kind != ENERGY_UPDATE {
            return Ok(None);
        }
        serde_json::from_value(self.payload)
            .map(Some)
            .map_err(|e| AppError::Validation(format!("malformed {} payload: {}", ENERGY_UPDATE, e)))
    }
}

/// Streamed point carrying the instantaneous system state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyUpdate {
    #[serde(default)]
    pub current_system_generation_watts: Option<f64>,
    #[serde(default, rename = "todayTotalGenerationKWh")]
    pub today_total_generation_kwh: Option<f64>,
    #[serde(default, rename = "monthToDateGenerationKWh")]
    pub month_to_date_generation_kwh: Option<f64>,
    #[serde(default, rename = "yearToDateGenerationKWh")]
    pub year_to_date_generation_kwh: Option<f64>,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub timestamp: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_watts")]
    pub power_generation_watts: f64,
    #[serde(default, deserialize_with = "deserialize_watts")]
    pub power_consumption_watts: f64,
}

impl EnergyUpdate {
    pub fn generation_kw(&self) -> f64 {
        watts_to_kw(self.power_generation_watts)
    }

    pub fn consumption_kw(&self) -> f64 {
        watts_to_kw(self.power_consumption_watts)
    }
}
