use super::reading::Reading;
use serde::{Deserialize, Serialize};

/// Installation as listed in the system overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationSummary {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type", alias = "installationType")]
    pub installation_type: Option<String>,
}

/// System-wide overview reported by the monitoring backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemOverview {
    #[serde(default)]
    pub current_system_generation_watts: Option<f64>,
    #[serde(default, rename = "todayTotalGenerationKWh")]
    pub today_total_generation_kwh: Option<f64>,
    #[serde(default, rename = "monthToDateGenerationKWh")]
    pub month_to_date_generation_kwh: Option<f64>,
    #[serde(default, rename = "yearToDateGenerationKWh")]
    pub year_to_date_generation_kwh: Option<f64>,
    #[serde(default)]
    pub average_system_efficiency: Option<f64>,
    #[serde(default)]
    pub recently_active_installations: Vec<InstallationSummary>,
    #[serde(default)]
    pub top_producing_installations: Vec<InstallationSummary>,
    #[serde(default)]
    pub recent_installation_readings: Vec<Reading>,
}

impl SystemOverview {
    /// Recently active installations to fetch readings for, each listed once.
    /// Top producers that are not active contribute no readings.
    pub fn active_installations(&self) -> Vec<InstallationSummary> {
        let mut seen = std::collections::HashSet::new();
        self.recently_active_installations
            .iter()
            .filter(|installation| seen.insert(installation.id))
            .cloned()
            .collect()
    }
}

/// Scalar figures shown next to the chart, passed through unmodified
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFigures {
    #[serde(default, rename = "todayTotalGenerationKWh")]
    pub today_total_generation_kwh: Option<f64>,
    #[serde(default, rename = "monthToDateGenerationKWh")]
    pub month_to_date_generation_kwh: Option<f64>,
    #[serde(default, rename = "yearToDateGenerationKWh")]
    pub year_to_date_generation_kwh: Option<f64>,
    #[serde(default)]
    pub average_system_efficiency: Option<f64>,
    #[serde(default)]
    pub current_system_generation_watts: Option<f64>,
}

impl From<&SystemOverview> for SummaryFigures {
    fn from(overview: &SystemOverview) -> Self {
        Self {
            today_total_generation_kwh: overview.today_total_generation_kwh,
            month_to_date_generation_kwh: overview.month_to_date_generation_kwh,
            year_to_date_generation_kwh: overview.year_to_date_generation_kwh,
            average_system_efficiency: overview.average_system_efficiency,
            current_system_generation_watts: overview.current_system_generation_watts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_overview() {
        let json = r#"{
            "totalActiveInstallations": 2,
            "currentSystemGenerationWatts": 12500.0,
            "todayTotalGenerationKWh": 42.5,
            "monthToDateGenerationKWh": 900.0,
            "yearToDateGenerationKWh": 10400.0,
            "averageSystemEfficiency": 87.2,
            "recentlyActiveInstallations": [
                {"id": 1, "name": "Roof A", "type": "RESIDENTIAL"},
                {"id": 2, "name": "Warehouse", "type": "commercial"}
            ]
        }"#;
        let overview: SystemOverview = serde_json::from_str(json).unwrap();

        assert_eq!(overview.today_total_generation_kwh, Some(42.5));
        assert_eq!(overview.recently_active_installations.len(), 2);
        assert_eq!(
            overview.recently_active_installations[1]
                .installation_type
                .as_deref(),
            Some("commercial")
        );
        assert!(overview.top_producing_installations.is_empty());
        assert!(overview.recent_installation_readings.is_empty());
    }

    #[test]
    fn test_active_installations_ignore_top_producers() {
        let summary = |id: i64| InstallationSummary {
            id,
            name: None,
            installation_type: None,
        };
        let overview = SystemOverview {
            recently_active_installations: vec![summary(1), summary(2), summary(1)],
            top_producing_installations: vec![summary(2), summary(99)],
            ..Default::default()
        };

        let ids: Vec<i64> = overview.active_installations().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_summary_serializes_dashboard_field_names() {
        let summary = SummaryFigures {
            today_total_generation_kwh: Some(5.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["todayTotalGenerationKWh"], 5.0);
        assert!(json["monthToDateGenerationKWh"].is_null());
    }
}
