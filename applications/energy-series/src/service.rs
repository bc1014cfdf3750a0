use crate::models::{Reading, SummaryFigures};
use crate::series::{Aggregator, AuthoritativeTotals, Granularity, Series};
use crate::source::{collect_readings, ReadingSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the chart view needs for one granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub granularity: Granularity,
    pub series: Series,
    /// Headline figures from the overview, `None` when it could not be fetched
    pub summary: Option<SummaryFigures>,
}

/// Loads readings from the source and turns them into a dashboard series
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn ReadingSource>,
    aggregator: Aggregator,
    readings_limit: usize,
}

impl DashboardService {
    pub fn new(source: Arc<dyn ReadingSource>, aggregator: Aggregator, readings_limit: usize) -> Self {
        Self {
            source,
            aggregator,
            readings_limit,
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Build the dashboard for `granularity`. Source failures degrade to an
    /// empty or synthetic series rather than an error.
    pub async fn load(&self, granularity: Granularity) -> Dashboard {
        let overview = match self.source.system_overview().await {
            Ok(overview) => overview,
            Err(e) => {
                warn!(error = %e, "failed to fetch system overview");
                return Dashboard {
                    granularity,
                    series: Series::Empty,
                    summary: None,
                };
            }
        };

        let summary = SummaryFigures::from(&overview);
        let totals = AuthoritativeTotals::from(&summary);

        let readings: Vec<Reading> = if !overview.recent_installation_readings.is_empty() {
            overview.recent_installation_readings
        } else {
            let installations = overview.active_installations();
            collect_readings(self.source.as_ref(), &installations, self.readings_limit).await
        };

        let series = self.aggregator.aggregate(&readings, granularity, &totals);
        info!(
            %granularity,
            readings = readings.len(),
            buckets = series.buckets().len(),
            synthetic = series.is_synthetic(),
            "dashboard series built"
        );

        Dashboard {
            granularity,
            series,
            summary: Some(summary),
        }
    }
}
