use crate::models::{EnergyUpdate, SummaryFigures};
use crate::series::{merge_live_update, Granularity, Series};
use crate::service::Dashboard;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The series currently shown to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedSeries {
    pub granularity: Granularity,
    pub series: Series,
    pub summary: Option<SummaryFigures>,
    pub updated_at: DateTime<Utc>,
}

/// Result of applying one streamed update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    /// A bucket of the displayed series was replaced
    pub merged: bool,
    /// Headline figures were refreshed
    pub summary_updated: bool,
}

/// Shared holder of the displayed series.
///
/// Full rebuilds swap the whole value; live updates patch it under the write
/// lock, so readers never see a half-applied merge.
#[derive(Clone)]
pub struct SeriesStore {
    inner: Arc<RwLock<Option<DisplayedSeries>>>,
    offset: FixedOffset,
}

impl SeriesStore {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            offset,
        }
    }

    pub async fn replace(&self, dashboard: Dashboard) {
        let displayed = DisplayedSeries {
            granularity: dashboard.granularity,
            series: dashboard.series,
            summary: dashboard.summary,
            updated_at: Utc::now(),
        };
        *self.inner.write().await = Some(displayed);
    }

    pub async fn current(&self) -> Option<DisplayedSeries> {
        self.inner.read().await.clone()
    }

    /// Merge a streamed point into the displayed series and refresh the
    /// summary. The series keeps its real or synthetic tag.
    pub async fn apply_update(&self, update: &EnergyUpdate) -> MergeOutcome {
        let mut guard = self.inner.write().await;
        let Some(displayed) = guard.as_mut() else {
            return MergeOutcome {
                merged: false,
                summary_updated: false,
            };
        };

        let merged = merge_live_update(
            displayed.series.buckets_mut(),
            displayed.granularity,
            update,
            &self.offset,
        );
        let summary_updated = refresh_summary(&mut displayed.summary, update);
        if merged || summary_updated {
            displayed.updated_at = Utc::now();
        }

        MergeOutcome {
            merged,
            summary_updated,
        }
    }
}

fn refresh_summary(summary: &mut Option<SummaryFigures>, update: &EnergyUpdate) -> bool {
    let fields = [
        update.today_total_generation_kwh,
        update.month_to_date_generation_kwh,
        update.year_to_date_generation_kwh,
        update.current_system_generation_watts,
    ];
    if fields.iter().all(Option::is_none) {
        return false;
    }

    let summary = summary.get_or_insert_with(SummaryFigures::default);
    if let Some(v) = update.today_total_generation_kwh {
        summary.today_total_generation_kwh = Some(v);
    }
    if let Some(v) = update.month_to_date_generation_kwh {
        summary.month_to_date_generation_kwh = Some(v);
    }
    if let Some(v) = update.year_to_date_generation_kwh {
        summary.year_to_date_generation_kwh = Some(v);
    }
    if let Some(v) = update.current_system_generation_watts {
        summary.current_system_generation_watts = Some(v);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bucket;
    use chrono::Offset;

    fn day_dashboard() -> Dashboard {
        let buckets = (0..24).map(|h| Bucket::empty(Granularity::Day.label(h))).collect();
        Dashboard {
            granularity: Granularity::Day,
            series: Series::Real(buckets),
            summary: Some(SummaryFigures {
                today_total_generation_kwh: Some(12.0),
                ..Default::default()
            }),
        }
    }

    fn point(ts: &str) -> EnergyUpdate {
        EnergyUpdate {
            timestamp: Some(ts.parse().unwrap()),
            power_generation_watts: 3500.0,
            power_consumption_watts: 900.0,
            today_total_generation_kwh: Some(14.5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_before_any_series_is_noop() {
        let store = SeriesStore::new(Utc.fix());
        let outcome = store.apply_update(&point("2024-06-01T10:00:00")).await;

        assert!(!outcome.merged);
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_update_patches_hour_and_summary() {
        let store = SeriesStore::new(Utc.fix());
        store.replace(day_dashboard()).await;

        let outcome = store.apply_update(&point("2024-06-01T10:40:00")).await;
        assert!(outcome.merged);
        assert!(outcome.summary_updated);

        let current = store.current().await.unwrap();
        assert_eq!(current.series.buckets()[10].total, 3.5);
        assert_eq!(current.series.buckets()[10].consumption, 0.9);
        assert_eq!(
            current.summary.unwrap().today_total_generation_kwh,
            Some(14.5)
        );
    }

    #[tokio::test]
    async fn test_month_view_only_refreshes_summary() {
        let store = SeriesStore::new(Utc.fix());
        let mut dashboard = day_dashboard();
        dashboard.granularity = Granularity::Month;
        dashboard.series = Series::Real(vec![Bucket::empty("1"), Bucket::empty("2")]);
        store.replace(dashboard).await;
        let before = store.current().await.unwrap().series;

        let outcome = store.apply_update(&point("2024-06-01T10:00:00")).await;

        assert!(!outcome.merged);
        assert_eq!(store.current().await.unwrap().series, before);
    }

    #[tokio::test]
    async fn test_concurrent_updates_leave_consistent_buckets() {
        let store = SeriesStore::new(Utc.fix());
        store.replace(day_dashboard()).await;

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let mut update = point("2024-06-01T08:00:00");
                    update.power_generation_watts = 1000.0 * i as f64;
                    store.apply_update(&update).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let current = store.current().await.unwrap();
        let bucket = &current.series.buckets()[8];
        assert_eq!(bucket.total, bucket.category_sum());
        assert_eq!(bucket.consumption, 0.9);
    }

    #[tokio::test]
    async fn test_merge_into_synthetic_day_keeps_tag() {
        let store = SeriesStore::new(Utc.fix());
        let mut dashboard = day_dashboard();
        let buckets = dashboard.series.buckets().to_vec();
        dashboard.series = Series::Synthetic(buckets);
        store.replace(dashboard).await;

        let outcome = store.apply_update(&point("2024-06-01T10:40:00")).await;
        assert!(outcome.merged);

        let current = store.current().await.unwrap();
        assert!(current.series.is_synthetic());
        assert_eq!(current.series.buckets()[10].total, 3.5);
    }
}
