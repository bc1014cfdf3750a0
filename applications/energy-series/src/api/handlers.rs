use crate::error::Result;
use crate::models::StreamEvent;
use crate::series::Granularity;
use crate::service::{Dashboard, DashboardService};
use crate::state::{DisplayedSeries, MergeOutcome, SeriesStore};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub service: DashboardService,
    pub store: SeriesStore,
}

impl AppState {
    pub fn new(service: DashboardService, store: SeriesStore) -> Self {
        Self { service, store }
    }
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub granularity: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Rebuild the series for the requested granularity (default `day`) and make
/// it the displayed one
pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Dashboard>> {
    let granularity = match query.granularity.as_deref() {
        Some(raw) => raw.parse::<Granularity>()?,
        None => Granularity::Day,
    };

    let dashboard = state.service.load(granularity).await;
    state.store.replace(dashboard.clone()).await;

    Ok(Json(dashboard))
}

/// The series currently displayed, including any live patches
pub async fn get_current_series(
    State(state): State<AppState>,
) -> std::result::Result<Json<DisplayedSeries>, StatusCode> {
    state
        .store
        .current()
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Apply one event from the real-time transport
pub async fn post_update(
    State(state): State<AppState>,
    Json(event): Json<StreamEvent>,
) -> Result<Json<MergeOutcome>> {
    let kind = event.kind.clone();
    let outcome = match event.into_energy_update()? {
        Some(update) => state.store.apply_update(&update).await,
        None => {
            debug!(kind = %kind, "ignoring non-energy event");
            MergeOutcome {
                merged: false,
                summary_updated: false,
            }
        }
    };

    Ok(Json(outcome))
}
