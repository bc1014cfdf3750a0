use crate::api::handlers::{get_current_series, get_series, health_check, post_update, AppState};
use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::Level;

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health_check));

    let api_routes = Router::new()
        .route("/api/v1/energy/series", get(get_series))
        .route("/api/v1/energy/series/current", get(get_current_series))
        .route("/api/v1/energy/updates", post(post_update));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::span!(
                        Level::INFO,
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|_request: &Request, _span: &tracing::Span| {
                    tracing::event!(Level::DEBUG, "received request");
                })
                .on_response(
                    |_response: &axum::response::Response,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(Level::INFO, latency = ?latency, "request completed");
                    },
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::{Reading, SystemOverview};
    use crate::series::Aggregator;
    use crate::service::DashboardService;
    use crate::source::ReadingSource;
    use crate::state::SeriesStore;
    use async_trait::async_trait;
    use axum::{body::Body, http::StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Offline;

    #[async_trait]
    impl ReadingSource for Offline {
        async fn system_overview(&self) -> Result<SystemOverview> {
            Err(AppError::Internal("offline".to_string()))
        }

        async fn recent_readings(&self, _installation_id: i64, _limit: usize) -> Result<Vec<Reading>> {
            Ok(Vec::new())
        }
    }

    fn app() -> Router {
        let service = DashboardService::new(Arc::new(Offline), Aggregator::utc(), 10);
        create_router(AppState::new(service, SeriesStore::new(*Aggregator::utc().offset())))
    }

    #[tokio::test]
    async fn test_health_route() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = tokio_test::assert_ok!(app().oneshot(request).await);

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::builder()
            .uri("/api/v1/energy/unknown")
            .body(Body::empty())
            .unwrap();
        let response = tokio_test::assert_ok!(app().oneshot(request).await);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_updates_route_rejects_get() {
        let request = Request::builder()
            .uri("/api/v1/energy/updates")
            .body(Body::empty())
            .unwrap();
        let response = tokio_test::assert_ok!(app().oneshot(request).await);

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
