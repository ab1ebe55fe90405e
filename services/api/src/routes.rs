use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use poliz::chat::{chat_router, ChatRepository, ChatService};
use poliz::incidents::{incident_router, IncidentRepository, IncidentService};
use poliz::performance::{performance_router, PerformanceService};
use serde_json::json;
use std::sync::Arc;

/// Services behind the public HTTP surface.
pub(crate) struct Services<I, C> {
    pub(crate) incidents: Arc<IncidentService<I>>,
    pub(crate) chats: Arc<ChatService<C>>,
    pub(crate) performance: Arc<PerformanceService<C, I>>,
}

pub(crate) fn with_dashboard_routes<I, C>(services: Services<I, C>) -> Router
where
    I: IncidentRepository + 'static,
    C: ChatRepository + 'static,
{
    incident_router(services.incidents)
        .merge(chat_router(services.chats))
        .merge(performance_router(services.performance))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
