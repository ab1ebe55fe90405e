use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{IncidentId, IncidentReport};
use super::repository::IncidentRepository;
use super::service::{IncidentService, IncidentServiceError};
use super::views::CrimeIncidentView;

/// Optional `?type=` filter shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TypeFilter {
    #[serde(rename = "type")]
    pub(crate) incident_type: Option<String>,
}

/// Router exposing incident intake, badge counts, and dashboard listings.
pub fn incident_router<R>(service: Arc<IncidentService<R>>) -> Router
where
    R: IncidentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/events",
            post(add_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/events/new/count", get(new_count_handler::<R>))
        .route("/api/v1/events/mark-as-read", post(mark_all_handler::<R>))
        .route(
            "/api/v1/events/:incident_id/mark-as-read",
            post(mark_one_handler::<R>),
        )
        .route("/api/v1/crime-incidents", get(crime_incidents_handler::<R>))
        .with_state(service)
}

pub(crate) async fn add_handler<R>(
    State(service): State<Arc<IncidentService<R>>>,
    axum::Json(report): axum::Json<IncidentReport>,
) -> Response
where
    R: IncidentRepository + 'static,
{
    match service.add(report) {
        Ok(incident) => (StatusCode::OK, axum::Json(incident)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn new_count_handler<R>(State(service): State<Arc<IncidentService<R>>>) -> Response
where
    R: IncidentRepository + 'static,
{
    match service.new_count() {
        Ok(count) => (StatusCode::OK, axum::Json(count)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<IncidentService<R>>>,
    Query(filter): Query<TypeFilter>,
) -> Response
where
    R: IncidentRepository + 'static,
{
    match service.list(filter.incident_type.as_deref()) {
        Ok(incidents) => (StatusCode::OK, axum::Json(incidents)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn mark_all_handler<R>(State(service): State<Arc<IncidentService<R>>>) -> Response
where
    R: IncidentRepository + 'static,
{
    match service.mark_all_seen() {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn mark_one_handler<R>(
    State(service): State<Arc<IncidentService<R>>>,
    Path(incident_id): Path<u64>,
) -> Response
where
    R: IncidentRepository + 'static,
{
    match service.mark_seen(IncidentId(incident_id)) {
        Ok(incident) => (StatusCode::OK, axum::Json(incident)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn crime_incidents_handler<R>(
    State(service): State<Arc<IncidentService<R>>>,
    Query(filter): Query<TypeFilter>,
) -> Response
where
    R: IncidentRepository + 'static,
{
    match service.list(filter.incident_type.as_deref()) {
        Ok(incidents) => {
            let body: Vec<CrimeIncidentView> =
                incidents.iter().map(CrimeIncidentView::from).collect();
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: IncidentServiceError) -> Response {
    let status = match err {
        IncidentServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        IncidentServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
