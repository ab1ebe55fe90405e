use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::service::{PerformanceError, PerformanceService, SummaryQuery};
use crate::chat::ChatRepository;
use crate::incidents::IncidentRepository;

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryParams {
    pub(crate) from: NaiveDate,
    pub(crate) to: NaiveDate,
    #[serde(default)]
    pub(crate) officer: Option<String>,
}

pub fn performance_router<C, I>(service: Arc<PerformanceService<C, I>>) -> Router
where
    C: ChatRepository + 'static,
    I: IncidentRepository + 'static,
{
    Router::new()
        .route("/api/v1/performance/summary", get(summary_handler::<C, I>))
        .with_state(service)
}

pub(crate) async fn summary_handler<C, I>(
    State(service): State<Arc<PerformanceService<C, I>>>,
    Query(params): Query<SummaryParams>,
) -> Response
where
    C: ChatRepository + 'static,
    I: IncidentRepository + 'static,
{
    let query = SummaryQuery {
        from: params.from,
        to: params.to,
        officer: params.officer,
    };

    match service.summary(&query, Utc::now().date_naive()) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => {
            let status = match err {
                PerformanceError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
                PerformanceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}
