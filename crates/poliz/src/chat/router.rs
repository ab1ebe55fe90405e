use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;

use super::repository::ChatRepository;
use super::service::{ChatService, ChatServiceError};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) password: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PeerQuery {
    #[serde(default)]
    pub(crate) exclude: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SendRequest {
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) time: Option<String>,
}

pub fn chat_router<R>(service: Arc<ChatService<R>>) -> Router
where
    R: ChatRepository + 'static,
{
    // matchit needs identical parameter names at the same depth
    Router::new()
        .route("/api/chats/login", post(login_handler::<R>))
        .route("/api/chats/users", get(peers_handler::<R>))
        .route("/api/chats/:first/:second/messages", get(messages_handler::<R>))
        .route("/api/chats/:first/:second/send", post(send_handler::<R>))
        .route(
            "/api/chats/:first/mark-read/:second",
            post(mark_read_handler::<R>),
        )
        .route("/api/chats/:first/mark-read", post(mark_all_read_handler::<R>))
        .with_state(service)
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<ChatService<R>>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    R: ChatRepository + 'static,
{
    match service.login(&request.name, &request.password) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn peers_handler<R>(
    State(service): State<Arc<ChatService<R>>>,
    Query(query): Query<PeerQuery>,
) -> Response
where
    R: ChatRepository + 'static,
{
    match service.peers(&query.exclude) {
        Ok(peers) => (StatusCode::OK, axum::Json(peers)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn messages_handler<R>(
    State(service): State<Arc<ChatService<R>>>,
    Path((first, second)): Path<(String, String)>,
) -> Response
where
    R: ChatRepository + 'static,
{
    match service.messages(&first, &second) {
        Ok(messages) => (StatusCode::OK, axum::Json(messages)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Clients usually send their own timestamp; the server clock fills in when they don't.
pub(crate) async fn send_handler<R>(
    State(service): State<Arc<ChatService<R>>>,
    Path((sender, receiver)): Path<(String, String)>,
    axum::Json(request): axum::Json<SendRequest>,
) -> Response
where
    R: ChatRepository + 'static,
{
    let text = request.text.unwrap_or_default();
    let time = request
        .time
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    match service.send(&sender, &receiver, &text, Some(time)) {
        Ok(message) => (StatusCode::OK, axum::Json(message)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn mark_read_handler<R>(
    State(service): State<Arc<ChatService<R>>>,
    Path((username, peer)): Path<(String, String)>,
) -> Response
where
    R: ChatRepository + 'static,
{
    match service.mark_read(&username, &peer) {
        Ok(_) => StatusCode::OK.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn mark_all_read_handler<R>(
    State(service): State<Arc<ChatService<R>>>,
    Path(username): Path<String>,
) -> Response
where
    R: ChatRepository + 'static,
{
    match service.mark_all_read(&username) {
        Ok(_) => StatusCode::OK.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ChatServiceError) -> Response {
    let status = match err {
        ChatServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ChatServiceError::EmptyMessage => StatusCode::BAD_REQUEST,
        ChatServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
