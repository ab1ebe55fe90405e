use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::chat::{chat_router, ChatService};

fn router() -> axum::Router {
    let (service, _) = build_service();
    chat_router(Arc::new(service))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
        .expect("request builds")
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn login_returns_profile_or_unauthorized() {
    let router = router();

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/chats/login",
            json!({ "name": "pim", "password": "Pim" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json_body(response).await,
        json!({ "name": "Pim", "initials": "PM" })
    );

    let response = router
        .oneshot(post_json(
            "/api/chats/login",
            json!({ "name": "Pim", "password": "wrong" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_route_lists_peers_without_passwords() {
    let response = router()
        .oneshot(
            Request::get("/api/chats/users?exclude=Pim")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let peers = payload.as_array().expect("array payload");
    assert_eq!(peers.len(), 3);
    assert_eq!(peers[0]["name"], json!("Ploy"));
    assert_eq!(peers[0]["lastMessage"], json!("Hey Ploy! How's the report?"));
    assert_eq!(peers[0]["unread"], json!(0));
    assert!(peers[0].get("password").is_none());
}

#[tokio::test]
async fn send_then_read_history() {
    let router = router();

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/chats/Sunny/Parn/send",
            json!({ "text": "Copy that", "time": "2025-11-11 09:30:00" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let sent = read_json_body(response).await;
    assert_eq!(sent["sender"], json!("Sunny"));
    assert_eq!(sent["time"], json!("2025-11-11 09:30:00"));

    let response = router
        .oneshot(
            Request::get("/api/chats/Parn/Sunny/messages")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let history = read_json_body(response).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));
    assert_eq!(history[0]["text"], json!("Copy that"));
}

#[tokio::test]
async fn send_without_time_uses_server_clock() {
    let response = router()
        .oneshot(post_json("/api/chats/Pim/Ploy/send", json!({ "text": "hello" })))
        .await
        .expect("route executes");

    let sent = read_json_body(response).await;
    let time = sent["time"].as_str().expect("time filled in");
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
}

#[tokio::test]
async fn blank_message_is_bad_request() {
    let response = router()
        .oneshot(post_json("/api/chats/Pim/Ploy/send", json!({ "text": "" })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mark_read_routes_clear_counters() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let router = chat_router(service.clone());

    let response = router
        .clone()
        .oneshot(post_json("/api/chats/Ploy/mark-read/Pim", json!({})))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(post_json("/api/chats/Parn/mark-read", json!({})))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(service.peers("Ploy").expect("peers")[0].unread, 0);
    assert!(service
        .peers("Parn")
        .expect("peers")
        .iter()
        .all(|peer| peer.unread == 0));
}

#[tokio::test]
async fn repository_outage_is_internal_error() {
    let router = chat_router(Arc::new(ChatService::new(Arc::new(OfflineChatRepository))));

    let response = router
        .oneshot(
            Request::get("/api/chats/users?exclude=Pim")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
