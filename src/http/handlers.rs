//! Per-request orchestration.
//!
//! # Responsibilities
//! - Sweep expired tasks before any request is served
//! - Serve the built-in liveness and robots responses
//! - Answer task status polls
//! - Turn provider-prefixed requests into tracked upstream calls

use std::time::Instant;

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy;
use crate::tasks::now_ms;

/// Middleware: remove expired tasks before the request is handled.
///
/// Cheap enough to run on every request since the task count is bounded by
/// traffic rate times the expiry window.
pub async fn sweep_expired(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.tasks.sweep(now_ms());
    next.run(request).await
}

/// Liveness probe body, served on `/` and `/index.html`.
pub async fn index() -> Html<&'static str> {
    Html("service is running!")
}

/// Disallow-all robots policy.
pub async fn robots() -> &'static str {
    "User-agent: *\nDisallow: /"
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(rename = "taskId")]
    task_id: Option<String>,
}

/// `GET /task/status?taskId=<id>`: report the current state of a task.
pub async fn task_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let start = Instant::now();

    let Some(task_id) = query.task_id.filter(|id| !id.is_empty()) else {
        metrics::record_request("GET", 400, "status", start);
        return (StatusCode::BAD_REQUEST, "Task ID is required").into_response();
    };

    match state.tasks.get(&task_id) {
        Some(record) => {
            metrics::record_request("GET", 200, "status", start);
            (StatusCode::OK, Json(record)).into_response()
        }
        None => {
            metrics::record_request("GET", 404, "status", start);
            (StatusCode::NOT_FOUND, "Task not found").into_response()
        }
    }
}

/// Fallback handler: proxy dispatch for provider prefixes, 404 otherwise.
///
/// On a matched route the outbound request is constructed up front, a task
/// is created, and the forwarder is spawned without being awaited. The
/// caller gets the task id immediately and polls for the outcome.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let Some((prefix, target_url)) = state
        .routes
        .resolve(&path)
        .map(|m| (m.prefix.to_string(), format!("{}{}", m.origin, m.suffix)))
    else {
        tracing::debug!(request_id = %request_id, path = %path, "No route matched");
        metrics::record_request(method.as_str(), 404, "none", start);
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    let (parts, body) = request.into_parts();

    let outbound = match proxy::build_upstream_request(
        &state.client,
        method.clone(),
        &target_url,
        parts.headers,
        body,
        state.max_body_size,
    )
    .await
    {
        Ok(outbound) => outbound,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                target = %target_url,
                error = %e,
                "Failed to construct upstream request"
            );
            metrics::record_request(method.as_str(), 500, &prefix, start);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    let task_id = state.tasks.create();
    tokio::spawn(proxy::forward(
        state.tasks.clone(),
        task_id.clone(),
        state.client.clone(),
        outbound,
    ));

    tracing::debug!(
        request_id = %request_id,
        task_id = %task_id,
        method = %method,
        target = %target_url,
        "Upstream call dispatched"
    );
    metrics::record_request(method.as_str(), 202, &prefix, start);

    (StatusCode::ACCEPTED, Json(json!({ "taskId": task_id }))).into_response()
}
