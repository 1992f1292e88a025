//! Outbound request construction and fire-and-forget execution.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::observability::metrics;
use crate::tasks::{TaskStatus, TaskStore};

/// Failure taxonomy for one upstream exchange.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error("failed to construct upstream request: {0}")]
    Build(reqwest::Error),

    #[error("upstream request failed: {0}")]
    Upstream(reqwest::Error),

    #[error("upstream response was not valid JSON: {0}")]
    Decode(reqwest::Error),
}

/// Build the outbound request from the inbound one.
///
/// Method and headers pass through untouched, except `Host` and
/// `Content-Length`, which the client derives from the target URL and the
/// buffered body. The body is read in full here, bounded by `max_body_size`.
pub async fn build_upstream_request(
    client: &reqwest::Client,
    method: Method,
    target_url: &str,
    mut headers: HeaderMap,
    body: Body,
    max_body_size: usize,
) -> Result<reqwest::Request, ForwardError> {
    let url = Url::parse(target_url)?;
    let bytes = axum::body::to_bytes(body, max_body_size).await?;

    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    client
        .request(method, url)
        .headers(headers)
        .body(bytes)
        .build()
        .map_err(ForwardError::Build)
}

/// Execute the upstream exchange and record the outcome on the task.
///
/// Runs as a detached tokio task. The original caller already holds the
/// task id; every failure past this point is observable only by polling.
pub async fn forward(
    tasks: TaskStore,
    task_id: String,
    client: reqwest::Client,
    request: reqwest::Request,
) {
    let target = request.url().to_string();

    match execute(&client, request).await {
        Ok(body) => {
            tracing::debug!(task_id = %task_id, target = %target, "Upstream call completed");
            tasks.update(&task_id, TaskStatus::Completed, Some(body), None);
            metrics::record_task_outcome("completed");
        }
        Err(e) => {
            tracing::warn!(task_id = %task_id, target = %target, error = %e, "Upstream call failed");
            tasks.update(&task_id, TaskStatus::Failed, None, Some(e.to_string()));
            metrics::record_task_outcome("failed");
        }
    }
}

async fn execute(client: &reqwest::Client, request: reqwest::Request) -> Result<Value, ForwardError> {
    let response = client
        .execute(request)
        .await
        .map_err(ForwardError::Upstream)?;

    response.json::<Value>().await.map_err(ForwardError::Decode)
}
