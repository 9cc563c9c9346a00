//! Webhook request handler.
//!
//! ```text
//! RECEIVED ─┬─ method != POST ──▶ 405 text/plain
//!           ├─ body not JSON ───▶ 400 text/plain
//!           └─ DECODED → DISPATCHED → RESPONDED (200 application/json)
//! ```

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;

use crate::http::request::{client_ip, user_agent};
use crate::http::response::{self, BAD_JSON, METHOD_NOT_ALLOWED};
use crate::http::server::AppState;
use crate::http::types::InboundMessage;

/// `/wh`: decode the action message, dispatch it and report the outcome.
pub async fn webhook(State(state): State<AppState>, request: Request) -> Response {
    if request.method() != Method::POST {
        return response::plain_error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED);
    }

    let ip = client_ip(&request);
    tracing::info!(
        ip = %ip,
        user_agent = %user_agent(request.headers()),
        path = %request.uri().path(),
        "Received request"
    );

    // The body limit layer bounds this read.
    let body = match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, ip = %ip, "Error reading request body");
            return response::plain_error(StatusCode::BAD_REQUEST, BAD_JSON);
        }
    };

    // Only the first JSON value counts; anything after it is ignored.
    let first = serde_json::Deserializer::from_slice(&body)
        .into_iter::<InboundMessage>()
        .next();
    let msg = match first {
        Some(Ok(msg)) => msg,
        Some(Err(e)) => {
            tracing::error!(error = %e, ip = %ip, "Error decoding JSON");
            return response::plain_error(StatusCode::BAD_REQUEST, BAD_JSON);
        }
        None => {
            tracing::error!(error = "empty body", ip = %ip, "Error decoding JSON");
            return response::plain_error(StatusCode::BAD_REQUEST, BAD_JSON);
        }
    };

    tracing::info!(action = %msg.action, ip = %ip, "Received action");

    let resp = state.dispatcher.dispatch(&msg).await;

    tracing::info!(success = resp.success, action = %msg.action, "{}", resp.message);

    response::outcome(resp)
}
