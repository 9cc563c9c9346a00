//! Response construction.
//!
//! Transport failures get a plain-text body; everything that reached the
//! dispatcher gets a JSON [`OutboundResponse`] with status 200.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::types::OutboundResponse;

pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const BAD_JSON: &str = "Error decoding JSON";

/// Plain-text error response.
pub fn plain_error(status: StatusCode, text: &'static str) -> Response {
    (status, text).into_response()
}

/// Structured outcome; always 200, failure is reported in-band.
pub fn outcome(resp: OutboundResponse) -> Response {
    (StatusCode::OK, Json(resp)).into_response()
}
