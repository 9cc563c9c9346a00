//! Request inspection helpers.
//!
//! # Responsibilities
//! - Work out the client address (proxy header or TCP peer)
//! - Extract the user agent for logging

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::{header, HeaderMap};

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Client address: first `X-Forwarded-For` hop, else the peer socket address.
pub fn client_ip(request: &Request) -> String {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    client_ip_from(request.headers(), peer)
}

fn client_ip_from(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.to_string(),
        (None, None) => "unknown".to_string(),
    }
}

pub fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
