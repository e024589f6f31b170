//! Liveness probe endpoint.

use axum::{http::StatusCode, response::IntoResponse};

/// `ANY /health` — always returns 200 with the plain-text body `ok`.
///
/// Takes no input and touches no state, so it answers even while the rest of
/// the service is misconfigured. Safe to use as a container liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
