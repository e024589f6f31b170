//! HTTP error type for axum request handlers.
//!
//! Every failure a handler can hit is a decode failure from the caller's point
//! of view, so every [`AppError`] variant renders the same response: `400` with
//! the plain-text body `invalid payload`. The underlying cause is logged at
//! debug level and never echoed back.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn my_handler(body: Body) -> Result<Json<ProcessResult>, AppError> {
//!     let bytes = to_bytes(body, usize::MAX).await?;
//!     let event = Event::decode(&bytes)?;
//!     Ok(Json(ProcessResult::processed("")))
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Fixed diagnostic returned for every rejected request body.
pub const INVALID_PAYLOAD: &str = "invalid payload";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Body was read but is not a JSON object of the expected shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Body contained no JSON value at all.
    #[error("invalid payload: empty body")]
    EmptyBody,

    /// Body could not be read to completion (client hung up, truncated chunk).
    #[error("invalid payload: reading body: {0}")]
    BodyRead(#[from] axum::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "rejecting request body");
        (StatusCode::BAD_REQUEST, INVALID_PAYLOAD).into_response()
    }
}
