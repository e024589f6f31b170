//! Event endpoint (`/process`).
//!
//! Decodes a file-arrival [`Event`], logs it, and acknowledges with a
//! [`ProcessResult`]. There is no downstream dispatch yet: the acknowledgment
//! only means the payload was well-formed.
//!
//! The body is taken as raw bytes instead of through axum's `Json` extractor.
//! `Json` would answer 415 for a missing content type and 413 past its default
//! body limit; this endpoint answers only 200 or 400.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    Json,
};
use tracing::info;

use crate::{
    error::AppError,
    event::{Event, ProcessResult},
    state::AppState,
};

/// `ANY /process` — decode the body as an [`Event`] and acknowledge it.
///
/// `env` comes from the config snapshot taken while building the response, so
/// a reload between two requests shows up in the second one.
pub async fn process(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<ProcessResult>, AppError> {
    let bytes = to_bytes(body, usize::MAX).await?;
    let event = Event::decode(&bytes)?;

    info!(
        filename = %event.filename,
        schema_version = %event.schema_version,
        "processing file"
    );

    let config = state.config();
    Ok(Json(ProcessResult::processed(config.env.as_str())))
}
