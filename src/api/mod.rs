//! HTTP surface: path-based routing over the two endpoints.
//!
//! Both routes accept any method. Anything else falls through to axum's
//! default 404.

use std::sync::Arc;

use axum::{routing::any, Router};

use crate::state::AppState;

pub mod health;
pub mod process;

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", any(health::health))
        .route("/process", any(process::process))
        .with_state(state)
}
