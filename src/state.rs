//! Shared application state handed to every request handler.

use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

use crate::config::Config;

/// Injected into handlers via [`axum::extract::State`].
///
/// Handlers never read the process environment themselves; they take a
/// [`Config`] snapshot from here once per request.
pub struct AppState {
    /// Atomically-swappable live config. The lock is held only long enough to
    /// clone the `Arc`, so readers never wait on each other.
    config_lock: RwLock<Arc<Config>>,
    /// Config file being watched for changes, if the service was started with one.
    pub config_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: Arc<Config>, config_path: Option<PathBuf>) -> Self {
        Self {
            config_lock: RwLock::new(config),
            config_path,
        }
    }

    /// Returns a snapshot of the current live config.
    ///
    /// A poisoned lock still holds a complete `Arc<Config>` (writers only ever
    /// swap the pointer), so the inner value is used rather than panicking.
    pub fn config(&self) -> Arc<Config> {
        match self.config_lock.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Atomically replaces the live config. Requests already holding a
    /// snapshot keep answering with it.
    pub fn replace_config(&self, new: Arc<Config>) {
        match self.config_lock.write() {
            Ok(mut guard) => *guard = new,
            Err(poisoned) => *poisoned.into_inner() = new,
        }
    }
}
