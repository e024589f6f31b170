use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};

mod api;
mod config;
mod error;
mod event;
mod state;

use crate::{config::Config, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = std::env::var(config::CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);

    let config = Config::load(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to read configuration from environment".to_string(),
    })?;

    info!(
        port = config.port,
        env = %config.env,
        config_file = ?config_path,
        "event-orchestrator starting"
    );

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(Arc::new(config), config_path));

    if state.config_path.is_some() {
        tokio::spawn(config_watcher(Arc::clone(&state)));
    }

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind listener");
            return Err(e).with_context(|| format!("binding {addr}"));
        }
    };
    info!(%addr, "listening");

    let app = api::router(Arc::clone(&state)).layer(
        tower_http::trace::TraceLayer::new_for_http()
            .make_span_with(tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
            .on_response(tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO)),
    );

    tokio::select! {
        result = axum::serve(listener, app) => {
            result.context("HTTP server error")?;
        }
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

/// `RUST_LOG` picks the filter; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "event_orchestrator=info,tower_http=warn".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Background task: polls the config file every 5 seconds and hot-reloads on change.
///
/// Uses filesystem `mtime` for change detection. Parse failures are logged and
/// ignored; the running config is unchanged. A new `port` only takes effect
/// after a restart.
async fn config_watcher(state: Arc<AppState>) {
    let Some(path) = state.config_path.clone() else {
        return;
    };

    let mut last_mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();

    // Initial tick fires immediately; skip it so we don't reload on startup.
    let mut interval = tokio::time::interval(Duration::from_secs(5));
    interval.tick().await;

    loop {
        interval.tick().await;

        let mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        if mtime == last_mtime {
            continue;
        }

        match Config::load(Some(path.as_path())) {
            Ok(new_cfg) => {
                let current = state.config();
                if new_cfg.port != current.port {
                    warn!(
                        running = current.port,
                        configured = new_cfg.port,
                        "port change requires a restart"
                    );
                }
                info!(path = %path.display(), env = %new_cfg.env, "config hot-reloaded");
                state.replace_config(Arc::new(new_cfg));
                last_mtime = mtime;
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "config reload failed, keeping previous config"
                );
            }
        }
    }
}
