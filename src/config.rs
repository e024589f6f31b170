//! Configuration types for event-orchestrator.
//!
//! The service runs with no configuration at all: it listens on port 8080 and
//! reports an empty `env`. Two environment variables override the defaults,
//! and an optional TOML file (named by `ORCHESTRATOR_CONFIG`) can supply the
//! same keys for deployments that prefer files.
//!
//! Priority, highest first:
//! 1. `PORT` / `ENV` environment variables
//! 2. The TOML file
//! 3. Built-in defaults
//!
//! # Example
//! ```toml
//! port = 8080
//! env  = "staging"
//! ```

use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming the optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "ORCHESTRATOR_CONFIG";

/// Resolved service configuration.
///
/// Built once and shared as `Arc<Config>`; a reload produces a whole new value
/// rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TCP port the listener binds on all interfaces.
    pub port: u16,
    /// Opaque deployment label echoed in every `/process` acknowledgment.
    pub env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: defaults::port(),
            env: String::new(),
        }
    }
}

/// On-disk shape of the optional config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub env: Option<String>,
}

impl FileConfig {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).context("parsing config TOML")
    }
}

impl Config {
    /// Load from the optional file at `path`, then overlay the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an explicit variable lookup.
    pub fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let file = path.map(FileConfig::read).transpose()?;
        Self::from_sources(file, lookup)
    }

    /// Layer defaults, `file`, and whatever `lookup` returns for `PORT` / `ENV`.
    ///
    /// `lookup` stands in for `std::env::var` so callers (and tests) can build a
    /// config without touching process-global state.
    pub fn from_sources(
        file: Option<FileConfig>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(port) = file.port {
                config.port = port;
            }
            if let Some(env) = file.env {
                config.env = env;
            }
        }

        // An empty PORT means "unset"; an empty ENV is a real value.
        if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT `{port}` is not a valid TCP port"))?;
        }
        if let Some(env) = lookup("ENV") {
            config.env = env;
        }

        Ok(config)
    }

    /// Listen address: every interface on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

mod defaults {
    pub fn port() -> u16 { 8080 }
}
