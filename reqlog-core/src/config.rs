use crate::error::ReqlogError;
use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReqlogConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Reported by the status endpoint.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Maximum accepted request body.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Log store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Capacity bound; oldest entries are evicted past this.
    #[serde(default = "default_max_logs")]
    pub max_logs: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub prometheus: PrometheusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrometheusConfig {
    /// When false, no counters are registered or updated.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_addr() -> String { "0.0.0.0:3001".into() }
fn default_environment() -> String { "development".into() }
fn default_body_limit() -> usize { 10 * 1024 * 1024 }
fn default_max_logs() -> usize { 1000 }
fn default_metrics_path() -> String { "/metrics".into() }

/// Paths served by the built-in router.
const RESERVED_PATHS: &[&str] = &["/", "/health", "/dashboard", "/public", "/api"];
/// Prefixes owned by nested routers and the asset wildcard.
const RESERVED_PREFIXES: &[&str] = &["/api/", "/public/"];

// ── Impls ─────────────────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            environment: default_environment(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_logs: default_max_logs() }
    }
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_metrics_path(),
        }
    }
}

impl ReqlogConfig {
    /// Load configuration from YAML file + `REQLOG_` env overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: ReqlogConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("REQLOG_").split("__"))
            .extract()?;
        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReqlogError> {
        if self.store.max_logs == 0 {
            return Err(ReqlogError::Config("store.max_logs must be at least 1".into()));
        }
        let path = self.observability.prometheus.path.as_str();
        if !path.starts_with('/') {
            return Err(ReqlogError::Config(format!(
                "observability.prometheus.path must start with '/', got '{path}'"
            )));
        }
        if path.contains(['{', '}']) {
            return Err(ReqlogError::Config(format!(
                "observability.prometheus.path must be a literal path, got '{path}'"
            )));
        }
        if RESERVED_PATHS.contains(&path) || RESERVED_PREFIXES.iter().any(|p| path.starts_with(p)) {
            return Err(ReqlogError::Config(format!(
                "observability.prometheus.path '{path}' collides with a built-in route"
            )));
        }
        Ok(())
    }
}
