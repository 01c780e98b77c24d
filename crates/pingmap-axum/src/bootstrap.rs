//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together for
//! the web adapter: it loads settings and the topology, constructs the TCP
//! prober and the latency service, and runs the startup probing pass before
//! the listener binds.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;

use pingmap_core::domain::Topology;
use pingmap_core::services::{LatencyService, ProbeScheduling};
use pingmap_core::settings::{ServerListConfig, Settings, SettingsError, validate_settings};
use pingmap_probe::TcpProber;

/// Timeout for upstream server-list requests.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Path to the topology document.
    pub topology_path: PathBuf,
    /// Connect deadline per probe.
    pub probe_timeout: Duration,
    /// Snapshot freshness window.
    pub cache_ttl: Duration,
    /// Bound on concurrent probes within a pass.
    pub probe_concurrency: usize,
    /// Optional path to static map assets.
    pub static_dir: Option<PathBuf>,
    /// Optional upstream server-list API.
    pub server_list: Option<ServerListConfig>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Build a config from validated settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        validate_settings(settings)?;
        Ok(Self {
            port: settings.effective_listen_port(),
            topology_path: PathBuf::from(settings.effective_topology_path()),
            probe_timeout: Duration::from_millis(settings.effective_probe_timeout_ms()),
            cache_ttl: Duration::from_millis(settings.effective_cache_ttl_ms()),
            probe_concurrency: settings.effective_probe_concurrency(),
            static_dir: settings.static_dir.as_ref().map(PathBuf::from),
            server_list: settings.server_list.clone(),
            cors: CorsConfig::default(),
        })
    }

    /// Set the static directory for map asset serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The probing core.
    pub latency: Arc<LatencyService>,
    /// Client for the upstream server-list proxy.
    pub http: reqwest::Client,
    /// Upstream server-list API, if configured.
    pub server_list: Option<ServerListConfig>,
}

/// Wire up the context: topology, prober, latency service, upstream client.
///
/// Runs one unconditional probing pass so the first request is answered from
/// a published snapshot instead of paying the full probe latency.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let topology = Topology::load(&config.topology_path).await?;
    info!(
        pools = topology.pools.len(),
        tunnels = topology.tunnel_count(),
        path = %config.topology_path.display(),
        "topology loaded"
    );

    let prober = Arc::new(TcpProber::new(config.probe_timeout));
    let latency = Arc::new(LatencyService::new(
        topology,
        prober,
        ProbeScheduling {
            ttl: config.cache_ttl,
            concurrency: config.probe_concurrency,
        },
    ));

    let started = Instant::now();
    let snapshot = latency.refresh().await;
    info!(
        pools = snapshot.pools.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "startup probing pass complete"
    );

    let http = reqwest::Client::builder().timeout(UPSTREAM_TIMEOUT).build()?;

    Ok(AxumContext {
        latency,
        http,
        server_list: config.server_list.clone(),
    })
}

/// Start the web server on the configured port.
///
/// If `config.static_dir` is set, serves the map assets with an SPA
/// fallback. Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;

    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("pingmap listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
