//! Serve command handler.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use pingmap_axum::{ServerConfig, start_server};
use pingmap_core::settings::Settings;

/// Execute the serve command.
///
/// Builds the server config from settings, applies command-line overrides,
/// and runs the web server until terminated.
pub async fn execute(
    settings: &Settings,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = ServerConfig::from_settings(settings)?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(static_dir) = static_dir {
        config = config.with_static_dir(static_dir);
    }

    debug!(?config, "starting server");
    println!("Serving latency map on http://localhost:{}", config.port);
    if config.server_list.is_none() {
        println!("No server_list configured; /api/servers will answer 503");
    }

    start_server(config).await
}
