//! Probe command handler - one-shot probing pass.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use pingmap_axum::PingFeed;
use pingmap_core::domain::Topology;
use pingmap_core::services::{LatencyService, ProbeScheduling};
use pingmap_core::settings::{Settings, validate_settings};
use pingmap_probe::TcpProber;

/// Execute the probe command.
///
/// Runs a single probing pass over the configured topology and prints the
/// per-pool results.
pub async fn execute(settings: &Settings, json: bool) -> Result<()> {
    validate_settings(settings)?;

    let topology = Topology::load(settings.effective_topology_path()).await?;
    let prober = Arc::new(TcpProber::new(Duration::from_millis(
        settings.effective_probe_timeout_ms(),
    )));
    let service = LatencyService::new(
        topology,
        prober,
        ProbeScheduling {
            ttl: Duration::from_millis(settings.effective_cache_ttl_ms()),
            concurrency: settings.effective_probe_concurrency(),
        },
    );

    let snapshot = service.refresh().await;

    if json {
        let feed = PingFeed::from(snapshot.as_ref());
        println!("{}", serde_json::to_string_pretty(&feed)?);
        return Ok(());
    }

    for pool in &snapshot.pools {
        println!(
            "{}: {} ({:?})",
            pool.name,
            pool.aggregate.display_average(),
            pool.aggregate.tier
        );
        for tunnel in &pool.tunnels {
            println!("  {:<24} {}", tunnel.address, tunnel.outcome);
        }
    }
    Ok(())
}
