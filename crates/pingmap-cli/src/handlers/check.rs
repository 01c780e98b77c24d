//! Check command handler - topology validation.

use anyhow::Result;

use pingmap_core::domain::Topology;
use pingmap_core::settings::Settings;

/// Execute the check command.
///
/// Loads and validates the topology document, then prints a summary.
pub async fn execute(settings: &Settings) -> Result<()> {
    let path = settings.effective_topology_path();
    let topology = Topology::load(path).await?;

    println!(
        "Topology OK: {} pools, {} tunnels ({})",
        topology.pools.len(),
        topology.tunnel_count(),
        path
    );
    for pool in &topology.pools {
        println!("  {:<16} {} tunnels", pool.name, pool.tunnels.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_valid_topology() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topology.json");
        std::fs::write(
            &path,
            r#"{ "pools": [ { "name": "eu", "tunnels": [ { "address": "10.0.0.1:443" } ] } ] }"#,
        )
        .unwrap();

        let mut settings = Settings::with_defaults();
        settings.topology_path = Some(path.to_string_lossy().into_owned());
        assert!(execute(&settings).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_missing_topology_fails() {
        let mut settings = Settings::with_defaults();
        settings.topology_path = Some("/definitely/not/here.json".to_string());
        assert!(execute(&settings).await.is_err());
    }
}
