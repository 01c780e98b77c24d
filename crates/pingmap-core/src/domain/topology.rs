//! Static probing topology: named pools of `host:port` tunnels.
//!
//! The topology is supplied as a JSON document and loaded once before the
//! first probing pass. There is no dynamic discovery; a tunnel lives for the
//! whole process lifetime.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a topology document.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// The topology file could not be read.
    #[error("failed to read topology file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for the expected shape.
    #[error("failed to parse topology document: {0}")]
    Parse(#[from] serde_json::Error),

    /// No tunnels anywhere - nothing to probe, fatal to startup.
    #[error("topology contains no tunnels to probe")]
    Empty,

    /// Two pools share a name.
    #[error("duplicate pool name '{0}'")]
    DuplicatePool(String),

    /// A tunnel address is not `host:port`.
    #[error("invalid tunnel address '{address}' in pool '{pool}': expected host:port")]
    InvalidAddress { pool: String, address: String },

    /// Two tunnels in the same pool share an address.
    #[error("duplicate tunnel address '{address}' in pool '{pool}'")]
    DuplicateAddress { pool: String, address: String },
}

/// One network endpoint within a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelSpec {
    /// Endpoint address, `host:port`. Identity within the pool.
    pub address: String,
}

/// A named group of tunnels representing one logical server cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSpec {
    /// Pool name, the map-marker key. Unique across the topology.
    pub name: String,

    /// Ordered tunnels owned by this pool.
    pub tunnels: Vec<TunnelSpec>,
}

/// The full probing topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Ordered pools; snapshot ordering follows this document.
    pub pools: Vec<PoolSpec>,
}

impl Topology {
    /// Parse and validate a topology from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, TopologyError> {
        let topology: Self = serde_json::from_str(raw)?;
        topology.validate()?;
        Ok(topology)
    }

    /// Read, parse, and validate a topology file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| TopologyError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&raw)
    }

    /// Validate pool/tunnel identity and address shape.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.tunnel_count() == 0 {
            return Err(TopologyError::Empty);
        }

        let mut pool_names = HashSet::new();
        for pool in &self.pools {
            if !pool_names.insert(pool.name.as_str()) {
                return Err(TopologyError::DuplicatePool(pool.name.clone()));
            }

            let mut addresses = HashSet::new();
            for tunnel in &pool.tunnels {
                if !is_host_port(&tunnel.address) {
                    return Err(TopologyError::InvalidAddress {
                        pool: pool.name.clone(),
                        address: tunnel.address.clone(),
                    });
                }
                if !addresses.insert(tunnel.address.as_str()) {
                    return Err(TopologyError::DuplicateAddress {
                        pool: pool.name.clone(),
                        address: tunnel.address.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Total number of tunnels across all pools.
    #[must_use]
    pub fn tunnel_count(&self) -> usize {
        self.pools.iter().map(|pool| pool.tunnels.len()).sum()
    }
}

/// `host:port` with a non-empty host and a non-zero port.
fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok_and(|p| p != 0),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pools": [
            { "name": "eu-1", "tunnels": [
                { "address": "185.44.10.3:443" },
                { "address": "185.44.10.4:443" }
            ]},
            { "name": "na-1", "tunnels": [
                { "address": "142.11.0.9:443" }
            ]}
        ]
    }"#;

    #[test]
    fn test_parses_and_counts() {
        let topology = Topology::from_json(SAMPLE).unwrap();
        assert_eq!(topology.pools.len(), 2);
        assert_eq!(topology.tunnel_count(), 3);
        assert_eq!(topology.pools[0].name, "eu-1");
    }

    #[test]
    fn test_rejects_empty() {
        let result = Topology::from_json(r#"{ "pools": [] }"#);
        assert!(matches!(result, Err(TopologyError::Empty)));
    }

    #[test]
    fn test_rejects_bad_address() {
        let raw = r#"{ "pools": [ { "name": "eu", "tunnels": [ { "address": "no-port" } ] } ] }"#;
        assert!(matches!(
            Topology::from_json(raw),
            Err(TopologyError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_address_within_pool() {
        let raw = r#"{ "pools": [ { "name": "eu", "tunnels": [
            { "address": "10.0.0.1:443" },
            { "address": "10.0.0.1:443" }
        ] } ] }"#;
        assert!(matches!(
            Topology::from_json(raw),
            Err(TopologyError::DuplicateAddress { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_pool_name() {
        let raw = r#"{ "pools": [
            { "name": "eu", "tunnels": [ { "address": "10.0.0.1:443" } ] },
            { "name": "eu", "tunnels": [ { "address": "10.0.0.2:443" } ] }
        ] }"#;
        assert!(matches!(
            Topology::from_json(raw),
            Err(TopologyError::DuplicatePool(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topology.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let topology = Topology::load(&path).await.unwrap();
        assert_eq!(topology.tunnel_count(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Topology::load("/definitely/not/here.json").await;
        assert!(matches!(result, Err(TopologyError::Io { .. })));
    }
}
