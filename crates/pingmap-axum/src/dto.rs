//! Wire DTOs for the latency feed.
//!
//! The map front end consumes exactly these shapes; tunnel `ping` strings
//! are `"<N> ms"`, `"Timeout"`, or `"Unreachable"`, and each pool carries
//! the aggregate the map derives its marker color from.

use chrono::{DateTime, Utc};
use pingmap_core::domain::{HealthTier, Snapshot};
use serde::{Deserialize, Serialize};

/// The `/api/ping` response document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingFeed {
    /// Capture time of the underlying snapshot.
    pub captured_at: DateTime<Utc>,

    /// Per-pool feeds, in topology order.
    pub pools: Vec<PoolFeed>,
}

/// One pool in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolFeed {
    /// Pool name, the map-marker key.
    pub name: String,

    /// Display average: `"<N> ms"` or `"Unreachable"`.
    pub average: String,

    /// Health tier: `"good"`, `"degraded"`, or `"bad"`.
    pub status: HealthTier,

    /// Per-tunnel feeds, in topology order.
    pub tunnels: Vec<TunnelFeed>,
}

/// One tunnel in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelFeed {
    /// Tunnel address, `host:port`.
    pub address: String,

    /// Probe display string: `"<N> ms"`, `"Timeout"`, or `"Unreachable"`.
    pub ping: String,
}

impl From<&Snapshot> for PingFeed {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            captured_at: snapshot.captured_at,
            pools: snapshot
                .pools
                .iter()
                .map(|pool| PoolFeed {
                    name: pool.name.clone(),
                    average: pool.aggregate.display_average(),
                    status: pool.aggregate.tier,
                    tunnels: pool
                        .tunnels
                        .iter()
                        .map(|tunnel| TunnelFeed {
                            address: tunnel.address.clone(),
                            ping: tunnel.outcome.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingmap_core::domain::{PoolAggregate, PoolReport, ProbeOutcome, TunnelReport};

    fn snapshot() -> Snapshot {
        Snapshot {
            captured_at: Utc::now(),
            pools: vec![PoolReport {
                name: "eu-1".to_string(),
                tunnels: vec![
                    TunnelReport {
                        address: "10.0.0.1:443".to_string(),
                        outcome: ProbeOutcome::Latency { ms: 12 },
                    },
                    TunnelReport {
                        address: "10.0.0.2:443".to_string(),
                        outcome: ProbeOutcome::Timeout,
                    },
                ],
                aggregate: PoolAggregate {
                    name: "eu-1".to_string(),
                    average_ms: 5005.5,
                    tier: HealthTier::Bad,
                },
            }],
        }
    }

    #[test]
    fn test_feed_from_snapshot() {
        let feed = PingFeed::from(&snapshot());
        assert_eq!(feed.pools.len(), 1);
        assert_eq!(feed.pools[0].name, "eu-1");
        assert_eq!(feed.pools[0].average, "5006 ms");
        assert_eq!(feed.pools[0].status, HealthTier::Bad);
        assert_eq!(feed.pools[0].tunnels[0].ping, "12 ms");
        assert_eq!(feed.pools[0].tunnels[1].ping, "Timeout");
    }

    #[test]
    fn test_feed_field_names() {
        let json = serde_json::to_string(&PingFeed::from(&snapshot())).unwrap();
        assert!(json.contains("\"capturedAt\""));
        assert!(json.contains("\"pools\""));
        assert!(json.contains("\"tunnels\""));
        assert!(json.contains("\"address\""));
        assert!(json.contains("\"ping\""));
        assert!(json.contains("\"status\":\"bad\""));
    }
}
