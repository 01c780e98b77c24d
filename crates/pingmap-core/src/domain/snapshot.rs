//! Snapshot value types - one complete probing pass over the topology.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::health::PoolAggregate;
use crate::domain::probe::ProbeOutcome;

/// One tunnel's probe result within a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelReport {
    /// Tunnel address, `host:port`.
    pub address: String,

    /// Outcome of this cycle's probe.
    pub outcome: ProbeOutcome,
}

/// One pool's tunnels and derived aggregate for a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolReport {
    /// Pool name, unique across the topology.
    pub name: String,

    /// Per-tunnel results, in topology order.
    pub tunnels: Vec<TunnelReport>,

    /// Aggregate computed from exactly the outcomes above.
    pub aggregate: PoolAggregate,
}

/// A complete, internally consistent set of probe results for all pools.
///
/// Every aggregate was computed from the outcomes stored alongside it in the
/// same cycle; results from different passes are never mixed. Exactly one
/// snapshot is current at a time and older ones are discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Wall-clock capture time of the pass that produced this snapshot.
    pub captured_at: DateTime<Utc>,

    /// Per-pool reports, in topology order.
    pub pools: Vec<PoolReport>,
}

impl Snapshot {
    /// Look up a pool report by name.
    #[must_use]
    pub fn pool(&self, name: &str) -> Option<&PoolReport> {
        self.pools.iter().find(|pool| pool.name == name)
    }

    /// Total number of tunnels across all pools.
    #[must_use]
    pub fn tunnel_count(&self) -> usize {
        self.pools.iter().map(|pool| pool.tunnels.len()).sum()
    }
}
