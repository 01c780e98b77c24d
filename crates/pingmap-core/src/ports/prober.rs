//! Probe port - the single seam between the core and the network.

use async_trait::async_trait;

use crate::domain::ProbeOutcome;

/// Reachability/latency probe against one tunnel address.
///
/// Implementations must be infallible at the type level: refused
/// connections, resolution failures, and elapsed deadlines all collapse
/// into the corresponding [`ProbeOutcome`] value. Any opened socket is
/// closed before the outcome is returned, on every exit path.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe a single `host:port` address.
    async fn probe(&self, address: &str) -> ProbeOutcome;
}
