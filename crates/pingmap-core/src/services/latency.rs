//! Latency service - probing passes and the cached snapshot.
//!
//! [`LatencyService`] owns the single current [`Snapshot`] and its freshness
//! state. It is the only entry point into the probing core: adapters call
//! [`LatencyService::snapshot`] and get either the stored snapshot (fresh) or
//! the result of one new complete pass (stale).

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::domain::{PoolReport, ProbeOutcome, Snapshot, Topology, TunnelReport};
use crate::ports::Prober;
use crate::services::aggregation::aggregate_pool;
use crate::settings::{DEFAULT_CACHE_TTL_MS, DEFAULT_PROBE_CONCURRENCY};

/// Scheduling parameters for probing passes.
#[derive(Debug, Clone)]
pub struct ProbeScheduling {
    /// How long a published snapshot is served without re-probing.
    pub ttl: Duration,

    /// Bound on concurrent probes within a pass.
    pub concurrency: usize,
}

impl Default for ProbeScheduling {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            concurrency: DEFAULT_PROBE_CONCURRENCY,
        }
    }
}

/// A published snapshot together with its monotonic publish instant.
///
/// Freshness is judged against `Instant`, not wall-clock, so host clock
/// adjustments cannot extend or shorten the TTL window.
struct CachedSnapshot {
    snapshot: Arc<Snapshot>,
    published: Instant,
}

impl CachedSnapshot {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.published.elapsed() < ttl
    }
}

/// Probing service with a time-bounded snapshot cache.
///
/// All state lives behind one async mutex: a stale-triggered pass runs while
/// holding the lock, so concurrent stale callers wait for the in-flight pass
/// instead of starting their own, and every caller observes either the
/// previous complete snapshot or the next complete one.
pub struct LatencyService {
    topology: Topology,
    prober: Arc<dyn Prober>,
    scheduling: ProbeScheduling,
    cache: Mutex<Option<CachedSnapshot>>,
}

impl LatencyService {
    /// Create a new service with an empty (stale) cache.
    ///
    /// The topology is expected to be validated already; construction does
    /// not probe.
    pub fn new(topology: Topology, prober: Arc<dyn Prober>, scheduling: ProbeScheduling) -> Self {
        Self {
            topology,
            prober,
            scheduling,
            cache: Mutex::new(None),
        }
    }

    /// Return the current snapshot, probing first if the cache is stale.
    ///
    /// Within the TTL window this returns the stored snapshot unchanged;
    /// repeated calls yield the identical value (same `captured_at`).
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh(self.scheduling.ttl) {
                return Arc::clone(&cached.snapshot);
            }
        }

        let snapshot = Arc::new(self.run_pass().await);
        *cache = Some(CachedSnapshot {
            snapshot: Arc::clone(&snapshot),
            published: Instant::now(),
        });
        snapshot
    }

    /// Run one unconditional probing pass and publish its snapshot.
    ///
    /// Used for the startup warm-up pass and one-shot CLI probing.
    pub async fn refresh(&self) -> Arc<Snapshot> {
        let mut cache = self.cache.lock().await;
        let snapshot = Arc::new(self.run_pass().await);
        *cache = Some(CachedSnapshot {
            snapshot: Arc::clone(&snapshot),
            published: Instant::now(),
        });
        snapshot
    }

    /// Current snapshot without triggering a pass, if one was ever published.
    pub async fn peek(&self) -> Option<Arc<Snapshot>> {
        let cache = self.cache.lock().await;
        cache.as_ref().map(|cached| Arc::clone(&cached.snapshot))
    }

    /// Probe every tunnel and assemble a new snapshot.
    ///
    /// Probes run concurrently under the semaphore; outcomes are reassembled
    /// in topology order so the snapshot layout matches the document.
    async fn run_pass(&self) -> Snapshot {
        let started = Instant::now();
        let captured_at = Utc::now();

        let addresses: Vec<String> = self
            .topology
            .pools
            .iter()
            .flat_map(|pool| pool.tunnels.iter().map(|tunnel| tunnel.address.clone()))
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.scheduling.concurrency.max(1)));
        let mut tasks: JoinSet<(usize, ProbeOutcome)> = JoinSet::new();
        for (index, address) in addresses.iter().cloned().enumerate() {
            let prober = Arc::clone(&self.prober);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (index, ProbeOutcome::Unreachable);
                };
                (index, prober.probe(&address).await)
            });
        }

        let mut outcomes = vec![ProbeOutcome::Unreachable; addresses.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = outcome,
                Err(err) => warn!(error = %err, "probe task aborted"),
            }
        }

        let mut pools = Vec::with_capacity(self.topology.pools.len());
        let mut cursor = 0;
        for pool in &self.topology.pools {
            let pool_outcomes = &outcomes[cursor..cursor + pool.tunnels.len()];
            cursor += pool.tunnels.len();

            let tunnels = pool
                .tunnels
                .iter()
                .zip(pool_outcomes)
                .map(|(tunnel, outcome)| TunnelReport {
                    address: tunnel.address.clone(),
                    outcome: *outcome,
                })
                .collect();

            pools.push(PoolReport {
                name: pool.name.clone(),
                tunnels,
                aggregate: aggregate_pool(&pool.name, pool_outcomes),
            });
        }

        debug!(
            tunnels = addresses.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "probing pass complete"
        );

        Snapshot { captured_at, pools }
    }
}
