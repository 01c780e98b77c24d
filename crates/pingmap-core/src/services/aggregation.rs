//! Aggregation engine - per-pool averages and health tiers.

use crate::domain::{HealthTier, PoolAggregate, ProbeOutcome, UNREACHABLE_SENTINEL_MS};

/// Aggregate one pool's probe outcomes.
///
/// The average is the arithmetic mean over all tunnels with `Timeout` and
/// `Unreachable` substituted by the sentinel. A pool with zero tunnels
/// aggregates to the sentinel.
#[must_use]
pub fn aggregate_pool(name: &str, outcomes: &[ProbeOutcome]) -> PoolAggregate {
    let average_ms = if outcomes.is_empty() {
        UNREACHABLE_SENTINEL_MS
    } else {
        let total: f64 = outcomes.iter().map(ProbeOutcome::millis_or_sentinel).sum();
        total / outcomes.len() as f64
    };

    PoolAggregate {
        name: name.to_string(),
        average_ms,
        tier: HealthTier::classify(average_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_reachable_pool_averages() {
        let outcomes = [
            ProbeOutcome::Latency { ms: 10 },
            ProbeOutcome::Latency { ms: 20 },
            ProbeOutcome::Latency { ms: 30 },
        ];
        let aggregate = aggregate_pool("eu-1", &outcomes);
        assert_eq!(aggregate.average_ms, 20.0);
        assert_eq!(aggregate.tier, HealthTier::Good);
        assert_eq!(aggregate.display_average(), "20 ms");
    }

    #[test]
    fn test_sentinel_pulls_average_up() {
        let outcomes = [ProbeOutcome::Latency { ms: 10 }, ProbeOutcome::Unreachable];
        let aggregate = aggregate_pool("eu-1", &outcomes);
        assert_eq!(aggregate.average_ms, (10.0 + UNREACHABLE_SENTINEL_MS) / 2.0);
        assert_eq!(aggregate.average_ms, 5004.5);
        assert_eq!(aggregate.tier, HealthTier::Bad);
    }

    #[test]
    fn test_timeout_counts_as_sentinel() {
        let outcomes = [ProbeOutcome::Timeout];
        let aggregate = aggregate_pool("eu-1", &outcomes);
        assert_eq!(aggregate.average_ms, UNREACHABLE_SENTINEL_MS);
        assert_eq!(aggregate.tier, HealthTier::Bad);
        assert_eq!(aggregate.display_average(), "Unreachable");
    }

    #[test]
    fn test_empty_pool_is_sentinel() {
        let aggregate = aggregate_pool("ghost", &[]);
        assert_eq!(aggregate.average_ms, UNREACHABLE_SENTINEL_MS);
        assert_eq!(aggregate.tier, HealthTier::Bad);
    }

    #[test]
    fn test_degraded_band() {
        let outcomes = [
            ProbeOutcome::Latency { ms: 90 },
            ProbeOutcome::Latency { ms: 110 },
        ];
        let aggregate = aggregate_pool("sa-1", &outcomes);
        assert_eq!(aggregate.average_ms, 100.0);
        assert_eq!(aggregate.tier, HealthTier::Degraded);
    }
}
