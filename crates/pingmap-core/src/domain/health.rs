//! Pool health classification.
//!
//! A pool's health is derived from the arithmetic mean of its tunnels'
//! probe values, with non-numeric outcomes substituted by a fixed sentinel.

use serde::{Deserialize, Serialize};

/// Value substituted for `Timeout`/`Unreachable` outcomes when averaging.
///
/// The sentinel participates in the mean on purpose: a pool with any dead
/// tunnel is pulled toward the sentinel, which heavily skews the average.
/// This matches the deployed behavior and is the stated contract; do not
/// change the formula without revisiting the feed consumers.
pub const UNREACHABLE_SENTINEL_MS: f64 = 9999.0;

/// Discrete health classification of a pool, keyed off its average latency.
///
/// Used by the map boundary to pick marker colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    /// Average below 50 ms.
    Good,

    /// Average below 150 ms.
    Degraded,

    /// Everything else, including the all-sentinel case.
    Bad,
}

impl HealthTier {
    /// Upper bound (exclusive) of the `Good` tier.
    pub const GOOD_BELOW_MS: f64 = 50.0;

    /// Upper bound (exclusive) of the `Degraded` tier.
    pub const DEGRADED_BELOW_MS: f64 = 150.0;

    /// Classify an average latency into a tier.
    #[must_use]
    pub fn classify(average_ms: f64) -> Self {
        if average_ms < Self::GOOD_BELOW_MS {
            Self::Good
        } else if average_ms < Self::DEGRADED_BELOW_MS {
            Self::Degraded
        } else {
            Self::Bad
        }
    }
}

/// Derived per-pool aggregate, recomputed on every probing cycle.
///
/// Never persisted independently of the snapshot that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolAggregate {
    /// Pool name, the map-marker key.
    pub name: String,

    /// Mean over all tunnels, sentinel values included.
    pub average_ms: f64,

    /// Tier classified from `average_ms`.
    pub tier: HealthTier,
}

impl PoolAggregate {
    /// Display text for the average: `"Unreachable"` at or above the
    /// sentinel, otherwise the rounded integer followed by `" ms"`.
    #[must_use]
    pub fn display_average(&self) -> String {
        if self.average_ms >= UNREACHABLE_SENTINEL_MS {
            "Unreachable".to_string()
        } else {
            format!("{} ms", self.average_ms.round() as u64)
        }
    }
}
