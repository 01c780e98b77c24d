#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    HealthTier, PoolAggregate, PoolReport, PoolSpec, ProbeOutcome, Snapshot, Topology,
    TopologyError, TunnelReport, TunnelSpec, UNREACHABLE_SENTINEL_MS,
};
pub use ports::{CoreError, Prober};
pub use services::{LatencyService, ProbeScheduling, aggregate_pool};
pub use settings::{
    DEFAULT_CACHE_TTL_MS, DEFAULT_LISTEN_PORT, DEFAULT_PROBE_CONCURRENCY,
    DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_TOPOLOGY_PATH, ServerListConfig, Settings, SettingsError,
    validate_settings,
};

// Silence unused dev-dependency warnings until we add runtime-pause tests
#[cfg(test)]
use tokio_test as _;
