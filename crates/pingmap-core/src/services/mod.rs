//! Core services orchestrating the domain.

pub mod aggregation;
pub mod latency;

pub use aggregation::aggregate_pool;
pub use latency::{LatencyService, ProbeScheduling};
