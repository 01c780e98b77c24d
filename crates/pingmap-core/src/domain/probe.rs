//! Probe outcome type shared between the probe adapter and aggregation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::health::UNREACHABLE_SENTINEL_MS;

/// Result of one TCP connect attempt against a tunnel.
///
/// Probing never surfaces errors; every failure mode collapses into one of
/// these values so a single dead endpoint cannot abort a probing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// The connection completed within the probe deadline.
    Latency {
        /// Elapsed connect time, rounded to the nearest millisecond.
        ms: u32,
    },

    /// The deadline elapsed before the remote side accepted.
    Timeout,

    /// The connection was actively refused or errored before completing.
    Unreachable,
}

impl ProbeOutcome {
    /// Check if the probed endpoint accepted the connection.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        matches!(self, Self::Latency { .. })
    }

    /// Numeric value used for pool averaging.
    ///
    /// `Timeout` and `Unreachable` map to [`UNREACHABLE_SENTINEL_MS`].
    #[must_use]
    pub fn millis_or_sentinel(&self) -> f64 {
        match self {
            Self::Latency { ms } => f64::from(*ms),
            Self::Timeout | Self::Unreachable => UNREACHABLE_SENTINEL_MS,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    /// Renders the wire `ping` strings: `"<N> ms"`, `"Timeout"`, `"Unreachable"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latency { ms } => write!(f, "{ms} ms"),
            Self::Timeout => f.write_str("Timeout"),
            Self::Unreachable => f.write_str("Unreachable"),
        }
    }
}
