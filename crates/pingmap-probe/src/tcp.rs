//! TCP connect probing with a fixed deadline.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use pingmap_core::domain::ProbeOutcome;
use pingmap_core::ports::Prober;

/// Connect deadline for a single probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2_000);

/// [`Prober`] implementation using plain TCP connects.
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    /// Create a prober with the given connect deadline.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, address: &str) -> ProbeOutcome {
        let started = Instant::now();
        match timeout(self.timeout, TcpStream::connect(address)).await {
            Ok(Ok(stream)) => {
                let elapsed = started.elapsed();
                // Dropping the stream closes the socket.
                drop(stream);
                let ms = (elapsed.as_secs_f64() * 1000.0).round() as u32;
                ProbeOutcome::Latency { ms }
            }
            Ok(Err(err)) => {
                debug!(address, error = %err, "probe connect failed");
                ProbeOutcome::Unreachable
            }
            Err(_) => {
                debug!(
                    address,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "probe deadline elapsed"
                );
                ProbeOutcome::Timeout
            }
        }
    }
}
