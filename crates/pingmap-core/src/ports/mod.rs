//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod prober;

use thiserror::Error;

pub use prober::Prober;

/// Unified error type for core operations.
///
/// Individual probe failures never appear here - they are absorbed at the
/// [`Prober`] boundary and become [`crate::domain::ProbeOutcome`] values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Topology load or validation failed.
    #[error(transparent)]
    Topology(#[from] crate::domain::TopologyError),

    /// Settings load or validation failed.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
