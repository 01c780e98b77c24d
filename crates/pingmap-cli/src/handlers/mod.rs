//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(settings: &Settings, ...) -> Result<()>`
//! - Thin wrappers that parse CLI-specific input, call into the core or the
//!   web adapter, and format output for the terminal.

pub mod check;
pub mod probe;
pub mod serve;
