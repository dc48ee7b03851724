//! Runner version information.
//!
//! Taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time so the CLI and any
//! diagnostics agree on the same value.

/// The runner version string (for example, `0.1.0`).
pub const RUNNER_VERSION: &str = env!("CARGO_PKG_VERSION");
