#![forbid(unsafe_code)]
//! Golden-output test runner
//!
//! Runs each executable in a test directory, compares its stdout with a stored
//! `<name>.expected` file and writes a TAP-style report. The run stops at the first
//! mismatch.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod runner;
pub mod version;

pub use runner::{RunStatus, RunSummary, Runner};
pub use version::RUNNER_VERSION;
