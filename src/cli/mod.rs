//! CLI module for the test runner
//!
//! ## Flags
//!
//! - `-t, --test_dir <DIR>` - directory containing tests (default `t`)
//! - `-l, --log <FILE>` - where the report is written (default stdout, `-` also means stdout)
//!
//! ## Design
//!
//! Argument parsing uses clap derive macros. The log destination is opened right
//! after parsing, so an unwritable log fails before any test runs. Command functions
//! return `CliResult<T>` instead of calling `process::exit`; only the top-level
//! `run()` exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;

use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::debug;

use crate::runner::{RunStatus, Runner, TapReporter};
use crate::version::RUNNER_VERSION;
use config::{DEFAULT_TEST_DIR, LogDestination, LogSink, RunConfig};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// Tests were found and run, whatever their outcome
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// No tests discovered, or the log could not be written
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Bad command line, including an unopenable `--log`
    pub const USAGE: ExitCode = ExitCode(2);
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => ExitCode::SUCCESS,
            RunStatus::NoTests => ExitCode::FAILURE,
        }
    }
}

/// A message for stderr plus the exit status to leave with.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Reported through clap, with the usage line.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::USAGE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run golden-output tests and report in TAP format
#[derive(Parser, Debug)]
#[command(name = "testrunner")]
#[command(version = RUNNER_VERSION)]
#[command(about = "Run golden-output tests and report in TAP format", long_about = None)]
pub struct Cli {
    /// The directory containing tests
    #[arg(short = 't', long = "test_dir", value_name = "DIR", default_value = DEFAULT_TEST_DIR)]
    pub test_dir: PathBuf,

    /// The file where the output should be written (`-` for stdout)
    #[arg(short = 'l', long = "log", value_name = "FILE")]
    pub log: Option<PathBuf>,
}

impl Cli {
    pub fn config(&self) -> RunConfig {
        RunConfig::new()
            .with_test_dir(&self.test_dir)
            .with_log(LogDestination::from_arg(self.log.as_deref()))
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where the process exits.
pub fn run() {
    let cli = Cli::parse();

    match open_and_execute(&cli.config()) {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
                process::exit(exit_code.0);
            }
        }
        Err(e) if e.exit_code == ExitCode::USAGE => {
            Cli::command()
                .error(ErrorKind::ValueValidation, format!("argument -l/--log: {}", e.message))
                .exit();
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Open the log, then run. The timed span starts once the log is open.
///
/// An unopenable log is a usage error, raised before any test runs.
pub fn open_and_execute(config: &RunConfig) -> CliResult<ExitCode> {
    let sink = config
        .log
        .open()
        .map_err(|e| CliError::usage(e.to_string()))?;
    execute(config, sink, Instant::now())
}

/// Run the tests described by `config`, writing to `sink`.
///
/// The sink is closed on every path before this returns.
pub fn execute(config: &RunConfig, sink: LogSink, started: Instant) -> CliResult<ExitCode> {
    debug!(test_dir = %config.test_dir.display(), log = ?config.log, "starting run");

    let mut reporter = TapReporter::new(sink);
    let outcome = Runner::new().run(&config.test_dir, &mut reporter, started);
    let closed = reporter.into_inner().close();

    let summary = outcome.map_err(|e| CliError::failure(e.to_string()))?;
    closed.map_err(|e| CliError::failure(format!("failed to close log: {}", e)))?;

    debug!(?summary, all_passed = summary.all_passed(), "run finished");
    Ok(summary.status.into())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["testrunner"]).unwrap();
        assert_eq!(cli.test_dir, PathBuf::from("t"));
        assert!(cli.log.is_none());
        assert_eq!(cli.config(), RunConfig::default());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::try_parse_from(["testrunner", "-t", "suite", "-l", "out.log"]).unwrap();
        let config = cli.config();
        assert_eq!(config.test_dir, PathBuf::from("suite"));
        assert_eq!(config.log, LogDestination::File("out.log".into()));
    }

    #[test]
    fn test_cli_long_flags() {
        let cli =
            Cli::try_parse_from(["testrunner", "--test_dir", "suite", "--log", "-"]).unwrap();
        let config = cli.config();
        assert_eq!(config.test_dir, PathBuf::from("suite"));
        assert_eq!(config.log, LogDestination::Stdout);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["testrunner", "--bogus"]).is_err());
    }

    #[test]
    fn test_cli_rejects_missing_value() {
        assert!(Cli::try_parse_from(["testrunner", "-t"]).is_err());
    }

    #[test]
    fn test_exit_code_from_status() {
        assert_eq!(ExitCode::from(RunStatus::Completed), ExitCode::SUCCESS);
        assert_eq!(ExitCode::from(RunStatus::NoTests), ExitCode::FAILURE);
    }

    #[test]
    fn test_execute_empty_dir_writes_make_test() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("report.log");
        let config = RunConfig::new()
            .with_test_dir(tmp.path().join("empty"))
            .with_log(LogDestination::File(log.clone()));

        let code = open_and_execute(&config).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(fs::read_to_string(&log).unwrap(), "make test\n");
    }

    #[test]
    fn test_unopenable_log_fails_before_running() {
        let tmp = TempDir::new().unwrap();
        let config = RunConfig::new()
            .with_test_dir(tmp.path())
            .with_log(LogDestination::File(tmp.path().join("missing/dir/log")));

        let err = open_and_execute(&config).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::USAGE);
        assert!(err.message.contains("cannot open log"));
    }
}
