//! Golden-output test runner
//!
//! Runs every candidate in a directory, compares its stdout against the paired
//! `.expected` file and writes a TAP-style report.
//!
//! ## Flow
//!
//! discovery → plan line → for each candidate: clear stale `.got`, execute, compare →
//! `ok` line, or `not ok` + diff and stop → timing line.
//!
//! ## Modules
//!
//! - `candidate` - a test program and its fixture paths
//! - `discovery` - directory listing and the dot-free name rule
//! - `interfaces` - execution and comparison traits with process-backed defaults
//! - `report` - the TAP writer
//!
//! ## Exit status
//!
//! A run that found tests reports [`RunStatus::Completed`] whether or not every test
//! passed; only an empty discovery yields [`RunStatus::NoTests`]. Callers that need
//! pass/fail should inspect [`RunSummary::failed_at`].

pub mod candidate;
pub mod discovery;
pub mod interfaces;
pub mod report;

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

pub use candidate::Candidate;
pub use interfaces::{Comparison, DiffComparator, ExecError, OutputComparator, ProcessExecutor, TestExecutor};
pub use report::{Reporter, TapReporter};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to write log: {0}")]
    Log(#[from] io::Error),
}

/// Outcome class of a run, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Tests were found and the loop finished, by exhaustion or by the first failure
    Completed,
    /// Discovery found nothing
    NoTests,
}

/// Summary of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub status: RunStatus,
    pub planned: usize,
    pub passed: usize,
    /// 1-based index of the test that halted the run
    pub failed_at: Option<usize>,
    /// Only set when a timing line was written
    pub elapsed: Option<Duration>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.status == RunStatus::Completed && self.failed_at.is_none()
    }
}

/// Sequential driver over a pair of execution/comparison backends.
pub struct Runner<E = ProcessExecutor, C = DiffComparator> {
    executor: E,
    comparator: C,
}

impl Runner {
    /// Runner backed by real processes and the system `diff`.
    pub fn new() -> Self {
        Self::with_parts(ProcessExecutor, DiffComparator::new())
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TestExecutor, C: OutputComparator> Runner<E, C> {
    pub fn with_parts(executor: E, comparator: C) -> Self {
        Self { executor, comparator }
    }

    /// Run every candidate in `test_dir`, writing the report through `reporter`.
    ///
    /// `started` marks the beginning of the timed span; the timing line covers
    /// everything from there to the end of the loop.
    pub fn run(
        &self,
        test_dir: &Path,
        reporter: &mut dyn Reporter,
        started: Instant,
    ) -> Result<RunSummary, RunnerError> {
        let candidates = discovery::discover(test_dir);
        let mut summary = self.run_candidates(&candidates, reporter)?;

        if summary.status == RunStatus::Completed {
            let elapsed = started.elapsed();
            reporter.took(elapsed)?;
            summary.elapsed = Some(elapsed);
        }

        Ok(summary)
    }

    /// The loop proper: plan line, then one status line per candidate until the
    /// first failure.
    pub fn run_candidates(
        &self,
        candidates: &[Candidate],
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, RunnerError> {
        if candidates.is_empty() {
            info!("no tests discovered");
            reporter.no_tests()?;
            return Ok(RunSummary {
                status: RunStatus::NoTests,
                planned: 0,
                passed: 0,
                failed_at: None,
                elapsed: None,
            });
        }

        reporter.plan(candidates.len())?;

        let mut passed = 0;
        let mut failed_at = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let index = i + 1;
            match self.run_one(candidate) {
                Comparison::Identical => {
                    reporter.passed(index, candidate.name())?;
                    passed += 1;
                }
                Comparison::Differs(diff) => {
                    reporter.failed(index, candidate.name(), &diff)?;
                    info!(test = candidate.name(), index, "output differs, stopping");
                    failed_at = Some(index);
                    break;
                }
            }
        }

        Ok(RunSummary {
            status: RunStatus::Completed,
            planned: candidates.len(),
            passed,
            failed_at,
            elapsed: None,
        })
    }

    fn run_one(&self, candidate: &Candidate) -> Comparison {
        let got = candidate.got_path();
        clear_stale(&got);

        debug!(test = candidate.name(), "executing");
        if let Err(e) = self.executor.execute(candidate.path(), &got) {
            // The capture may be partial or empty; the comparison decides.
            debug!(test = candidate.name(), error = %e, "execution failed");
        }

        self.comparator.compare(&candidate.expected_path(), &got)
    }
}

/// Best-effort removal of a previous capture.
fn clear_stale(got: &Path) {
    match fs::remove_file(got) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => debug!(path = %got.display(), error = %e, "could not remove stale output"),
    }
}
