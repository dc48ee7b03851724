//! Runner I/O boundary interfaces
//!
//! This module defines trait-based abstractions for the two external steps of a test:
//! - Execution (spawn the candidate with stdout captured to its `.got` file)
//! - Comparison (unified diff of the `.expected` file against the `.got` file)
//!
//! The driver only talks to these traits, so tests can swap in scripted fakes
//! without spawning anything.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

/// Errors from running a candidate. The driver logs and ignores all of them.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("cannot redirect output to '{}': {source}", path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch '{}': {source}", path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' exited with {status}", path.display())]
    Status { path: PathBuf, status: ExitStatus },
}

/// Outcome of comparing expected against got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Identical,
    /// Files differ or could not be compared; carries the text to embed in the log.
    Differs(String),
}

// ============================================================================
// Executor Interface
// ============================================================================

/// Run a candidate program with its standard output sent to `output`.
pub trait TestExecutor {
    fn execute(&self, program: &Path, output: &Path) -> Result<(), ExecError>;
}

// ============================================================================
// Comparator Interface
// ============================================================================

/// Compare a golden file against captured output.
pub trait OutputComparator {
    fn compare(&self, expected: &Path, got: &Path) -> Comparison;
}

// ============================================================================
// Default Implementations
// ============================================================================

/// Spawns the candidate directly, without a shell.
///
/// stdin and stderr are inherited; stdout goes to the capture file. An executable
/// without a `#!` line fails to exec (ENOEXEC) and is rerun through `/bin/sh`, the
/// way a shell would treat it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

/// ENOEXEC on Linux, macOS and the BSDs.
#[cfg(unix)]
const ENOEXEC: i32 = 8;

#[cfg(unix)]
const FALLBACK_SHELL: &str = "/bin/sh";

impl ProcessExecutor {
    fn spawn(&self, command: &mut Command, output: &Path) -> Result<io::Result<ExitStatus>, ExecError> {
        let capture = File::create(output).map_err(|source| ExecError::Redirect {
            path: output.to_path_buf(),
            source,
        })?;
        Ok(command.stdout(Stdio::from(capture)).status())
    }
}

impl TestExecutor for ProcessExecutor {
    fn execute(&self, program: &Path, output: &Path) -> Result<(), ExecError> {
        let mut status = self.spawn(&mut Command::new(program), output)?;

        #[cfg(unix)]
        if matches!(&status, Err(e) if e.raw_os_error() == Some(ENOEXEC)) {
            debug!(program = %program.display(), "no interpreter line, retrying through {}", FALLBACK_SHELL);
            status = self.spawn(Command::new(FALLBACK_SHELL).arg(program), output)?;
        }

        let status = status.map_err(|source| ExecError::Launch {
            path: program.to_path_buf(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Status {
                path: program.to_path_buf(),
                status,
            })
        }
    }
}

/// Compares with the system `diff -up`.
#[derive(Debug, Clone)]
pub struct DiffComparator {
    program: PathBuf,
}

impl DiffComparator {
    pub fn new() -> Self {
        Self::with_program("diff")
    }

    /// Use a different diff binary (must accept `-up <a> <b>`).
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DiffComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputComparator for DiffComparator {
    fn compare(&self, expected: &Path, got: &Path) -> Comparison {
        let output = Command::new(&self.program)
            .arg("-up")
            .arg(expected)
            .arg(got)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => Comparison::Identical,
            Ok(output) => {
                // Exit 1 is a real diff (stdout); 2 is trouble such as a missing file (stderr).
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                Comparison::Differs(text)
            }
            Err(e) => Comparison::Differs(format!("{}: {}\n", self.program.display(), e)),
        }
    }
}
