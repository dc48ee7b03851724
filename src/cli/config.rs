//! Run configuration and the log destination.

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Directory scanned when `--test_dir` is not given.
pub const DEFAULT_TEST_DIR: &str = "t";

/// `--log` value that selects standard output explicitly.
pub const STDOUT_KEYWORD: &str = "-";

/// Run configuration, fixed once the command line is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory containing the test programs
    pub test_dir: PathBuf,
    /// Where the report is written
    pub log: LogDestination,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            test_dir: PathBuf::from(DEFAULT_TEST_DIR),
            log: LogDestination::Stdout,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to scan
    pub fn with_test_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.test_dir = dir.into();
        self
    }

    /// Set the report destination
    pub fn with_log(mut self, log: LogDestination) -> Self {
        self.log = log;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Error)]
#[error("cannot open log '{}': {source}", path.display())]
pub struct LogOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl LogDestination {
    /// Interpret a `--log` argument; absent or `-` means standard output.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => LogDestination::Stdout,
            Some(p) if p.as_os_str() == STDOUT_KEYWORD => LogDestination::Stdout,
            Some(p) => LogDestination::File(p.to_path_buf()),
        }
    }

    /// Open for writing, truncating an existing file.
    pub fn open(&self) -> Result<LogSink, LogOpenError> {
        match self {
            LogDestination::Stdout => Ok(LogSink::Stdout(io::stdout())),
            LogDestination::File(path) => File::create(path)
                .map(|f| LogSink::File(BufWriter::new(f)))
                .map_err(|source| LogOpenError {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

/// An open report destination.
///
/// Buffered output is flushed by [`LogSink::close`], or on drop if that is skipped.
pub enum LogSink {
    Stdout(Stdout),
    File(BufWriter<File>),
}

impl LogSink {
    /// Flush and release the destination, surfacing any pending write error.
    pub fn close(mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::Stdout(out) => out.write(buf),
            LogSink::File(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::Stdout(out) => out.flush(),
            LogSink::File(out) => out.flush(),
        }
    }
}
