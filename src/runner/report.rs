//! TAP-style report output.
//!
//! ```text
//! 1..<N>
//! ok <i> - <name>
//! not ok <i> - <name>
//! <diff text>
//! Took <D> ms
//! ```
//!
//! or, when nothing was discovered, the single line `make test`.

use std::io::{self, Write};
use std::time::Duration;

/// Trait for reporting run progress.
///
/// Lines are append-only: nothing written is ever revisited.
pub trait Reporter {
    /// Called instead of everything else when discovery found nothing
    fn no_tests(&mut self) -> io::Result<()>;

    /// Called once, before the first test, with the number of candidates
    fn plan(&mut self, count: usize) -> io::Result<()>;

    fn passed(&mut self, index: usize, name: &str) -> io::Result<()>;

    /// Called for the test that stops the run, with the comparison text
    fn failed(&mut self, index: usize, name: &str, diff: &str) -> io::Result<()>;

    /// Called after the loop when the run status is success
    fn took(&mut self, elapsed: Duration) -> io::Result<()>;
}

/// Writes the protocol to any `Write` sink.
pub struct TapReporter<W: Write> {
    out: W,
}

impl<W: Write> TapReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TapReporter<W> {
    fn no_tests(&mut self) -> io::Result<()> {
        self.out.write_all(b"make test\n")
    }

    fn plan(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "1..{}", count)
    }

    fn passed(&mut self, index: usize, name: &str) -> io::Result<()> {
        writeln!(self.out, "ok {} - {}", index, name)
    }

    fn failed(&mut self, index: usize, name: &str, diff: &str) -> io::Result<()> {
        writeln!(self.out, "not ok {} - {}", index, name)?;
        self.out.write_all(diff.as_bytes())
    }

    fn took(&mut self, elapsed: Duration) -> io::Result<()> {
        writeln!(self.out, "Took {}", format_millis(elapsed))
    }
}

/// `12.34 ms`
pub fn format_millis(elapsed: Duration) -> String {
    format!("{:.2} ms", elapsed.as_secs_f64() * 1000.0)
}
