//! A discovered test program and the fixture files paired with it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix of the golden output file paired with a candidate.
pub const EXPECTED_SUFFIX: &str = ".expected";
/// Suffix of the file capturing a candidate's most recent output.
pub const GOT_SUFFIX: &str = ".got";

/// A test executable identified by a dot-free file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    path: PathBuf,
    name: String,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    /// Path of the executable itself.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name, as shown in protocol lines.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<path>.expected`
    pub fn expected_path(&self) -> PathBuf {
        self.with_suffix(EXPECTED_SUFFIX)
    }

    /// `<path>.got`
    pub fn got_path(&self) -> PathBuf {
        self.with_suffix(GOT_SUFFIX)
    }

    // Appends rather than replacing an extension; candidates never have one.
    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut raw: OsString = self.path.clone().into_os_string();
        raw.push(suffix);
        PathBuf::from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_base_name() {
        let c = Candidate::new("/tmp/t/hello");
        assert_eq!(c.name(), "hello");
        assert_eq!(c.path(), Path::new("/tmp/t/hello"));
    }

    #[test]
    fn test_fixture_paths_append_suffix() {
        let c = Candidate::new("/tmp/t/hello");
        assert_eq!(c.expected_path(), PathBuf::from("/tmp/t/hello.expected"));
        assert_eq!(c.got_path(), PathBuf::from("/tmp/t/hello.got"));
    }
}
