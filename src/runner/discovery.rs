//! Candidate discovery.
//!
//! A candidate is any entry directly inside the test directory whose file name has
//! no `.` in it. That single rule keeps `.expected` fixtures, `.got` captures, and
//! things like `README.md` or `helper.sh` out of the run.
//!
//! Listing failures never surface: a missing or unreadable directory simply yields
//! no candidates, which the driver reports as "no tests".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::candidate::Candidate;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot list '{}': {source}", dir.display())]
    List {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot resolve '{}': {source}", path.display())]
    Absolute {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whether a file name qualifies as a candidate.
pub fn is_candidate_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('.')
}

/// Discover candidates in `dir`, sorted by file name.
///
/// Errors are logged and degrade to an empty (or shorter) list.
pub fn discover(dir: &Path) -> Vec<Candidate> {
    match try_discover(dir) {
        Ok(found) => found,
        Err(e) => {
            debug!(error = %e, "discovery failed, treating as no tests");
            Vec::new()
        }
    }
}

/// Strict form of [`discover`]: listing errors are returned instead of swallowed.
/// Unreadable individual entries are still skipped.
pub fn try_discover(dir: &Path) -> Result<Vec<Candidate>, DiscoveryError> {
    let entries = fs::read_dir(dir).map_err(|source| DiscoveryError::List {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let name = entry.file_name();
        if !is_candidate_name(&name.to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        let absolute = std::path::absolute(&path).map_err(|source| DiscoveryError::Absolute {
            path: path.clone(),
            source,
        })?;
        paths.push(absolute);
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), count = paths.len(), "discovered candidates");
    Ok(paths.into_iter().map(Candidate::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(found: &[Candidate]) -> Vec<&str> {
        found.iter().map(Candidate::name).collect()
    }

    #[test]
    fn test_dotted_names_are_excluded() {
        let tmp = TempDir::new().unwrap();
        for name in ["alpha", "alpha.expected", "alpha.got", "README.md", "helper.sh", "beta"] {
            touch(tmp.path(), name);
        }

        let found = discover(tmp.path());
        assert_eq!(names(&found), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_results_are_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta", "mid", "alpha"] {
            touch(tmp.path(), name);
        }

        assert_eq!(names(&discover(tmp.path())), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_paths_are_absolute() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "one");

        let found = discover(tmp.path());
        assert_eq!(found.len(), 1);
        assert!(found[0].path().is_absolute());
        assert!(found[0].path().ends_with("one"));
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");

        assert!(discover(&missing).is_empty());
        assert!(matches!(
            try_discover(&missing),
            Err(DiscoveryError::List { .. })
        ));
    }

    #[test]
    fn test_file_instead_of_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "plain");

        assert!(discover(&tmp.path().join("plain")).is_empty());
    }

    #[test]
    fn test_dot_free_subdirectories_are_candidates() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::create_dir(tmp.path().join("nested.d")).unwrap();

        assert_eq!(names(&discover(tmp.path())), vec!["nested"]);
    }

    proptest! {
        #[test]
        fn prop_only_dot_free_names_selected(
            names in proptest::collection::btree_set("[a-z]{1,8}(\\.[a-z]{1,5})?", 0..12)
        ) {
            let tmp = TempDir::new().unwrap();
            for name in &names {
                touch(tmp.path(), name);
            }

            let found: BTreeSet<String> = discover(tmp.path())
                .iter()
                .map(|c| c.name().to_string())
                .collect();
            let expected: BTreeSet<String> =
                names.iter().filter(|n| !n.contains('.')).cloned().collect();
            prop_assert_eq!(found, expected);
        }
    }
}
