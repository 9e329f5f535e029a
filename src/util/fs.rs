//! Filesystem utilities.
//!
//! The file probes here treat every I/O error as "does not exist": a
//! directory we cannot stat is a directory that does not contain the
//! library.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Check whether `dir/name` exists and is a regular file.
///
/// Symlinks are followed, so a symlink to a file counts and a symlink to a
/// directory does not.
pub fn file_exists(dir: &Path, name: &str) -> bool {
    fs::metadata(dir.join(name))
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Check whether every file in `names` exists inside `dir`.
///
/// Stops at the first missing file. An empty set is vacuously present.
pub fn all_files_exist<S: AsRef<str>>(dir: &Path, names: &[S]) -> bool {
    names.iter().all(|name| file_exists(dir, name.as_ref()))
}

/// Where a file set was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetMatch {
    /// Index into the searched directories
    pub dir_index: usize,
    /// Index into the candidate file sets
    pub set_index: usize,
}

/// Find the first directory holding any complete candidate set.
///
/// Directory order wins over candidate order: every candidate is tried in
/// a directory before moving on to the next one.
pub fn find_first_set<S: AsRef<str>>(
    dirs: &[PathBuf],
    candidates: &[Vec<S>],
) -> Option<SetMatch> {
    for (dir_index, dir) in dirs.iter().enumerate() {
        for (set_index, names) in candidates.iter().enumerate() {
            if all_files_exist(dir, names) {
                tracing::debug!("found {} in {}", join_names(names), dir.display());
                return Some(SetMatch {
                    dir_index,
                    set_index,
                });
            }
        }
    }
    None
}

/// Join file names for log and error messages.
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// A throwaway source file used to probe the compiler.
///
/// The file is removed when the guard is dropped, on every exit path.
#[derive(Debug)]
pub struct ProbeSource {
    file: NamedTempFile,
}

impl ProbeSource {
    /// Create an empty probe file in `dir`.
    pub fn create_in(dir: &Path) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("anchorage-probe-")
            .suffix(".cpp")
            .tempfile_in(dir)
            .with_context(|| format!("failed to create probe file in {}", dir.display()))?;
        file.flush().context("failed to flush probe file")?;
        Ok(ProbeSource { file })
    }

    /// Path of the probe file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
