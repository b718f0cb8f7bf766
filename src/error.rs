//! Error types shared by both rewriting passes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Faults that abort a run (or, with keep-going, a single file).
///
/// A comment block that cannot be located is *not* an error: the entry is
/// skipped and counted in the run report instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read definitions from {path}: {source}")]
    DefinitionsRead { path: PathBuf, source: io::Error },

    #[error("malformed definitions in {path}: {reason}")]
    Definitions { path: PathBuf, reason: String },

    #[error("{path} contains CRLF line endings; convert it to LF before injecting")]
    CarriageReturn { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid file pattern {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("{} file(s) failed:\n{}", .failures.len(), format_failures(.failures))]
    Batch { failures: Vec<(PathBuf, Error)> },
}

fn format_failures(failures: &[(PathBuf, Error)]) -> String {
    failures
        .iter()
        .map(|(path, err)| format!("  {}: {}", path.display(), err))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, Error>;
