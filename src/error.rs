//! Error types for snapshot parsing and report generation.
//!
//! Every error is terminal for the current comparison: nothing is retried
//! and no partial report is written.

use std::path::PathBuf;
use thiserror::Error;

/// A matched observation line could not be turned into a usage record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Line carries the `Account` marker but no recognizable `Space used:` block
    #[error("line {line}: account observation without a valid 'Space used:' block")]
    MissingUsage { line: usize },

    /// The `used` or `total` field is not a non-negative number
    #[error("line {line}: invalid {field} value '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("snapshot log not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read snapshot log {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Which side of the comparison came up empty
    #[error("{side} snapshot contains no account observations")]
    EmptySnapshot { side: &'static str },

    #[error("both log paths must be given together, or neither")]
    IncompletePair,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("need at least 2 snapshot logs in {}, found {found}", dir.display())]
    Discovery { dir: PathBuf, found: usize },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to write report {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
