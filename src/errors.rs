//! Structured errors for the DAG builder and the reduce executor.
//!
//! Report parsing sticks to `anyhow` context strings; these enums cover the
//! cases downstream tooling may want to match on.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from reduction-tree construction.
#[derive(Debug, Error)]
pub enum DagError {
    /// The builder was given an empty value list.
    #[error("at least one input value is required")]
    NoInputValues,

    /// A fan-in below 2 can never shrink the active job list.
    #[error("fan-in must be at least 2, got {0}")]
    FanInTooSmall(usize),
}

/// Errors from the aggregation step (the `add` executable).
#[derive(Debug, Error)]
pub enum ReduceError {
    /// No parent ids were left after splitting the comma-joined list.
    #[error("no parent job ids were given")]
    NoParents,

    /// A parent's `.out` file is absent or unreadable.
    #[error("missing output of parent job {id}: cannot read {}", .path.display())]
    MissingParentOutput {
        id: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A parent's `.out` file holds something other than an integer.
    #[error("parent job {id} wrote non-numeric value {value:?}")]
    NonNumericValue {
        id: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The running sum left the 64-bit range.
    #[error("sum of parent outputs overflows a 64-bit integer")]
    SumOverflow,

    /// The result file could not be written.
    #[error("cannot write result file {}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
