//! Aggregation step run by the reduce jobs in the generated DAG.
//!
//! DAGMan starts `add <id> <parents>` with the comma-joined parent list
//! from the job's `VARS value`. Each parent has already written its result
//! as the first line of `<parent>.out` in the shared working directory;
//! this step sums those integers and writes the sum to `<id>.out`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ReduceError;

/// Split DAGMan's comma-joined parent list, dropping empty entries left by
/// stray commas.
pub fn split_parents(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sum the parents' outputs under `dir` and write `<id>.out` there.
///
/// Returns the sum so callers can log it. Each parent file contributes its
/// first line, trimmed and parsed as a signed integer.
pub fn reduce_outputs(dir: &Path, id: &str, parents: &[String]) -> Result<i64, ReduceError> {
    if parents.is_empty() {
        return Err(ReduceError::NoParents);
    }

    let mut sum = 0i64;
    for parent in parents {
        sum = sum
            .checked_add(read_parent_output(dir, parent)?)
            .ok_or(ReduceError::SumOverflow)?;
    }

    let path = output_path(dir, id);
    fs::write(&path, format!("{sum}\n")).map_err(|source| ReduceError::WriteOutput {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(id, parents = parents.len(), sum, "wrote reduce output");
    Ok(sum)
}

/// Read one parent's result: first line of `<parent>.out`, trimmed.
fn read_parent_output(dir: &Path, parent: &str) -> Result<i64, ReduceError> {
    let path = output_path(dir, parent);
    let text = fs::read_to_string(&path).map_err(|source| ReduceError::MissingParentOutput {
        id: parent.to_string(),
        path: path.clone(),
        source,
    })?;

    let value = text.lines().next().unwrap_or("").trim();
    let value = value
        .parse::<i64>()
        .map_err(|source| ReduceError::NonNumericValue {
            id: parent.to_string(),
            value: value.to_string(),
            source,
        })?;

    tracing::debug!(parent, value, "read parent output");
    Ok(value)
}

/// `<id>.out` under the job's working directory.
fn output_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.out"))
}
