//! Reduction-tree construction.
//!
//! Each input value becomes one map job. Rounds of reduce jobs then fold
//! the active list, at most [`DEFAULT_FAN_IN`] parents per reduce, until a
//! single job remains; that job is renamed `FINAL` so downstream tooling
//! can find the result. Reduce numbering continues across rounds, so ids
//! name jobs uniquely over the whole graph.

use crate::dag::job::{Job, JobGraph, JobId};
use crate::errors::DagError;

/// Maximum number of parents a reduce job aggregates.
pub const DEFAULT_FAN_IN: usize = 5;

/// Builds a [`JobGraph`] from an ordered list of input values.
///
/// The builder owns the fan-in bound and the reduce counter; a fresh
/// builder always numbers reduces from `REDUCE000`.
#[derive(Debug)]
pub struct TreeBuilder {
    fan_in: usize,
    next_reduce: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::with_fan_in(DEFAULT_FAN_IN)
    }

    /// Use a non-default fan-in. Values below 2 are rejected at build time.
    pub fn with_fan_in(fan_in: usize) -> Self {
        Self {
            fan_in,
            next_reduce: 0,
        }
    }

    /// Validate the inputs and build the graph:
    /// - at least one value
    /// - fan-in at least 2 (otherwise a round never shrinks the list)
    ///
    /// With a single value no reduce jobs are created and the lone map job
    /// itself becomes `FINAL`; the submit files accept either job type
    /// under that name, so the rename is applied unconditionally.
    pub fn build(mut self, values: &[String]) -> Result<JobGraph, DagError> {
        if values.is_empty() {
            return Err(DagError::NoInputValues);
        }
        if self.fan_in < 2 {
            return Err(DagError::FanInTooSmall(self.fan_in));
        }

        // 1) One map job per value, in input order.
        let mut jobs: Vec<Job> = values
            .iter()
            .enumerate()
            .map(|(seq, value)| Job::Map {
                id: JobId::map(seq),
                value: value.clone(),
            })
            .collect();

        // 2) Fold rounds until one job stays active. Chunking preserves
        //    order, so the last chunk of a round may hold fewer parents.
        let mut active: Vec<JobId> = jobs.iter().map(|job| job.id().clone()).collect();
        let mut rounds = 0usize;
        while active.len() > 1 {
            let mut next = Vec::with_capacity(active.len().div_ceil(self.fan_in));
            for chunk in active.chunks(self.fan_in) {
                let id = JobId::reduce(self.next_reduce);
                self.next_reduce += 1;
                jobs.push(Job::Reduce {
                    id: id.clone(),
                    parents: chunk.to_vec(),
                });
                next.push(id);
            }
            rounds += 1;
            active = next;
        }

        // 3) Rename the single sink. Nothing references it as a parent.
        let mut graph = JobGraph::new(jobs);
        graph.rename_last(JobId::final_id());

        tracing::debug!(
            values = values.len(),
            reduces = self.next_reduce,
            rounds,
            "built reduction graph"
        );
        Ok(graph)
    }
}
