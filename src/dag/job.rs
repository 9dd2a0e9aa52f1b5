//! Job identity and the job variants making up the generated DAG.
//!
//! Ids follow the scheme the submit files expect: `MAP000`, `MAP001`, ...
//! for leaves, `REDUCE000`, ... for aggregations, and the fixed `FINAL`
//! for the single sink. The zero padding is 3 digits and grows naturally
//! past 999.

use std::fmt;

/// Identifier of the DAG's single sink job.
pub const FINAL_ID: &str = "FINAL";

/// Identifier of one job in the generated DAG.
///
/// Stored as the rendered string so it can be compared and joined directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(String);

impl JobId {
    /// Id of the `seq`-th map job: `MAP000`, `MAP001`, ...
    pub fn map(seq: usize) -> Self {
        Self(format!("MAP{seq:03}"))
    }

    /// Id of the `seq`-th reduce job: `REDUCE000`, `REDUCE001`, ...
    pub fn reduce(seq: usize) -> Self {
        Self(format!("REDUCE{seq:03}"))
    }

    /// The fixed sink id.
    pub fn final_id() -> Self {
        Self(FINAL_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single node in the generated DAG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Leaf: one unit of work over one input value, carried verbatim.
    Map { id: JobId, value: String },

    /// Aggregation over the outputs of earlier jobs, in parent order.
    Reduce { id: JobId, parents: Vec<JobId> },
}

impl Job {
    pub fn id(&self) -> &JobId {
        match self {
            Job::Map { id, .. } | Job::Reduce { id, .. } => id,
        }
    }

    /// Parent ids this job depends on; empty for a map job.
    pub fn parents(&self) -> &[JobId] {
        match self {
            Job::Map { .. } => &[],
            Job::Reduce { parents, .. } => parents,
        }
    }

    /// Replace this job's id. Only ever applied to the sink, which no
    /// parent list references.
    pub(crate) fn rename(&mut self, new_id: JobId) {
        match self {
            Job::Map { id, .. } | Job::Reduce { id, .. } => *id = new_id,
        }
    }
}

/// The full DAG: all jobs in construction order (leaves, then each
/// reduction round).
///
/// Construction guarantees that every job's parents appear strictly
/// earlier in the sequence and that the last job is the single sink,
/// renamed to [`FINAL_ID`].
#[derive(Debug, Clone)]
pub struct JobGraph {
    jobs: Vec<Job>,
}

impl JobGraph {
    pub(crate) fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The sink job (always present: the builder rejects empty input).
    pub fn final_job(&self) -> &Job {
        self.jobs
            .last()
            .expect("JobGraph is never constructed empty")
    }

    pub(crate) fn rename_last(&mut self, new_id: JobId) {
        if let Some(last) = self.jobs.last_mut() {
            last.rename(new_id);
        }
    }
}
