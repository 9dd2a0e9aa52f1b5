//! Reduction DAG: job model, tree construction, DAGMan rendering.
//!
//! This module is intentionally separate from the executors and reports.
//! It owns:
//! - JobId / Job / JobGraph types
//! - TreeBuilder (fan-in chunking over the input values)
//! - the DAGMan text serialization

pub mod build;
pub mod job;
pub mod render;

pub use build::{DEFAULT_FAN_IN, TreeBuilder};
pub use job::{FINAL_ID, Job, JobGraph, JobId};
pub use render::render_dag;
