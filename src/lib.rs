//! Utilities for an HTCondor batch-processing workflow: a map-reduce DAG
//! generator for DAGMan, the aggregation executor the generated DAG runs,
//! and two cluster-resource reports over `condor_status -json` output.
//!
//! Each binary under `src/bin/` is a thin CLI over one of these modules.

pub mod dag;
pub mod errors;
pub mod logging;
pub mod reduce;
pub mod report;

pub type Result<T> = anyhow::Result<T>;
