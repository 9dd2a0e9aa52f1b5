//! DAGMan serialization of a [`JobGraph`].
//!
//! Expected output, one block per job in construction order, blocks
//! separated by blank lines, a `DOT` directive last:
//!
//! ```text
//! JOB MAP000 square.sub
//! VARS MAP000 id="MAP000" value="3"
//!
//! JOB FINAL add.sub
//! VARS FINAL id="FINAL" value="MAP000,MAP001"
//! PARENT MAP000 MAP001 CHILD FINAL
//!
//! DOT mapreduce.dot
//! ```
//!
//! Values land verbatim inside `value="..."`; no quoting or escaping is
//! applied.

use std::fmt::Write as _;

use crate::dag::job::{Job, JobGraph};

/// Submit description used by map jobs.
pub const MAP_SUBMIT_FILE: &str = "square.sub";

/// Submit description used by reduce jobs.
pub const REDUCE_SUBMIT_FILE: &str = "add.sub";

/// File DAGMan writes the graph visualization to.
pub const DOT_FILE: &str = "mapreduce.dot";

/// Render the whole graph, including the trailing `DOT` directive and
/// newline. The result is a complete DAGMan input file.
pub fn render_dag(graph: &JobGraph) -> String {
    let mut out = String::new();
    for job in graph.jobs() {
        render_job(&mut out, job);
        out.push('\n');
    }
    let _ = writeln!(out, "DOT {DOT_FILE}");
    out
}

/// One job's declaration block, dispatching on the job kind.
fn render_job(out: &mut String, job: &Job) {
    match job {
        Job::Map { id, value } => {
            let _ = writeln!(out, "JOB {id} {MAP_SUBMIT_FILE}");
            let _ = writeln!(out, "VARS {id} id=\"{id}\" value=\"{value}\"");
        }
        Job::Reduce { id, parents } => {
            let ids: Vec<&str> = parents.iter().map(|p| p.as_str()).collect();
            let _ = writeln!(out, "JOB {id} {REDUCE_SUBMIT_FILE}");
            let _ = writeln!(out, "VARS {id} id=\"{id}\" value=\"{}\"", ids.join(","));
            let _ = writeln!(out, "PARENT {} CHILD {id}", ids.join(" "));
        }
    }
}
