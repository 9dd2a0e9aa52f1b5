//! Cluster-resource reports over `condor_status -json` machine ads.
//!
//! Both reports consume the same JSON array of ads and print a plain-text
//! table; they differ only in how they slice the pool.

pub mod cores;
pub mod machine;
pub mod resources;

pub use cores::{CoreReport, build_core_report, render_core_report};
pub use machine::{MachineAd, parse_machine_ads};
pub use resources::{ResourceReport, build_resource_report, render_resource_report};

use std::fs;
use std::io::Read as _;
use std::path::Path;

use anyhow::Context as _;

/// Read the report input: the given file, or stdin when no file was named.
pub fn read_input(path: Option<&Path>) -> crate::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read machine ads from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read machine ads from stdin")?;
            Ok(text)
        }
    }
}
