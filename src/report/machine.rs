//! Machine ads as emitted by `condor_status -json`.
//!
//! JSON shape (one ad per slot; only the fields the reports use are
//! modeled, everything else is ignored):
//!
//! ```json
//! [
//!   {
//!     "AddressV1": "<[...]&alias=\"node01.example.org\"&...>",
//!     "TotalCpus": 64.0,
//!     "ChildCpus": [4.0, 8.0],
//!     "TotalGPUs": 4,
//!     "ChildGPUs": [1.0],
//!     "CUDADeviceName": "Tesla V100-PCIE-32GB"
//!   }
//! ]
//! ```
//!
//! `ChildCpus`/`ChildGPUs` list the claims of a partitionable slot's
//! dynamic children; ads without `ChildCpus` (static or dynamic slots) do
//! not describe a whole node and are skipped by the reports. Classad
//! numbers arrive as JSON floats; fractional parts are truncated when the
//! tables are rendered.

use anyhow::Context as _;
use regex::Regex;
use serde::Deserialize;

/// One machine/slot ad. All fields are optional in the wild.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachineAd {
    #[serde(rename = "AddressV1", default)]
    pub address_v1: Option<String>,

    #[serde(rename = "TotalCpus", default)]
    pub total_cpus: Option<f64>,

    #[serde(rename = "TotalGPUs", default)]
    pub total_gpus: Option<f64>,

    #[serde(rename = "ChildCpus", default)]
    pub child_cpus: Option<Vec<f64>>,

    #[serde(rename = "ChildGPUs", default)]
    pub child_gpus: Option<Vec<f64>>,

    #[serde(rename = "CUDADeviceName", default)]
    pub cuda_device_name: Option<String>,
}

impl MachineAd {
    /// CPUs claimed by this slot's dynamic children.
    pub fn claimed_cpus(&self) -> f64 {
        self.child_cpus.as_deref().unwrap_or(&[]).iter().sum()
    }

    /// GPUs claimed by this slot's dynamic children.
    pub fn claimed_gpus(&self) -> f64 {
        self.child_gpus.as_deref().unwrap_or(&[]).iter().sum()
    }

    /// Node display name: the `alias="..."` text inside `AddressV1`.
    ///
    /// Ads without a parsable alias are reported as `unknown`.
    pub fn display_name(&self, alias_re: &Regex) -> String {
        let alias = self
            .address_v1
            .as_deref()
            .and_then(|addr| alias_re.captures(addr))
            .and_then(|caps| caps.get(1));

        match alias {
            Some(m) => m.as_str().to_string(),
            None => {
                tracing::warn!(address = ?self.address_v1, "machine ad without alias");
                "unknown".to_string()
            }
        }
    }
}

/// Compile the pattern matching `alias="..."` in `AddressV1` strings.
pub fn alias_regex() -> crate::Result<Regex> {
    Ok(Regex::new(r#"alias="([^"]*)""#)?)
}

/// Parse a `condor_status -json` dump into machine ads.
pub fn parse_machine_ads(text: &str) -> crate::Result<Vec<MachineAd>> {
    serde_json::from_str(text).context("parse machine ad JSON")
}
