//! Per-node free-core report (the `free_cores` binary).
//!
//! Counts whole nodes only (ads carrying `ChildCpus`). CPU-only nodes feed
//! the cluster CPU totals and the free-CPU histogram; every node feeds the
//! GPU totals.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::report::machine::{self, MachineAd};

/// One row of the per-node table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCores {
    pub name: String,
    pub total_cpus: i64,
    pub free_cpus: i64,
    pub total_gpus: i64,
    pub free_gpus: i64,
}

/// Aggregated cluster view, nodes in input order.
#[derive(Debug, Clone, Default)]
pub struct CoreReport {
    pub nodes: Vec<NodeCores>,

    /// CPU totals over CPU-only nodes.
    pub total_cpus: i64,
    pub free_cpus: i64,
    pub max_free_cpus: i64,

    /// GPU totals over all nodes.
    pub total_gpus: i64,
    pub free_gpus: i64,
    pub max_free_gpus: i64,

    /// Free-CPU count -> number of CPU-only nodes with that count. The
    /// zero bucket is kept here and suppressed at render time.
    pub free_cpu_counts: BTreeMap<i64, u64>,
}

/// Aggregate the ads into a [`CoreReport`].
///
/// Ads without `ChildCpus` are not whole nodes and are skipped; ads with
/// `ChildCpus` but no `TotalCpus` are malformed and skipped with a warning.
pub fn build_core_report(ads: &[MachineAd]) -> crate::Result<CoreReport> {
    let alias_re = machine::alias_regex()?;
    let mut report = CoreReport::default();

    for ad in ads {
        if ad.child_cpus.is_none() {
            continue;
        }
        let Some(total_cpus) = ad.total_cpus else {
            tracing::warn!(address = ?ad.address_v1, "machine ad without TotalCpus");
            continue;
        };

        let name = ad.display_name(&alias_re);
        let total_cpus = total_cpus as i64;
        let free_cpus = total_cpus - ad.claimed_cpus() as i64;
        let total_gpus = ad.total_gpus.unwrap_or(0.0) as i64;
        let free_gpus = total_gpus - ad.claimed_gpus() as i64;

        if total_gpus == 0 {
            report.total_cpus += total_cpus;
            report.free_cpus += free_cpus;
            report.max_free_cpus = report.max_free_cpus.max(free_cpus);
            *report.free_cpu_counts.entry(free_cpus).or_default() += 1;
        }
        report.total_gpus += total_gpus;
        report.free_gpus += free_gpus;
        report.max_free_gpus = report.max_free_gpus.max(free_gpus);

        report.nodes.push(NodeCores {
            name,
            total_cpus,
            free_cpus,
            total_gpus,
            free_gpus,
        });
    }

    Ok(report)
}

/// Render the report as a tab-separated table: node rows, CPU totals,
/// GPU totals, free-CPU histogram.
pub fn render_core_report(report: &CoreReport) -> String {
    let mut out = String::new();
    out.push_str("Name\ttotalCPUs\tfreeCPUs\ttotalGPUs\tfreeGPUs\n");
    for node in &report.nodes {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            node.name, node.total_cpus, node.free_cpus, node.total_gpus, node.free_gpus
        );
    }

    let _ = writeln!(out, "Total CPUs {}", report.total_cpus);
    let _ = writeln!(out, "Free CPUs {}", report.free_cpus);
    let _ = writeln!(
        out,
        "Largest free CPUs on a single node {}",
        report.max_free_cpus
    );
    out.push('\n');

    let _ = writeln!(out, "Total GPUs {}", report.total_gpus);
    let _ = writeln!(out, "Free GPUs {}", report.free_gpus);
    let _ = writeln!(
        out,
        "Largest free GPUs on a single node {}",
        report.max_free_gpus
    );
    out.push('\n');

    out.push_str("free CPUs\t# nodes\n");
    for (&free, &count) in &report.free_cpu_counts {
        if free != 0 {
            let _ = writeln!(out, "{free}\t{count}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::machine::parse_machine_ads;
    use pretty_assertions::assert_eq;

    const POOL: &str = r#"[
        {
            "AddressV1": "<[--1]&alias=\"cn01.cluster.org\"&noUDP>",
            "TotalCpus": 32.0,
            "ChildCpus": [4.0, 8.0]
        },
        {
            "AddressV1": "<[--1]&alias=\"cn02.cluster.org\"&noUDP>",
            "TotalCpus": 32.0,
            "ChildCpus": []
        },
        {
            "AddressV1": "<[--1]&alias=\"gpu01.cluster.org\"&noUDP>",
            "TotalCpus": 64.0,
            "ChildCpus": [16.0],
            "TotalGPUs": 4,
            "ChildGPUs": [1.0, 1.0]
        },
        {
            "AddressV1": "<[--1]&alias=\"dyn01.cluster.org\"&noUDP>",
            "TotalCpus": 8.0
        },
        {
            "AddressV1": "<[--1]&alias=\"bad01.cluster.org\"&noUDP>",
            "ChildCpus": [2.0]
        }
    ]"#;

    fn report() -> CoreReport {
        build_core_report(&parse_machine_ads(POOL).unwrap()).unwrap()
    }

    #[test]
    fn counts_only_whole_nodes() {
        let report = report();
        let names: Vec<&str> = report.nodes.iter().map(|n| n.name.as_str()).collect();
        // dyn01 has no ChildCpus and is not a whole node; bad01 has
        // ChildCpus but no TotalCpus and is skipped as malformed.
        assert_eq!(names, ["cn01.cluster.org", "cn02.cluster.org", "gpu01.cluster.org"]);
    }

    #[test]
    fn cpu_totals_cover_cpu_only_nodes() {
        let report = report();
        assert_eq!(report.total_cpus, 64); // cn01 + cn02; gpu01 is a GPU node
        assert_eq!(report.free_cpus, 20 + 32);
        assert_eq!(report.max_free_cpus, 32);
    }

    #[test]
    fn gpu_totals_cover_all_nodes() {
        let report = report();
        assert_eq!(report.total_gpus, 4);
        assert_eq!(report.free_gpus, 2);
        assert_eq!(report.max_free_gpus, 2);
    }

    #[test]
    fn histogram_counts_cpu_only_nodes() {
        let report = report();
        let buckets: Vec<(i64, u64)> = report
            .free_cpu_counts
            .iter()
            .map(|(&f, &c)| (f, c))
            .collect();
        assert_eq!(buckets, [(20, 1), (32, 1)]);
    }

    #[test]
    fn renders_the_full_table() {
        let expected = "\
Name\ttotalCPUs\tfreeCPUs\ttotalGPUs\tfreeGPUs
cn01.cluster.org\t32\t20\t0\t0
cn02.cluster.org\t32\t32\t0\t0
gpu01.cluster.org\t64\t48\t4\t2
Total CPUs 64
Free CPUs 52
Largest free CPUs on a single node 32

Total GPUs 4
Free GPUs 2
Largest free GPUs on a single node 2

free CPUs\t# nodes
20\t1
32\t1
";
        assert_eq!(render_core_report(&report()), expected);
    }

    #[test]
    fn empty_pool_renders_headers_and_zero_totals() {
        let report = build_core_report(&[]).unwrap();
        let out = render_core_report(&report);
        assert!(out.starts_with("Name\ttotalCPUs"));
        assert!(out.contains("Total CPUs 0\n"));
        assert!(out.ends_with("free CPUs\t# nodes\n"));
    }

    #[test]
    fn fully_free_node_lands_in_its_bucket() {
        let ads = parse_machine_ads(
            r#"[{"AddressV1": "<[--1]&alias=\"big.cluster.org\"&x>",
                 "TotalCpus": 384.0, "ChildCpus": []}]"#,
        )
        .unwrap();
        let report = build_core_report(&ads).unwrap();
        assert_eq!(report.free_cpu_counts.get(&384), Some(&1));
    }

    #[test]
    fn fractional_classad_floats_truncate() {
        let ads = parse_machine_ads(
            r#"[{"AddressV1": "<[--1]&alias=\"frac01.cluster.org\"&x>",
                 "TotalCpus": 32.9, "ChildCpus": [4.6, 8.7]}]"#,
        )
        .unwrap();
        let report = build_core_report(&ads).unwrap();

        // The claimed sum truncates once (4.6 + 8.7 -> 13), not per child.
        let node = &report.nodes[0];
        assert_eq!((node.total_cpus, node.free_cpus), (32, 19));
        assert_eq!(report.free_cpu_counts.get(&19), Some(&1));
    }

    #[test]
    fn fully_claimed_node_stays_out_of_the_rendered_histogram() {
        let ads = parse_machine_ads(
            r#"[
                {"AddressV1": "<[--1]&alias=\"full01.cluster.org\"&x>",
                 "TotalCpus": 16.0, "ChildCpus": [10.0, 6.0]},
                {"AddressV1": "<[--1]&alias=\"cn03.cluster.org\"&x>",
                 "TotalCpus": 16.0, "ChildCpus": [4.0]}
            ]"#,
        )
        .unwrap();
        let report = build_core_report(&ads).unwrap();
        assert_eq!(report.free_cpu_counts.get(&0), Some(&1));

        // The zero bucket stays in the counts but never renders.
        let out = render_core_report(&report);
        assert!(out.ends_with("free CPUs\t# nodes\n12\t1\n"));
    }
}
