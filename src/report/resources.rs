//! Resource-class availability report (the `free_resources` binary).
//!
//! Slots are grouped into classes in encounter order: every whole node
//! contributes its CPUs to the `CPUs` class, and GPU nodes additionally
//! contribute their GPUs to a class named after the CUDA device model.

use std::fmt::Write as _;

use crate::report::machine::MachineAd;

/// Name of the class every node's CPUs land in.
pub const CPU_CLASS: &str = "CPUs";

/// One contributing slot: advertised total and its children's claims.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEntry {
    pub total: f64,
    pub claimed: Vec<f64>,
}

impl SlotEntry {
    fn claimed_sum(&self) -> f64 {
        self.claimed.iter().sum()
    }
}

/// All slots of one resource class, in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceClass {
    pub name: String,
    pub slots: Vec<SlotEntry>,
}

impl ResourceClass {
    /// Advertised units over all slots, truncated to whole units.
    pub fn total(&self) -> i64 {
        self.slots.iter().map(|s| s.total).sum::<f64>() as i64
    }

    /// Units not claimed by any child slot.
    pub fn available(&self) -> i64 {
        let claimed = self.slots.iter().map(SlotEntry::claimed_sum).sum::<f64>() as i64;
        self.total() - claimed
    }
}

/// Classes in the order the ads introduced them.
#[derive(Debug, Clone, Default)]
pub struct ResourceReport {
    pub classes: Vec<ResourceClass>,
}

impl ResourceReport {
    fn class_mut(&mut self, name: &str) -> &mut ResourceClass {
        if let Some(pos) = self.classes.iter().position(|c| c.name == name) {
            &mut self.classes[pos]
        } else {
            self.classes.push(ResourceClass {
                name: name.to_string(),
                slots: Vec::new(),
            });
            let last = self.classes.len() - 1;
            &mut self.classes[last]
        }
    }

    /// The slot with the maximal `(total, free)` ordering among CPU slots:
    /// the free-CPU count on the biggest node. None when no node
    /// contributed CPUs.
    pub fn largest_cpu_block(&self) -> Option<(i64, i64)> {
        let cpus = self.classes.iter().find(|c| c.name == CPU_CLASS)?;
        cpus.slots
            .iter()
            .map(|slot| {
                let total = slot.total as i64;
                (total, total - slot.claimed_sum() as i64)
            })
            .max()
    }
}

/// Group the ads by resource class.
///
/// A slot contributes CPUs when it carries both `TotalCpus` and
/// `ChildCpus`, and GPUs when it names a CUDA device and carries both
/// `TotalGPUs` and `ChildGPUs`.
pub fn build_resource_report(ads: &[MachineAd]) -> ResourceReport {
    let mut report = ResourceReport::default();

    for ad in ads {
        if let (Some(total), Some(claimed)) = (ad.total_cpus, &ad.child_cpus) {
            report.class_mut(CPU_CLASS).slots.push(SlotEntry {
                total,
                claimed: claimed.clone(),
            });
        }

        if let Some(device) = &ad.cuda_device_name {
            if let (Some(total), Some(claimed)) = (ad.total_gpus, &ad.child_gpus) {
                report.class_mut(device).slots.push(SlotEntry {
                    total,
                    claimed: claimed.clone(),
                });
            }
        }
    }

    report
}

/// Render the totals table plus the largest-free-block line.
pub fn render_resource_report(report: &ResourceReport) -> String {
    let mut out = String::new();
    out.push_str("Resource\t\tTotal\tAvailable\n");
    for class in &report.classes {
        let _ = writeln!(
            out,
            "{:<24}{}\t{}",
            class.name,
            class.total(),
            class.available()
        );
    }

    if let Some((total, free)) = report.largest_cpu_block() {
        let _ = writeln!(
            out,
            "\nLargest free block of CPUs: {free}, on a node with {total} CPUs"
        );
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
            "TotalCpus": 128.0,
            "ChildCpus": [16.0, 56.0]
        },
        {
            "AddressV1": "<[--1]&alias=\"gpu01.cluster.org\"&noUDP>",
            "TotalCpus": 48.0,
            "ChildCpus": [8.0],
            "TotalGPUs": 8,
            "ChildGPUs": [2.0, 1.0],
            "CUDADeviceName": "Tesla V100-PCIE-32GB"
        },
        {
            "AddressV1": "<[--1]&alias=\"gpu02.cluster.org\"&noUDP>",
            "TotalCpus": 64.0,
            "ChildCpus": [],
            "TotalGPUs": 4,
            "ChildGPUs": [],
            "CUDADeviceName": "NVIDIA A100-SXM4-40GB"
        },
        {
            "State": "Claimed"
        }
    ]"#;

    fn report() -> ResourceReport {
        build_resource_report(&parse_machine_ads(POOL).unwrap())
    }

    #[test]
    fn classes_appear_in_encounter_order() {
        let report = report();
        let names: Vec<&str> = report.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["CPUs", "Tesla V100-PCIE-32GB", "NVIDIA A100-SXM4-40GB"]
        );
    }

    #[test]
    fn totals_and_availability_per_class() {
        let report = report();
        let cpus = &report.classes[0];
        assert_eq!(cpus.total(), 240);
        assert_eq!(cpus.available(), 240 - 80);

        let v100 = &report.classes[1];
        assert_eq!(v100.total(), 8);
        assert_eq!(v100.available(), 5);

        let a100 = &report.classes[2];
        assert_eq!(a100.total(), 4);
        assert_eq!(a100.available(), 4);
    }

    #[test]
    fn largest_block_prefers_the_biggest_node() {
        // cn01 wins with 128 CPUs / 56 free even though gpu02 has 64 free.
        assert_eq!(report().largest_cpu_block(), Some((128, 56)));
    }

    #[test]
    fn renders_the_totals_table() {
        let expected = "\
Resource\t\tTotal\tAvailable
CPUs                    240\t160
Tesla V100-PCIE-32GB    8\t5
NVIDIA A100-SXM4-40GB   4\t4

Largest free block of CPUs: 56, on a node with 128 CPUs
";
        assert_eq!(render_resource_report(&report()), expected);
    }

    #[test]
    fn empty_pool_renders_header_only() {
        let out = render_resource_report(&build_resource_report(&[]));
        assert_eq!(out, "Resource\t\tTotal\tAvailable\n");
    }

    #[test]
    fn gpu_slots_without_device_name_stay_out_of_gpu_classes() {
        let ads = parse_machine_ads(
            r#"[{"TotalCpus": 16.0, "ChildCpus": [], "TotalGPUs": 2, "ChildGPUs": []}]"#,
        )
        .unwrap();
        let report = build_resource_report(&ads);
        let names: Vec<&str> = report.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["CPUs"]);
    }

    #[test]
    fn fractional_classad_floats_truncate() {
        let ads = parse_machine_ads(r#"[{"TotalCpus": 32.9, "ChildCpus": [4.6, 8.7]}]"#).unwrap();
        let report = build_resource_report(&ads);

        // Totals and claims each truncate after summing: 32 and 13.
        let cpus = &report.classes[0];
        assert_eq!((cpus.total(), cpus.available()), (32, 19));

        let expected = "\
Resource\t\tTotal\tAvailable
CPUs                    32\t19

Largest free block of CPUs: 19, on a node with 32 CPUs
";
        assert_eq!(render_resource_report(&report), expected);
    }
}
