// Cost rule evaluators: independent threshold predicates over the
// resource inventory, one module per resource family.
pub mod compute;
pub mod network;
pub mod pricing;
pub mod storage;

use crate::aws::ResourceInventory;
use crate::types::CostFinding;

pub use compute::analyze_instances;
pub use network::analyze_addresses;
pub use storage::{analyze_snapshots, analyze_volumes};

/// Run every cost rule against the collected inventory and return the
/// combined findings as one owned list.
pub fn evaluate_all(inventory: &ResourceInventory) -> Vec<CostFinding> {
    let mut findings = Vec::new();
    findings.extend(analyze_instances(&inventory.instances));
    findings.extend(analyze_volumes(&inventory.volumes));
    findings.extend(analyze_snapshots(&inventory.snapshots));
    findings.extend(analyze_addresses(&inventory.addresses));
    findings
}
