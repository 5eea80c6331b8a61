use serde::Deserialize;
use std::collections::BTreeMap;

use crate::checks::Meta;
use crate::types::CheckResult;

pub const NAME: &str = "Storage Health";

#[derive(Debug, Deserialize)]
struct ClaimList {
    #[serde(default)]
    items: Vec<ClaimItem>,
}

#[derive(Debug, Deserialize)]
struct ClaimItem {
    #[serde(default)]
    metadata: Meta,
    #[serde(default)]
    status: ClaimStatus,
}

#[derive(Debug, Default, Deserialize)]
struct ClaimStatus {
    phase: Option<String>,
}

/// No claims is Healthy; otherwise every claim must be Bound. Claims in any
/// other phase are listed as `name(phase)`.
pub fn evaluate(body: &str, namespace: &str) -> CheckResult {
    let list: ClaimList = match serde_json::from_str(body) {
        Ok(list) => list,
        Err(_) => return CheckResult::unknown(NAME, "Failed to parse PVC information"),
    };

    let total = list.items.len() as i64;
    if total == 0 {
        return CheckResult::healthy(NAME, format!("No PVCs in namespace {}", namespace));
    }

    let mut bound = 0i64;
    let mut not_bound = Vec::new();

    for claim in &list.items {
        match claim.status.phase.as_deref() {
            Some("Bound") => bound += 1,
            phase => not_bound.push(format!(
                "{}({})",
                claim.metadata.name,
                phase.unwrap_or("Unknown")
            )),
        }
    }

    let details = BTreeMap::from([("total".to_string(), total), ("bound".to_string(), bound)]);

    if bound == total {
        CheckResult::healthy(NAME, format!("All {} PVCs are bound", total)).with_details(details)
    } else {
        CheckResult::warning(
            NAME,
            format!("{} not bound: {}", not_bound.len(), not_bound.join(", ")),
        )
        .with_details(details)
    }
}

/// Result used when the claim listing itself could not be retrieved.
pub fn degraded() -> CheckResult {
    CheckResult::warning(NAME, "Failed to get PVC information")
}
