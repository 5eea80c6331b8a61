use serde::Deserialize;
use std::collections::BTreeMap;

use crate::checks::Meta;
use crate::types::CheckResult;

pub const NAME: &str = "Node Health";

#[derive(Debug, Deserialize)]
struct NodeList {
    #[serde(default)]
    items: Vec<NodeItem>,
}

#[derive(Debug, Deserialize)]
struct NodeItem {
    #[serde(default)]
    metadata: Meta,
    #[serde(default)]
    status: NodeStatus,
}

#[derive(Debug, Default, Deserialize)]
struct NodeStatus {
    #[serde(default)]
    conditions: Vec<NodeCondition>,
}

#[derive(Debug, Deserialize)]
struct NodeCondition {
    #[serde(rename = "type")]
    type_: String,
    status: String,
}

fn is_ready(node: &NodeItem) -> bool {
    node.status
        .conditions
        .iter()
        .any(|c| c.type_ == "Ready" && c.status == "True")
}

/// Healthy iff every node is ready and there is at least one; Warning when
/// some but not all are ready; Critical when none are (an empty listing
/// counts as none).
pub fn evaluate(body: &str) -> CheckResult {
    let list: NodeList = match serde_json::from_str(body) {
        Ok(list) => list,
        Err(_) => return CheckResult::unknown(NAME, "Failed to parse node information"),
    };

    let total = list.items.len() as i64;
    let mut ready = 0i64;
    let mut not_ready = Vec::new();

    for node in &list.items {
        if is_ready(node) {
            ready += 1;
        } else {
            not_ready.push(node.metadata.name.clone());
        }
    }

    let details = BTreeMap::from([("total".to_string(), total), ("ready".to_string(), ready)]);

    if total > 0 && ready == total {
        CheckResult::healthy(NAME, format!("All {} nodes are ready", total)).with_details(details)
    } else if ready > 0 {
        CheckResult::warning(
            NAME,
            format!(
                "{}/{} nodes ready. Not ready: {}",
                ready,
                total,
                not_ready.join(", ")
            ),
        )
        .with_details(details)
    } else {
        CheckResult::critical(NAME, "No nodes are ready").with_details(details)
    }
}

/// Result used when the node listing itself could not be retrieved.
pub fn degraded() -> CheckResult {
    CheckResult::critical(NAME, "Failed to get node information")
}
