// Health check evaluators, one module per category. Each exposes
// `evaluate` over the raw listing body and `degraded` for the case where
// the listing could not be retrieved at all.
pub mod deployments;
pub mod nodes;
pub mod pods;
pub mod storage;

use serde::Deserialize;
use tracing::warn;

use crate::cluster::ClusterCollector;
use crate::types::CheckResult;

pub const CONNECTIVITY_NAME: &str = "Cluster Connectivity";

/// Minimal object metadata shared by the listing view structs.
#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub name: String,
}

/// Run the five checks sequentially in their fixed display order. A failed
/// query degrades its own category only; the rest still execute.
pub async fn run_all(collector: &ClusterCollector, namespace: &str) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(5);

    match collector.cluster_version().await {
        Ok(_) => results.push(CheckResult::healthy(CONNECTIVITY_NAME, "Cluster is accessible")),
        Err(err) => {
            warn!(error = %err, "connectivity probe failed");
            results.push(connectivity_degraded());
        }
    }

    match collector.nodes().await {
        Ok(body) => results.push(nodes::evaluate(&body)),
        Err(err) => {
            warn!(error = %err, "node listing failed");
            results.push(nodes::degraded());
        }
    }

    match collector.pods(namespace).await {
        Ok(body) => results.push(pods::evaluate(&body, namespace)),
        Err(err) => {
            warn!(error = %err, namespace, "pod listing failed");
            results.push(pods::degraded(namespace));
        }
    }

    match collector.deployments(namespace).await {
        Ok(body) => results.push(deployments::evaluate(&body, namespace)),
        Err(err) => {
            warn!(error = %err, namespace, "deployment listing failed");
            results.push(deployments::degraded());
        }
    }

    match collector.storage_claims(namespace).await {
        Ok(body) => results.push(storage::evaluate(&body, namespace)),
        Err(err) => {
            warn!(error = %err, namespace, "PVC listing failed");
            results.push(storage::degraded());
        }
    }

    results
}

fn connectivity_degraded() -> CheckResult {
    CheckResult::critical(CONNECTIVITY_NAME, "Cannot connect to cluster")
}

/// The full result set for a run where the control plane was never reached,
/// e.g. when no client could be constructed. Same order as `run_all`.
pub fn degraded_results(namespace: &str) -> Vec<CheckResult> {
    vec![
        connectivity_degraded(),
        nodes::degraded(),
        pods::degraded(namespace),
        deployments::degraded(),
        storage::degraded(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HealthStatus;

    #[test]
    fn test_degraded_results_cover_all_categories_in_order() {
        let results = degraded_results("default");

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                CONNECTIVITY_NAME,
                nodes::NAME,
                pods::NAME,
                deployments::NAME,
                storage::NAME,
            ]
        );

        assert_eq!(results[0].status, HealthStatus::Critical);
        assert!(results.iter().all(|r| r.details.is_none()));
    }
}
