use serde::Deserialize;
use std::collections::BTreeMap;

use crate::checks::Meta;
use crate::types::CheckResult;

pub const NAME: &str = "Deployment Health";

#[derive(Debug, Deserialize)]
struct DeploymentList {
    #[serde(default)]
    items: Vec<DeploymentItem>,
}

#[derive(Debug, Deserialize)]
struct DeploymentItem {
    #[serde(default)]
    metadata: Meta,
    #[serde(default)]
    spec: DeploymentSpec,
    #[serde(default)]
    status: DeploymentStatus,
}

#[derive(Debug, Default, Deserialize)]
struct DeploymentSpec {
    replicas: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct DeploymentStatus {
    #[serde(rename = "readyReplicas")]
    ready_replicas: Option<i64>,
}

/// Unlike pods, an empty namespace is Healthy here: having no deployments is
/// normal. Otherwise every deployment must have its desired replica count
/// ready; stragglers are listed as `name(ready/desired)`.
pub fn evaluate(body: &str, namespace: &str) -> CheckResult {
    let list: DeploymentList = match serde_json::from_str(body) {
        Ok(list) => list,
        Err(_) => return CheckResult::unknown(NAME, "Failed to parse deployment information"),
    };

    let total = list.items.len() as i64;
    if total == 0 {
        return CheckResult::healthy(NAME, format!("No deployments in namespace {}", namespace));
    }

    let mut healthy = 0i64;
    let mut unhealthy = Vec::new();

    for deployment in &list.items {
        // Replicas defaults to 1 when unset, readyReplicas to 0.
        let desired = deployment.spec.replicas.unwrap_or(1);
        let ready = deployment.status.ready_replicas.unwrap_or(0);

        if ready == desired {
            healthy += 1;
        } else {
            unhealthy.push(format!("{}({}/{})", deployment.metadata.name, ready, desired));
        }
    }

    let details = BTreeMap::from([
        ("total".to_string(), total),
        ("healthy".to_string(), healthy),
    ]);

    if healthy == total {
        CheckResult::healthy(NAME, format!("All {} deployments are healthy", total))
            .with_details(details)
    } else {
        CheckResult::warning(
            NAME,
            format!("{} unhealthy: {}", unhealthy.len(), unhealthy.join(", ")),
        )
        .with_details(details)
    }
}

/// Result used when the deployment listing itself could not be retrieved.
pub fn degraded() -> CheckResult {
    CheckResult::warning(NAME, "Failed to get deployments")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HealthStatus;
    use serde_json::json;

    fn deployment(name: &str, desired: i64, ready: Option<i64>) -> serde_json::Value {
        json!({
            "metadata": {"name": name},
            "spec": {"replicas": desired},
            "status": {"readyReplicas": ready}
        })
    }

    fn listing(items: Vec<serde_json::Value>) -> String {
        json!({"items": items}).to_string()
    }

    #[test]
    fn test_empty_namespace_is_healthy() {
        let result = evaluate(&listing(vec![]), "default");
        assert_eq!(result.status, HealthStatus::Healthy);
        assert!(result.message.contains("No deployments"));
    }

    #[test]
    fn test_fully_replicated_deployments_are_healthy() {
        let body = listing(vec![
            deployment("api", 3, Some(3)),
            deployment("worker", 2, Some(2)),
        ]);

        let result = evaluate(&body, "default");
        assert_eq!(result.status, HealthStatus::Healthy);
        assert_eq!(result.message, "All 2 deployments are healthy");
        assert_eq!(result.details.as_ref().unwrap()["healthy"], 2);
    }

    #[test]
    fn test_under_replicated_deployments_are_each_named() {
        let body = listing(vec![
            deployment("api", 3, Some(1)),
            deployment("worker", 2, Some(2)),
            deployment("cache", 2, None),
        ]);

        let result = evaluate(&body, "default");
        assert_eq!(result.status, HealthStatus::Warning);
        assert!(result.message.contains("2 unhealthy"));
        assert!(result.message.contains("api(1/3)"));
        assert!(result.message.contains("cache(0/2)"));
        assert!(!result.message.contains("worker"));
    }

    #[test]
    fn test_unset_desired_replicas_defaults_to_one() {
        let body = listing(vec![json!({
            "metadata": {"name": "single"},
            "spec": {},
            "status": {"readyReplicas": 1}
        })]);

        let result = evaluate(&body, "default");
        assert_eq!(result.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_unparseable_body_is_unknown() {
        let result = evaluate("[]", "default");
        assert_eq!(result.status, HealthStatus::Unknown);
    }

    #[test]
    fn test_degraded_is_warning() {
        assert_eq!(degraded().status, HealthStatus::Warning);
    }
}
