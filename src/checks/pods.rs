use serde::Deserialize;
use std::collections::BTreeMap;

use crate::types::CheckResult;

pub const NAME: &str = "Pod Health";

/// Fraction of pods allowed to sit in Pending before the namespace is
/// flagged.
const PENDING_WARNING_RATIO: f64 = 0.3;

#[derive(Debug, Deserialize)]
struct PodList {
    #[serde(default)]
    items: Vec<PodItem>,
}

#[derive(Debug, Deserialize)]
struct PodItem {
    #[serde(default)]
    status: PodStatus,
}

#[derive(Debug, Default, Deserialize)]
struct PodStatus {
    phase: Option<String>,
}

/// An empty namespace is Warning, not Healthy: the absence of workloads is
/// suspicious here. Otherwise any Failed pod is Critical, a pending backlog
/// above the ratio is Warning, and everything else is Healthy.
pub fn evaluate(body: &str, namespace: &str) -> CheckResult {
    let list: PodList = match serde_json::from_str(body) {
        Ok(list) => list,
        Err(_) => return CheckResult::unknown(NAME, "Failed to parse pod information"),
    };

    let total = list.items.len() as i64;
    if total == 0 {
        return CheckResult::warning(NAME, format!("No pods found in namespace {}", namespace));
    }

    let mut running = 0i64;
    let mut pending = 0i64;
    let mut failed = 0i64;
    let mut other = 0i64;

    for pod in &list.items {
        match pod.status.phase.as_deref() {
            Some("Running") => running += 1,
            Some("Pending") => pending += 1,
            Some("Failed") => failed += 1,
            _ => other += 1,
        }
    }

    let details = BTreeMap::from([
        ("total".to_string(), total),
        ("running".to_string(), running),
        ("pending".to_string(), pending),
        ("failed".to_string(), failed),
        ("other".to_string(), other),
    ]);

    if failed > 0 {
        CheckResult::critical(
            NAME,
            format!(
                "{} pods failed, {} running, {} pending",
                failed, running, pending
            ),
        )
        .with_details(details)
    } else if pending as f64 > total as f64 * PENDING_WARNING_RATIO {
        CheckResult::warning(NAME, format!("{} pods pending, {} running", pending, running))
            .with_details(details)
    } else {
        CheckResult::healthy(NAME, format!("{}/{} pods running", running, total))
            .with_details(details)
    }
}

/// Result used when the pod listing itself could not be retrieved.
pub fn degraded(namespace: &str) -> CheckResult {
    CheckResult::critical(NAME, format!("Failed to get pods in namespace {}", namespace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HealthStatus;
    use serde_json::json;

    fn listing(phases: &[&str]) -> String {
        let items: Vec<_> = phases
            .iter()
            .map(|phase| json!({"status": {"phase": phase}}))
            .collect();
        json!({"items": items}).to_string()
    }

    #[test]
    fn test_empty_namespace_is_warning_never_healthy() {
        let result = evaluate(&listing(&[]), "default");
        assert_eq!(result.status, HealthStatus::Warning);
        assert!(result.message.contains("No pods found in namespace default"));
        assert!(result.details.is_none());
    }

    #[test]
    fn test_any_failed_pod_is_critical() {
        let result = evaluate(&listing(&["Running", "Running", "Failed"]), "default");
        assert_eq!(result.status, HealthStatus::Critical);
        assert!(result.message.contains("1 pods failed"));
        assert_eq!(result.details.as_ref().unwrap()["failed"], 1);
    }

    #[test]
    fn test_pending_backlog_is_warning() {
        // 2 of 4 pending = 50% > 30%
        let result = evaluate(&listing(&["Running", "Running", "Pending", "Pending"]), "default");
        assert_eq!(result.status, HealthStatus::Warning);
        assert!(result.message.contains("2 pods pending"));
    }

    #[test]
    fn test_small_pending_fraction_is_healthy() {
        // 1 of 4 pending = 25% <= 30%
        let result = evaluate(&listing(&["Running", "Running", "Running", "Pending"]), "default");
        assert_eq!(result.status, HealthStatus::Healthy);
        assert!(result.message.contains("3/4 pods running"));
    }

    #[test]
    fn test_details_always_present_when_parsed_with_pods() {
        let result = evaluate(&listing(&["Running", "Succeeded", "Pending"]), "default");
        let details = result.details.unwrap();
        assert_eq!(details["total"], 3);
        assert_eq!(details["running"], 1);
        assert_eq!(details["pending"], 1);
        assert_eq!(details["failed"], 0);
        assert_eq!(details["other"], 1);
    }

    #[test]
    fn test_unparseable_body_is_unknown() {
        let result = evaluate("{\"items\": 42}", "default");
        assert_eq!(result.status, HealthStatus::Unknown);
    }

    #[test]
    fn test_degraded_names_the_namespace() {
        let result = degraded("staging");
        assert_eq!(result.status, HealthStatus::Critical);
        assert!(result.message.contains("staging"));
    }
}
