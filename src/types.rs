use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of AWS resource a cost finding refers to.
///
/// Serialized with the short provider names so downstream tooling that
/// consumed the old reports keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceType {
    #[serde(rename = "EC2")]
    Compute,
    #[serde(rename = "EBS")]
    BlockVolume,
    Snapshot,
    #[serde(rename = "EIP")]
    ElasticAddress,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceType::Compute => "EC2",
            ResourceType::BlockVolume => "EBS",
            ResourceType::Snapshot => "Snapshot",
            ResourceType::ElasticAddress => "EIP",
        };
        f.write_str(s)
    }
}

/// Priority assigned by the rule that produced a finding. Fixed per rule,
/// never derived from the savings magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Display order for report grouping.
    pub const REPORT_ORDER: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        f.write_str(s)
    }
}

/// A single flagged cost-saving opportunity tied to one resource.
/// Costs are estimated USD per month.
#[derive(Debug, Clone, Serialize)]
pub struct CostFinding {
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub current_cost: f64,
    pub potential_savings: f64,
    pub recommendation: String,
    pub priority: Priority,
}

/// A running EC2 instance with its trailing 7-day average CPU utilization.
/// `avg_cpu` is `None` when CloudWatch returned no datapoints; such instances
/// are never flagged.
#[derive(Debug, Clone)]
pub struct ComputeInstance {
    pub id: String,
    pub instance_type: String,
    pub avg_cpu: Option<f64>,
}

/// An EBS volume in the `available` (unattached) state.
#[derive(Debug, Clone)]
pub struct UnattachedVolume {
    pub id: String,
    pub size_gb: i64,
}

/// An EBS snapshot owned by the calling account.
#[derive(Debug, Clone)]
pub struct SnapshotRecord {
    pub id: String,
    pub size_gb: i64,
    pub created_at: DateTime<Utc>,
}

/// An allocated Elastic IP and whatever it is (or is not) attached to.
#[derive(Debug, Clone)]
pub struct AddressRecord {
    pub allocation_id: String,
    pub public_ip: Option<String>,
    pub attached_instance: Option<String>,
}

/// Outcome severity of a single health check category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
    Unknown,
}

impl HealthStatus {
    /// Console label, glyph included.
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "✓ HEALTHY",
            HealthStatus::Warning => "⚠ WARNING",
            HealthStatus::Critical => "✗ CRITICAL",
            HealthStatus::Unknown => "? UNKNOWN",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome of evaluating one health category against the cluster.
/// `details` carries numeric counters and is only present when the underlying
/// query succeeded and parsed.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: HealthStatus,
    pub message: String,
    pub details: Option<BTreeMap<String, i64>>,
}

impl CheckResult {
    pub fn new(name: &str, status: HealthStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn healthy(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Healthy, message)
    }

    pub fn warning(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Warning, message)
    }

    pub fn critical(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Critical, message)
    }

    pub fn unknown(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Unknown, message)
    }

    pub fn with_details(mut self, details: BTreeMap<String, i64>) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_serialization_uses_wire_names() {
        let finding = CostFinding {
            resource_type: ResourceType::ElasticAddress,
            resource_id: "eipalloc-123".to_string(),
            current_cost: 3.6,
            potential_savings: 3.6,
            recommendation: "Release it".to_string(),
            priority: Priority::High,
        };

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["resource_type"], "EIP");
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["resource_id"], "eipalloc-123");

        let volume_type = serde_json::to_value(ResourceType::BlockVolume).unwrap();
        assert_eq!(volume_type, "EBS");
        let compute_type = serde_json::to_value(ResourceType::Compute).unwrap();
        assert_eq!(compute_type, "EC2");
    }

    #[test]
    fn test_check_result_builders() {
        let result = CheckResult::warning("Node Health", "3/5 nodes ready")
            .with_details(BTreeMap::from([
                ("total".to_string(), 5),
                ("ready".to_string(), 3),
            ]));

        assert_eq!(result.status, HealthStatus::Warning);
        assert_eq!(result.details.as_ref().unwrap()["total"], 5);

        let plain = CheckResult::healthy("Storage Health", "No PVCs in namespace");
        assert!(plain.details.is_none());
    }

    #[test]
    fn test_status_labels() {
        assert!(HealthStatus::Healthy.label().contains("HEALTHY"));
        assert!(HealthStatus::Critical.label().starts_with('✗'));
    }
}
