use crate::rules::pricing::ELASTIC_IP_MONTHLY_USD;
use crate::types::{AddressRecord, CostFinding, Priority, ResourceType};

/// Flag Elastic IPs that are allocated but not attached to any instance;
/// AWS bills those at a flat hourly rate.
pub fn analyze_addresses(addresses: &[AddressRecord]) -> Vec<CostFinding> {
    let mut findings = Vec::new();

    for address in addresses {
        if address.attached_instance.is_some() {
            continue;
        }

        findings.push(CostFinding {
            resource_type: ResourceType::ElasticAddress,
            resource_id: address.allocation_id.clone(),
            current_cost: ELASTIC_IP_MONTHLY_USD,
            potential_savings: ELASTIC_IP_MONTHLY_USD,
            recommendation: format!(
                "Unassociated Elastic IP {}. Release if not needed.",
                address.public_ip.as_deref().unwrap_or("N/A")
            ),
            priority: Priority::High,
        });
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(allocation_id: &str, public_ip: Option<&str>, instance: Option<&str>) -> AddressRecord {
        AddressRecord {
            allocation_id: allocation_id.to_string(),
            public_ip: public_ip.map(str::to_string),
            attached_instance: instance.map(str::to_string),
        }
    }

    #[test]
    fn test_unassociated_address_is_flagged() {
        let addresses = vec![address("eipalloc-1", Some("198.51.100.7"), None)];

        let findings = analyze_addresses(&addresses);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].priority, Priority::High);
        assert_eq!(findings[0].current_cost, ELASTIC_IP_MONTHLY_USD);
        assert!(findings[0].recommendation.contains("198.51.100.7"));
    }

    #[test]
    fn test_attached_address_is_not_flagged() {
        let addresses = vec![address("eipalloc-2", Some("198.51.100.8"), Some("i-0abc"))];

        assert!(analyze_addresses(&addresses).is_empty());
    }

    #[test]
    fn test_missing_public_ip_renders_placeholder() {
        let addresses = vec![address("eipalloc-3", None, None)];

        let findings = analyze_addresses(&addresses);
        assert!(findings[0].recommendation.contains("N/A"));
    }
}
