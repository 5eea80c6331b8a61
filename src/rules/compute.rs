use crate::rules::pricing::{monthly_instance_cost, COMPUTE_SAVINGS_FACTOR, CPU_IDLE_THRESHOLD_PCT};
use crate::types::{ComputeInstance, CostFinding, Priority, ResourceType};

/// Flag running instances whose trailing 7-day average CPU sits below the
/// idle threshold. Instances without utilization datapoints are skipped:
/// no data is not evidence of idleness.
pub fn analyze_instances(instances: &[ComputeInstance]) -> Vec<CostFinding> {
    let mut findings = Vec::new();

    for instance in instances {
        let avg_cpu = match instance.avg_cpu {
            Some(v) => v,
            None => continue,
        };

        if avg_cpu < CPU_IDLE_THRESHOLD_PCT {
            let monthly_cost = monthly_instance_cost(&instance.instance_type);
            findings.push(CostFinding {
                resource_type: ResourceType::Compute,
                resource_id: instance.id.clone(),
                current_cost: monthly_cost,
                potential_savings: monthly_cost * COMPUTE_SAVINGS_FACTOR,
                recommendation: format!(
                    "Instance {} has {:.1}% CPU utilization. Consider stopping or downsizing.",
                    instance.id, avg_cpu
                ),
                priority: Priority::High,
            });
        }
    }

    findings
}
