use chrono::{Duration, Utc};

use crate::rules::pricing::{SNAPSHOT_GB_MONTHLY_USD, STALE_SNAPSHOT_DAYS, VOLUME_GB_MONTHLY_USD};
use crate::types::{CostFinding, Priority, ResourceType, SnapshotRecord, UnattachedVolume};

/// Every volume in the listing is already known to be unattached; each one
/// becomes a medium-priority finding worth its full monthly storage cost.
pub fn analyze_volumes(volumes: &[UnattachedVolume]) -> Vec<CostFinding> {
    volumes
        .iter()
        .map(|volume| {
            let monthly_cost = volume.size_gb as f64 * VOLUME_GB_MONTHLY_USD;
            CostFinding {
                resource_type: ResourceType::BlockVolume,
                resource_id: volume.id.clone(),
                current_cost: monthly_cost,
                potential_savings: monthly_cost,
                recommendation: format!(
                    "Unattached {}GB volume. Delete if not needed.",
                    volume.size_gb
                ),
                priority: Priority::Medium,
            }
        })
        .collect()
}

/// Flag snapshots older than the retention cutoff.
pub fn analyze_snapshots(snapshots: &[SnapshotRecord]) -> Vec<CostFinding> {
    let cutoff = Utc::now() - Duration::days(STALE_SNAPSHOT_DAYS);
    let mut findings = Vec::new();

    for snapshot in snapshots {
        if snapshot.created_at < cutoff {
            let monthly_cost = snapshot.size_gb as f64 * SNAPSHOT_GB_MONTHLY_USD;
            findings.push(CostFinding {
                resource_type: ResourceType::Snapshot,
                resource_id: snapshot.id.clone(),
                current_cost: monthly_cost,
                potential_savings: monthly_cost,
                recommendation: format!(
                    "Snapshot older than {} days. Review retention policy.",
                    STALE_SNAPSHOT_DAYS
                ),
                priority: Priority::Low,
            });
        }
    }

    findings
}
