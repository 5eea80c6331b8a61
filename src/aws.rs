use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudwatch::primitives::DateTime as CwDateTime;
use aws_sdk_cloudwatch::types::{Dimension, Statistic};
use aws_sdk_ec2::types::Filter;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::types::{AddressRecord, ComputeInstance, SnapshotRecord, UnattachedVolume};

/// How far back the CPU utilization sample reaches.
const CPU_LOOKBACK_DAYS: i64 = 7;
/// CloudWatch sample granularity in seconds (hourly).
const CPU_SAMPLE_PERIOD_SECS: i32 = 3600;

/// Typed wrapper around the EC2 and CloudWatch query APIs for one region.
/// Each listing is attempted exactly once; no retries.
pub struct CostCollector {
    ec2: aws_sdk_ec2::Client,
    cloudwatch: aws_sdk_cloudwatch::Client,
}

/// Raw listings gathered for one analysis run. A listing that could not be
/// retrieved is present but empty.
#[derive(Debug, Default)]
pub struct ResourceInventory {
    pub instances: Vec<ComputeInstance>,
    pub volumes: Vec<UnattachedVolume>,
    pub snapshots: Vec<SnapshotRecord>,
    pub addresses: Vec<AddressRecord>,
}

impl CostCollector {
    pub async fn new(region: &str) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            ec2: aws_sdk_ec2::Client::new(&shared),
            cloudwatch: aws_sdk_cloudwatch::Client::new(&shared),
        }
    }

    /// Run all four listings sequentially. A failed listing degrades to an
    /// empty one for that source only and never aborts the run.
    pub async fn collect_all(&self) -> ResourceInventory {
        info!("checking for underutilized EC2 instances");
        let instances = self.running_instances().await.unwrap_or_else(|err| {
            warn!(error = %err, "instance listing failed, skipping compute checks");
            Vec::new()
        });

        info!("checking for unattached EBS volumes");
        let volumes = self.available_volumes().await.unwrap_or_else(|err| {
            warn!(error = %err, "volume listing failed, skipping volume checks");
            Vec::new()
        });

        info!("checking for old EBS snapshots");
        let snapshots = self.owned_snapshots().await.unwrap_or_else(|err| {
            warn!(error = %err, "snapshot listing failed, skipping snapshot checks");
            Vec::new()
        });

        info!("checking for unassociated Elastic IPs");
        let addresses = self.allocated_addresses().await.unwrap_or_else(|err| {
            warn!(error = %err, "address listing failed, skipping address checks");
            Vec::new()
        });

        ResourceInventory {
            instances,
            volumes,
            snapshots,
            addresses,
        }
    }

    /// List running instances, each annotated with its trailing 7-day average
    /// CPU utilization. Instances with no datapoints carry `avg_cpu = None`.
    pub async fn running_instances(&self) -> Result<Vec<ComputeInstance>> {
        let resp = self
            .ec2
            .describe_instances()
            .filters(
                Filter::builder()
                    .name("instance-state-name")
                    .values("running")
                    .build(),
            )
            .send()
            .await?;

        let mut instances = Vec::new();
        for reservation in resp.reservations() {
            for instance in reservation.instances() {
                let id = match instance.instance_id() {
                    Some(id) => id.to_string(),
                    None => continue,
                };
                let instance_type = instance
                    .instance_type()
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_default();

                // One CloudWatch failure degrades only this instance.
                let avg_cpu = match self.average_cpu(&id).await {
                    Ok(avg) => avg,
                    Err(err) => {
                        warn!(instance = %id, error = %err, "CPU metric query failed, treating as no data");
                        None
                    }
                };

                instances.push(ComputeInstance {
                    id,
                    instance_type,
                    avg_cpu,
                });
            }
        }

        Ok(instances)
    }

    /// Average of the hourly CPUUtilization datapoints over the lookback
    /// window, or `None` when CloudWatch returned none.
    async fn average_cpu(&self, instance_id: &str) -> Result<Option<f64>> {
        let end = Utc::now();
        let start = end - Duration::days(CPU_LOOKBACK_DAYS);

        let resp = self
            .cloudwatch
            .get_metric_statistics()
            .namespace("AWS/EC2")
            .metric_name("CPUUtilization")
            .dimensions(
                Dimension::builder()
                    .name("InstanceId")
                    .value(instance_id)
                    .build(),
            )
            .start_time(CwDateTime::from_millis(start.timestamp_millis()))
            .end_time(CwDateTime::from_millis(end.timestamp_millis()))
            .period(CPU_SAMPLE_PERIOD_SECS)
            .statistics(Statistic::Average)
            .send()
            .await?;

        let datapoints = resp.datapoints();
        if datapoints.is_empty() {
            return Ok(None);
        }

        let mut sum = 0.0;
        let mut count = 0usize;
        for point in datapoints {
            if let Some(avg) = point.average() {
                sum += avg;
                count += 1;
            }
        }

        if count == 0 {
            return Ok(None);
        }
        Ok(Some(sum / count as f64))
    }

    /// List EBS volumes in the `available` state.
    pub async fn available_volumes(&self) -> Result<Vec<UnattachedVolume>> {
        let resp = self
            .ec2
            .describe_volumes()
            .filters(Filter::builder().name("status").values("available").build())
            .send()
            .await?;

        let volumes = resp
            .volumes()
            .iter()
            .filter_map(|volume| {
                let id = volume.volume_id()?.to_string();
                Some(UnattachedVolume {
                    id,
                    size_gb: i64::from(volume.size().unwrap_or(0)),
                })
            })
            .collect();

        Ok(volumes)
    }

    /// List snapshots owned by the calling account. Snapshots without a
    /// usable creation timestamp are dropped rather than flagged.
    pub async fn owned_snapshots(&self) -> Result<Vec<SnapshotRecord>> {
        let resp = self.ec2.describe_snapshots().owner_ids("self").send().await?;

        let snapshots = resp
            .snapshots()
            .iter()
            .filter_map(|snapshot| {
                let id = snapshot.snapshot_id()?.to_string();
                let created_at = snapshot
                    .start_time()
                    .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()))?;
                Some(SnapshotRecord {
                    id,
                    size_gb: i64::from(snapshot.volume_size().unwrap_or(0)),
                    created_at,
                })
            })
            .collect();

        Ok(snapshots)
    }

    /// List every allocated Elastic IP in the region.
    pub async fn allocated_addresses(&self) -> Result<Vec<AddressRecord>> {
        let resp = self.ec2.describe_addresses().send().await?;

        let addresses = resp
            .addresses()
            .iter()
            .map(|address| AddressRecord {
                allocation_id: address
                    .allocation_id()
                    .unwrap_or("N/A")
                    .to_string(),
                public_ip: address.public_ip().map(str::to_string),
                attached_instance: address.instance_id().map(str::to_string),
            })
            .collect();

        Ok(addresses)
    }
}
