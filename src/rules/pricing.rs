//! Static price book for the cost rules. Simplified on-demand estimates;
//! a production deployment would pull these from the Price List API.

/// Average CPU below this flags an instance as underutilized.
pub const CPU_IDLE_THRESHOLD_PCT: f64 = 10.0;

/// Fraction of the instance cost recoverable by stopping or downsizing.
pub const COMPUTE_SAVINGS_FACTOR: f64 = 0.8;

/// Approximate gp2/gp3 storage cost per GB-month.
pub const VOLUME_GB_MONTHLY_USD: f64 = 0.10;

/// Approximate snapshot storage cost per GB-month.
pub const SNAPSHOT_GB_MONTHLY_USD: f64 = 0.05;

/// Snapshots older than this are considered stale.
pub const STALE_SNAPSHOT_DAYS: i64 = 90;

/// $0.005/hour * 720 hours for an idle Elastic IP.
pub const ELASTIC_IP_MONTHLY_USD: f64 = 3.60;

/// Monthly cost fallback for instance types missing from the table.
pub const DEFAULT_INSTANCE_MONTHLY_USD: f64 = 50.00;

/// Estimated monthly on-demand cost for an instance type.
pub fn monthly_instance_cost(instance_type: &str) -> f64 {
    match instance_type {
        "t2.micro" => 8.50,
        "t2.small" => 17.00,
        "t2.medium" => 34.00,
        "t3.micro" => 7.50,
        "t3.small" => 15.00,
        "t3.medium" => 30.00,
        "m5.large" => 70.00,
        "m5.xlarge" => 140.00,
        _ => DEFAULT_INSTANCE_MONTHLY_USD,
    }
}
