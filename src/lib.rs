// Public modules
pub mod aws;
pub mod checks;
pub mod cluster;
pub mod report;
pub mod rules;
pub mod types;

// Re-export commonly used items
pub use aws::{CostCollector, ResourceInventory};
pub use cluster::{ClusterCollector, QueryError};
pub use report::{CostReport, HealthReport, StatusCounts};
pub use types::*;
