// Reporters: aggregation, formatting and exit-signal derivation per domain.
pub mod cost;
pub mod health;

pub use cost::CostReport;
pub use health::{HealthReport, StatusCounts};
