use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use crate::types::{CheckResult, HealthStatus};

/// Ordered results of one health-check run plus the derived summary.
pub struct HealthReport {
    pub generated_at: DateTime<Utc>,
    pub namespace: String,
    results: Vec<CheckResult>,
}

/// Per-status tallies across the run's results.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn tally(results: &[CheckResult]) -> Self {
        let mut counts = StatusCounts::default();
        for result in results {
            match result.status {
                HealthStatus::Healthy => counts.healthy += 1,
                HealthStatus::Warning => counts.warning += 1,
                HealthStatus::Critical => counts.critical += 1,
                HealthStatus::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}

impl HealthReport {
    /// Results keep their check-execution order; nothing is re-sorted.
    pub fn new(namespace: impl Into<String>, results: Vec<CheckResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            namespace: namespace.into(),
            results,
        }
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.results)
    }

    /// 2 if anything is Critical, else 1 if anything is Warning, else 0.
    /// Unknown results never raise the code on their own.
    pub fn exit_code(&self) -> i32 {
        let counts = self.counts();
        if counts.critical > 0 {
            2
        } else if counts.warning > 0 {
            1
        } else {
            0
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);

        writeln!(out, "{}", rule).ok();
        writeln!(
            out,
            "Kubernetes Health Check - {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )
        .ok();
        writeln!(out, "Namespace: {}", self.namespace).ok();
        writeln!(out, "{}", rule).ok();
        writeln!(out).ok();

        for result in &self.results {
            writeln!(
                out,
                "{:<15} | {:<20} | {}",
                result.status.label(),
                result.name,
                result.message
            )
            .ok();
            if let Some(details) = &result.details {
                let rendered: Vec<String> =
                    details.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                writeln!(out, "{:<15} | {:<20} | Details: {}", "", "", rendered.join(", ")).ok();
            }
            writeln!(out).ok();
        }

        let counts = self.counts();
        writeln!(out, "{}", rule).ok();
        writeln!(out, "SUMMARY").ok();
        writeln!(out, "{}", rule).ok();
        writeln!(out, "Total Checks: {}", self.results.len()).ok();
        writeln!(out, "Healthy: {}", counts.healthy).ok();
        writeln!(out, "Warnings: {}", counts.warning).ok();
        writeln!(out, "Critical: {}", counts.critical).ok();
        writeln!(out, "Unknown: {}", counts.unknown).ok();

        out
    }
}
