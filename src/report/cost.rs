use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::types::{CostFinding, Priority};

/// Aggregated cost-optimization report for one region scan. Findings are
/// held sorted by potential savings, largest first.
pub struct CostReport {
    pub generated_at: DateTime<Utc>,
    pub region: String,
    findings: Vec<CostFinding>,
}

/// Persisted snapshot schema; field names are part of the report contract.
#[derive(Serialize)]
struct ReportSnapshot<'a> {
    generated_at: DateTime<Utc>,
    region: &'a str,
    total_potential_savings: f64,
    recommendations: &'a [CostFinding],
}

impl CostReport {
    pub fn new(region: impl Into<String>, mut findings: Vec<CostFinding>) -> Self {
        findings.sort_by(|a, b| {
            b.potential_savings
                .partial_cmp(&a.potential_savings)
                .unwrap_or(Ordering::Equal)
        });

        Self {
            generated_at: Utc::now(),
            region: region.into(),
            findings,
        }
    }

    pub fn findings(&self) -> &[CostFinding] {
        &self.findings
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Exact sum of potential savings across all findings.
    pub fn total_savings(&self) -> f64 {
        self.findings.iter().map(|f| f.potential_savings).sum()
    }

    /// Console rendering: banner, total, then findings grouped by priority
    /// in fixed High -> Medium -> Low order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(70);

        writeln!(out, "{}", rule).ok();
        writeln!(out, "AWS COST OPTIMIZATION REPORT").ok();
        writeln!(out, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S")).ok();
        writeln!(out, "Region: {}", self.region).ok();
        writeln!(out, "{}", rule).ok();
        writeln!(out).ok();

        if self.findings.is_empty() {
            writeln!(out, "No cost optimization opportunities found.").ok();
            return out;
        }

        writeln!(
            out,
            "Total Potential Monthly Savings: ${:.2}",
            self.total_savings()
        )
        .ok();

        for priority in Priority::REPORT_ORDER {
            let group: Vec<&CostFinding> =
                self.findings.iter().filter(|f| f.priority == priority).collect();
            if group.is_empty() {
                continue;
            }

            writeln!(out).ok();
            writeln!(out, "{} PRIORITY ({} items)", priority, group.len()).ok();
            writeln!(out, "{}", "-".repeat(70)).ok();

            for finding in group {
                writeln!(out).ok();
                writeln!(out, "{}: {}", finding.resource_type, finding.resource_id).ok();
                writeln!(out, "  Current Cost: ${:.2}/month", finding.current_cost).ok();
                writeln!(
                    out,
                    "  Potential Savings: ${:.2}/month",
                    finding.potential_savings
                )
                .ok();
                writeln!(out, "  Recommendation: {}", finding.recommendation).ok();
            }
        }

        out
    }

    /// File name carries the generation date: `cost-optimization-report-YYYYMMDD.json`.
    pub fn file_name(&self) -> String {
        format!(
            "cost-optimization-report-{}.json",
            self.generated_at.format("%Y%m%d")
        )
    }

    /// Write the JSON snapshot into `dir` and return its path. Callers skip
    /// this when the report is empty.
    pub fn write_snapshot(&self, dir: &Path) -> Result<PathBuf> {
        let snapshot = ReportSnapshot {
            generated_at: self.generated_at,
            region: &self.region,
            total_potential_savings: self.total_savings(),
            recommendations: &self.findings,
        };

        let path = dir.join(self.file_name());
        let body = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&path, body)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(path)
    }
}
