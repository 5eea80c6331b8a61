use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

use cloudops_advisor::{rules, CostCollector, CostReport};

/// Scan an AWS region for cost optimization opportunities.
#[derive(Parser)]
#[command(name = "aws-cost-optimizer", version, about)]
struct Args {
    /// AWS region to analyze
    #[arg(long, default_value = "us-east-1")]
    region: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    info!(region = %args.region, "starting cost optimization analysis");

    let collector = CostCollector::new(&args.region).await;
    let inventory = collector.collect_all().await;
    let findings = rules::evaluate_all(&inventory);

    let report = CostReport::new(args.region, findings);
    print!("{}", report.render());

    if !report.is_empty() {
        let path = report.write_snapshot(Path::new("."))?;
        println!();
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
