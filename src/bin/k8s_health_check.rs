use clap::Parser;
use tracing::{info, warn};

use cloudops_advisor::{checks, ClusterCollector, HealthReport};

/// Run read-only health checks against a Kubernetes cluster.
#[derive(Parser)]
#[command(name = "k8s-health-check", version, about)]
struct Args {
    /// Kubernetes namespace to check
    #[arg(short, long, default_value = "default")]
    namespace: String,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();
    info!(namespace = %args.namespace, "starting cluster health check");

    let results = match ClusterCollector::connect().await {
        Ok(collector) => checks::run_all(&collector, &args.namespace).await,
        Err(err) => {
            warn!(error = %err, "could not build cluster client");
            checks::degraded_results(&args.namespace)
        }
    };

    let report = HealthReport::new(args.namespace, results);
    print!("{}", report.render());

    std::process::exit(report.exit_code());
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
