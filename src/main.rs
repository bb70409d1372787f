//! Command-line interface for policy-seed
//!
//! ```bash
//! RUST_LOG=debug policy-seed \
//!   --contact-points cassandra:9042 \
//!   --keyspace primac_db \
//!   --on-batch-error retry --retry-attempts 5
//! ```

use clap::Parser;
use policy_seed::{ensure_complete, run_seed, SeedArgs};

#[derive(Parser)]
#[command(name = "policy-seed")]
#[command(about = "Seed a Cassandra keyspace with synthetic claims, payments and audit records")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    seed: SeedArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let report = run_seed(cli.seed).await?;
    ensure_complete(&report)?;
    println!("Bulk insert completed for all tables");
    Ok(())
}
