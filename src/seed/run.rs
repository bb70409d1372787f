//! Seed command runner.

use anyhow::Context;
use seed_populate_cassandra::{BatchSink, CassandraSink, DryRunSink, Populator, RunReport};
use seed_types::SeedConfig;
use std::sync::Arc;

use super::SeedArgs;

/// Build the effective configuration: defaults, then `--config`, then flags.
pub fn load_config(args: &SeedArgs) -> anyhow::Result<SeedConfig> {
    let base = match &args.config {
        Some(path) => SeedConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}"))?,
        None => SeedConfig::default(),
    };

    let config = args.apply(base);
    config.validate().context("Invalid seeding configuration")?;
    Ok(config)
}

/// Run the seed command to fill the keyspace with synthetic rows.
pub async fn run_seed(args: SeedArgs) -> anyhow::Result<RunReport> {
    let config = load_config(&args)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    if config.seed.is_none() {
        tracing::info!(
            "No seed given, using random seed {} (pass --seed {} to reproduce)",
            seed,
            seed
        );
    }

    let sink: Arc<dyn BatchSink> = if args.dry_run {
        tracing::info!(
            "[DRY-RUN] Would seed keyspace '{}' at {:?}",
            config.keyspace,
            config.contact_points
        );
        Arc::new(DryRunSink::new())
    } else {
        Arc::new(
            CassandraSink::connect(&config)
                .await
                .context("Failed to connect to Cassandra")?,
        )
    };

    run_with_sink(sink, &config, seed).await
}

/// Seed every category through an already constructed sink.
pub async fn run_with_sink(
    sink: Arc<dyn BatchSink>,
    config: &SeedConfig,
    seed: u64,
) -> anyhow::Result<RunReport> {
    let populator = Populator::new(sink, config, seed)?;
    let report = populator.populate_all().await.context("Seeding failed")?;

    for metrics in &report.categories {
        tracing::info!(
            "{}: {} rows in {} batches ({:.2} rows/sec, {} retries, {} skipped batches)",
            metrics.category.table_name(),
            metrics.rows_inserted,
            metrics.batch_count,
            metrics.rows_per_second(),
            metrics.retries,
            metrics.failed_batches
        );
    }
    tracing::info!(
        "Inserted {} rows in {:?} (seed={})",
        report.total_rows(),
        report.total_duration,
        report.seed
    );

    Ok(report)
}

/// Fail a run that skipped batches under [`BatchFailurePolicy::Skip`].
///
/// [`BatchFailurePolicy::Skip`]: seed_types::BatchFailurePolicy::Skip
pub fn ensure_complete(report: &RunReport) -> anyhow::Result<()> {
    let failed = report.failed_batches();
    if failed > 0 {
        let skipped: u64 = report.categories.iter().map(|m| m.rows_skipped).sum();
        anyhow::bail!(
            "Bulk insert incomplete: {failed} batches failed, {skipped} rows skipped ({} rows inserted, seed={})",
            report.total_rows(),
            report.seed
        );
    }
    Ok(())
}
