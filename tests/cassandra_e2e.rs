//! Cassandra end-to-end test.
//!
//! Requires a running cluster; run with
//! `CASSANDRA_CONTACT_POINTS=127.0.0.1:9042 cargo test --test cassandra_e2e -- --ignored`.

use scylla::client::session_builder::SessionBuilder;
use seed_populate_cassandra::{CassandraSink, Populator};
use seed_types::{Category, CategoryCounts, SeedConfig};
use std::sync::Arc;

const SEED: u64 = 42;

fn contact_points() -> Vec<String> {
    std::env::var("CASSANDRA_CONTACT_POINTS")
        .unwrap_or_else(|_| "127.0.0.1:9042".to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .collect()
}

#[tokio::test]
#[ignore = "requires a running Cassandra cluster"]
async fn test_seed_small_keyspace() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("policy_seed=info,seed_populate_cassandra=info")
        .try_init()
        .ok();

    let keyspace = format!("seed_test_{}", uuid::Uuid::new_v4().simple());
    let config = SeedConfig {
        contact_points: contact_points(),
        keyspace: keyspace.clone(),
        counts: CategoryCounts {
            claims: 200,
            payments: 150,
            audits: 100,
        },
        batch_size: 100,
        create_schema: true,
        ..SeedConfig::default()
    };

    let sink = Arc::new(CassandraSink::connect(&config).await?);
    let report = Populator::new(sink.clone(), &config, SEED)?
        .populate_all()
        .await?;
    assert_eq!(report.total_rows(), 450);

    let session = SessionBuilder::new()
        .known_nodes(&config.contact_points)
        .use_keyspace(&keyspace, false)
        .build()
        .await?;

    for category in Category::ALL {
        let (count,): (i64,) = session
            .query_unpaged(
                format!("SELECT COUNT(*) FROM {}", category.table_name()),
                (),
            )
            .await?
            .into_rows_result()?
            .single_row()?;
        assert_eq!(count as u64, config.counts.get(category), "{category}");
    }

    // Cleanup
    session
        .query_unpaged(format!("DROP KEYSPACE {keyspace}"), ())
        .await?;

    Ok(())
}
