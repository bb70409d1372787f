//! End-to-end seeding tests against the in-memory sink.
//!
//! These exercise the full generate -> batch -> submit path the CLI uses,
//! with small counts so they run without a Cassandra cluster.

use chrono::{TimeZone, Utc};
use policy_seed::{ensure_complete, run_with_sink};
use rust_decimal::Decimal;
use seed_generator::TimeWindow;
use seed_populate_cassandra::{PopulateError, Populator, RecordingSink, SinkError};
use seed_types::{
    AuditEntity, AuditOperation, AuditService, BatchFailurePolicy, Category, CategoryCounts,
    ClaimStatus, PaymentMethod, PaymentStatus, RecordBatch, SeedConfig, CLIENT_ID_RANGE,
    DESCRIPTION_MAX_CHARS, POLICY_ID_RANGE, REFERENCE_ID_RANGE, USER_ID_RANGE,
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

const SEED: u64 = 42;
const BATCH_SIZE: usize = 100;

fn config(claims: u64, payments: u64, audits: u64) -> SeedConfig {
    SeedConfig {
        counts: CategoryCounts {
            claims,
            payments,
            audits,
        },
        batch_size: BATCH_SIZE,
        ..SeedConfig::default()
    }
}

fn window() -> TimeWindow {
    TimeWindow::new(
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
    )
}

fn ids(batches: &[RecordBatch]) -> Vec<Uuid> {
    batches.iter().flat_map(|b| b.ids()).collect()
}

/// total=200, batch=100 for claims: exactly two submissions of 100 rows each.
#[tokio::test]
async fn test_two_batches_of_claims() {
    let sink = Arc::new(RecordingSink::new());
    let populator = Populator::new(sink.clone(), &config(200, 0, 0), SEED)
        .unwrap()
        .with_window(window());

    let report = populator.populate_all().await.unwrap();

    assert_eq!(sink.submissions(), 2);
    let batches = sink.batches_for(Category::Claims).await;
    assert_eq!(batches.len(), 2);
    for batch in &batches {
        assert_eq!(batch.len(), 100);
        let RecordBatch::Claims(rows) = batch else {
            panic!("expected claim batch, got {:?}", batch.category());
        };
        assert!(rows.iter().all(|r| CLIENT_ID_RANGE.contains(&r.client_id)));
    }
    assert_eq!(sink.row_count(Category::Claims).await, 200);
    assert_eq!(report.get(Category::Claims).unwrap().rows_inserted, 200);
    assert_eq!(report.get(Category::Claims).unwrap().batch_count, 2);
}

#[tokio::test]
async fn test_every_field_in_domain() {
    let sink = Arc::new(RecordingSink::new());
    let populator = Populator::new(sink.clone(), &config(1_200, 2_000, 2_000), SEED)
        .unwrap()
        .with_window(window());

    let report = populator.populate_all().await.unwrap();
    assert_eq!(report.total_rows(), 5_200);

    let window = window();
    for batch in sink.batches().await {
        match batch {
            RecordBatch::Claims(rows) => {
                for r in rows {
                    assert!(CLIENT_ID_RANGE.contains(&r.client_id));
                    assert!(POLICY_ID_RANGE.contains(&r.policy_id));
                    assert!(ClaimStatus::ALL.contains(&r.status));
                    assert!(r.amount >= Decimal::from(100) && r.amount <= Decimal::from(5_000));
                    assert!(r.description.len() <= DESCRIPTION_MAX_CHARS);
                    assert!(r.date >= window.start && r.date <= window.end);
                }
            }
            RecordBatch::Payments(rows) => {
                for r in rows {
                    assert!(CLIENT_ID_RANGE.contains(&r.client_id));
                    assert!(POLICY_ID_RANGE.contains(&r.policy_id));
                    assert!(PaymentMethod::ALL.contains(&r.method));
                    assert!(PaymentStatus::ALL.contains(&r.status));
                    assert!(r.amount >= Decimal::from(50) && r.amount <= Decimal::from(2_000));
                }
            }
            RecordBatch::Audits(rows) => {
                for r in rows {
                    assert!(AuditService::ALL.contains(&r.service));
                    assert!(AuditOperation::ALL.contains(&r.operation));
                    assert!(AuditEntity::ALL.contains(&r.entity));
                    let reference: i32 = r.reference_id.parse().unwrap();
                    assert!(REFERENCE_ID_RANGE.contains(&reference));
                    assert!(USER_ID_RANGE.contains(&r.user_id));
                }
            }
        }
    }
}

#[tokio::test]
async fn test_amounts_are_whole_exact_decimals() {
    let sink = Arc::new(RecordingSink::new());
    let populator = Populator::new(sink.clone(), &config(0, 500, 0), SEED).unwrap();
    populator.populate_all().await.unwrap();

    for batch in sink.batches().await {
        if let RecordBatch::Payments(rows) = batch {
            for r in rows {
                assert_eq!(r.amount.scale(), 2);
                assert!(r.amount.fract().is_zero(), "{} is not a whole amount", r.amount);
                // Round-tripping through the string form loses nothing.
                assert_eq!(r.amount.to_string().parse::<Decimal>().unwrap(), r.amount);
            }
        }
    }
}

#[tokio::test]
async fn test_ids_unique_per_category() {
    let sink = Arc::new(RecordingSink::new());
    let populator = Populator::new(sink.clone(), &config(2_000, 2_000, 2_000), SEED).unwrap();
    populator.populate_all().await.unwrap();

    for category in Category::ALL {
        let ids = ids(&sink.batches_for(category).await);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), 2_000);
        assert_eq!(unique.len(), ids.len(), "duplicate ids in {category}");
    }
}

#[tokio::test]
async fn test_non_divisible_total_gets_partial_batch() {
    let sink = Arc::new(RecordingSink::new());
    let populator = Populator::new(sink.clone(), &config(0, 0, 250), SEED).unwrap();

    let report = populator.populate_all().await.unwrap();

    let sizes: Vec<usize> = sink.batches().await.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(report.get(Category::Audits).unwrap().rows_inserted, 250);
}

/// A rejected batch stops the category and the run; nothing after it is attempted.
#[tokio::test]
async fn test_abort_on_rejected_batch() {
    let sink = Arc::new(RecordingSink::new().failing_on([1]));
    let populator = Populator::new(sink.clone(), &config(500, 500, 500), SEED).unwrap();

    let err = populator.populate_all().await.unwrap_err();

    match err {
        PopulateError::Batch {
            category,
            batch_index,
            attempts,
            source: SinkError::Rejected(_),
        } => {
            assert_eq!(category, Category::Claims);
            assert_eq!(batch_index, 1);
            assert_eq!(attempts, 1);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(sink.submissions(), 2);
    assert_eq!(sink.row_count(Category::Claims).await, 100);
    assert!(sink.batches_for(Category::Payments).await.is_empty());
    assert!(sink.batches_for(Category::Audits).await.is_empty());
}

#[tokio::test]
async fn test_abort_surfaces_through_runner() {
    let sink = Arc::new(RecordingSink::new().failing_on([0]));

    let err = run_with_sink(sink, &config(100, 0, 0), SEED)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("Seeding failed"));
    assert!(err.downcast_ref::<PopulateError>().is_some());
}

#[tokio::test]
async fn test_retry_resubmits_same_batch() {
    let sink = Arc::new(RecordingSink::new().failing_on([0, 1]));
    let seed_config = SeedConfig {
        on_batch_error: BatchFailurePolicy::Retry {
            max_attempts: 3,
            backoff_ms: 0,
        },
        ..config(300, 0, 0)
    };
    let populator = Populator::new(sink.clone(), &seed_config, SEED).unwrap();

    let report = populator.populate_all().await.unwrap();
    let claims = report.get(Category::Claims).unwrap();

    assert_eq!(claims.rows_inserted, 300);
    assert_eq!(claims.retries, 2);
    assert_eq!(sink.submissions(), 5);

    // Same rows as an undisturbed run.
    let clean = Arc::new(RecordingSink::new());
    Populator::new(clean.clone(), &seed_config, SEED)
        .unwrap()
        .populate_all()
        .await
        .unwrap();
    assert_eq!(ids(&sink.batches().await), ids(&clean.batches().await));
}

#[tokio::test]
async fn test_retry_gives_up_after_max_attempts() {
    let sink = Arc::new(RecordingSink::new().failing_on([0, 1, 2]));
    let seed_config = SeedConfig {
        on_batch_error: BatchFailurePolicy::Retry {
            max_attempts: 3,
            backoff_ms: 0,
        },
        ..config(300, 0, 0)
    };
    let populator = Populator::new(sink.clone(), &seed_config, SEED).unwrap();

    let err = populator.populate_all().await.unwrap_err();

    assert!(matches!(err, PopulateError::Batch { attempts: 3, .. }));
    assert_eq!(sink.submissions(), 3);
}

#[tokio::test]
async fn test_skip_continues_after_failure() {
    let sink = Arc::new(RecordingSink::new().failing_on([1]));
    let seed_config = SeedConfig {
        on_batch_error: BatchFailurePolicy::Skip,
        ..config(300, 200, 0)
    };
    let populator = Populator::new(sink.clone(), &seed_config, SEED).unwrap();

    let report = populator.populate_all().await.unwrap();
    let claims = report.get(Category::Claims).unwrap();

    assert_eq!(claims.rows_inserted, 200);
    assert_eq!(claims.failed_batches, 1);
    assert_eq!(claims.rows_skipped, 100);
    assert_eq!(report.failed_batches(), 1);
    assert_eq!(sink.row_count(Category::Payments).await, 200);
}

/// A run that skipped batches is not reported as a completed bulk insert.
#[tokio::test]
async fn test_skipped_batches_fail_completion_check() {
    let sink = Arc::new(RecordingSink::new().failing_on([0, 1, 2]));
    let seed_config = SeedConfig {
        on_batch_error: BatchFailurePolicy::Skip,
        ..config(300, 0, 0)
    };

    let report = run_with_sink(sink, &seed_config, SEED).await.unwrap();
    assert_eq!(report.total_rows(), 0);

    let err = ensure_complete(&report).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("3 batches failed"), "{message}");
    assert!(message.contains("300 rows skipped"), "{message}");

    let clean = run_with_sink(Arc::new(RecordingSink::new()), &seed_config, SEED)
        .await
        .unwrap();
    assert!(ensure_complete(&clean).is_ok());
}

#[tokio::test]
async fn test_same_seed_same_rows() {
    let first = Arc::new(RecordingSink::new());
    let second = Arc::new(RecordingSink::new());

    for sink in [&first, &second] {
        Populator::new(sink.clone(), &config(150, 150, 150), SEED)
            .unwrap()
            .with_window(window())
            .populate_all()
            .await
            .unwrap();
    }

    assert_eq!(first.batches().await, second.batches().await);
}

#[tokio::test]
async fn test_concurrent_matches_sequential() {
    let sequential = Arc::new(RecordingSink::new());
    let concurrent = Arc::new(RecordingSink::new());

    Populator::new(sequential.clone(), &config(300, 300, 300), SEED)
        .unwrap()
        .with_window(window())
        .populate_all()
        .await
        .unwrap();

    let concurrent_config = SeedConfig {
        concurrent: true,
        ..config(300, 300, 300)
    };
    let report = Populator::new(concurrent.clone(), &concurrent_config, SEED)
        .unwrap()
        .with_window(window())
        .populate_all()
        .await
        .unwrap();

    assert_eq!(report.total_rows(), 900);
    for category in Category::ALL {
        assert_eq!(
            sequential.batches_for(category).await,
            concurrent.batches_for(category).await
        );
    }
}

/// Unseeded runs are not idempotent: each run appends a fresh, disjoint set of rows.
#[tokio::test]
async fn test_unseeded_runs_are_disjoint() {
    let first = Arc::new(RecordingSink::new());
    let second = Arc::new(RecordingSink::new());

    run_with_sink(first.clone(), &config(500, 0, 0), rand::random())
        .await
        .unwrap();
    run_with_sink(second.clone(), &config(500, 0, 0), rand::random())
        .await
        .unwrap();

    let first_ids: HashSet<Uuid> = ids(&first.batches().await).into_iter().collect();
    let second_ids: HashSet<Uuid> = ids(&second.batches().await).into_iter().collect();

    assert_eq!(first_ids.len(), 500);
    assert_eq!(second_ids.len(), 500);
    assert!(first_ids.is_disjoint(&second_ids));
}
