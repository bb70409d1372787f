//! In-memory sinks for dry runs and tests.

use crate::error::SinkError;
use crate::sink::BatchSink;
use async_trait::async_trait;
use seed_types::{Category, RecordBatch};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Sink that keeps every accepted batch in memory.
///
/// Submissions are numbered from zero in call order (across all
/// categories); the ones listed with [`failing_on`](RecordingSink::failing_on)
/// are rejected and not stored.
#[derive(Default)]
pub struct RecordingSink {
    batches: Mutex<Vec<RecordBatch>>,
    fail_on: HashSet<u64>,
    submissions: AtomicU64,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the submissions with these call numbers.
    pub fn failing_on(mut self, submissions: impl IntoIterator<Item = u64>) -> Self {
        self.fail_on.extend(submissions);
        self
    }

    /// Number of `submit` calls so far, including rejected ones.
    pub fn submissions(&self) -> u64 {
        self.submissions.load(Ordering::SeqCst)
    }

    /// Accepted batches, in acceptance order.
    pub async fn batches(&self) -> Vec<RecordBatch> {
        self.batches.lock().await.clone()
    }

    /// Accepted batches of one category.
    pub async fn batches_for(&self, category: Category) -> Vec<RecordBatch> {
        self.batches
            .lock()
            .await
            .iter()
            .filter(|b| b.category() == category)
            .cloned()
            .collect()
    }

    /// Total accepted rows of one category.
    pub async fn row_count(&self, category: Category) -> u64 {
        self.batches
            .lock()
            .await
            .iter()
            .filter(|b| b.category() == category)
            .map(|b| b.len() as u64)
            .sum()
    }
}

#[async_trait]
impl BatchSink for RecordingSink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn submit(&self, batch: &RecordBatch) -> Result<(), SinkError> {
        let call = self.submissions.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&call) {
            return Err(SinkError::Rejected(format!(
                "submission {call} rejected ({} rows for '{}')",
                batch.len(),
                batch.category()
            )));
        }

        self.batches.lock().await.push(batch.clone());
        Ok(())
    }
}

/// Sink that only counts what it is given.
#[derive(Debug, Default)]
pub struct DryRunSink {
    rows: AtomicU64,
    batches: AtomicU64,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> u64 {
        self.rows.load(Ordering::SeqCst)
    }

    pub fn batches(&self) -> u64 {
        self.batches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BatchSink for DryRunSink {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn submit(&self, batch: &RecordBatch) -> Result<(), SinkError> {
        self.rows.fetch_add(batch.len() as u64, Ordering::SeqCst);
        self.batches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
