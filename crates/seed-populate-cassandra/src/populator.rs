//! Batched populate loop shared by every sink.

use crate::error::{PopulateError, SinkError};
use crate::sink::BatchSink;
use chrono::Utc;
use seed_generator::{RecordGenerator, TimeWindow};
use seed_types::{BatchFailurePolicy, Category, CategoryCounts, RecordBatch, SeedConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Number of progress lines logged at `info` per category.
const PROGRESS_STEPS: u64 = 10;

/// Metrics from a populate operation.
#[derive(Debug, Clone)]
pub struct PopulateMetrics {
    pub category: Category,
    /// Number of rows acknowledged by the sink.
    pub rows_inserted: u64,
    /// Number of batches submitted (retries not counted).
    pub batch_count: u64,
    /// Batches given up on under the skip policy.
    pub failed_batches: u64,
    /// Rows lost in skipped batches.
    pub rows_skipped: u64,
    /// Extra submissions made under the retry policy.
    pub retries: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent inserting data.
    pub insert_duration: Duration,
}

impl PopulateMetrics {
    fn new(category: Category) -> Self {
        Self {
            category,
            rows_inserted: 0,
            batch_count: 0,
            failed_batches: 0,
            rows_skipped: 0,
            retries: 0,
            total_duration: Duration::ZERO,
            generation_duration: Duration::ZERO,
            insert_duration: Duration::ZERO,
        }
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Outcome of seeding all three categories.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Base seed the run used; feed it back to reproduce the same rows.
    pub seed: u64,
    /// Per-category metrics in seeding order.
    pub categories: Vec<PopulateMetrics>,
    pub total_duration: Duration,
}

impl RunReport {
    pub fn get(&self, category: Category) -> Option<&PopulateMetrics> {
        self.categories.iter().find(|m| m.category == category)
    }

    pub fn total_rows(&self) -> u64 {
        self.categories.iter().map(|m| m.rows_inserted).sum()
    }

    pub fn failed_batches(&self) -> u64 {
        self.categories.iter().map(|m| m.failed_batches).sum()
    }
}

/// Generates rows and writes them through a [`BatchSink`] in fixed-size batches.
pub struct Populator {
    sink: Arc<dyn BatchSink>,
    counts: CategoryCounts,
    batch_size: usize,
    policy: BatchFailurePolicy,
    batch_timeout: Option<Duration>,
    concurrent: bool,
    seed: u64,
    window: TimeWindow,
}

impl Populator {
    /// Create a populator for `config`, generating from base seed `seed`.
    ///
    /// Dates are drawn from the current decade; override with
    /// [`with_window`](Populator::with_window).
    pub fn new(
        sink: Arc<dyn BatchSink>,
        config: &SeedConfig,
        seed: u64,
    ) -> Result<Self, PopulateError> {
        config.validate()?;

        Ok(Self {
            sink,
            counts: config.counts,
            batch_size: config.batch_size,
            policy: config.on_batch_error,
            batch_timeout: config.batch_timeout(),
            concurrent: config.concurrent,
            seed,
            window: TimeWindow::this_decade(Utc::now()),
        })
    }

    /// Set the window generated dates fall into.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed every category, sequentially (claims, payments, audits) or concurrently.
    ///
    /// The first category error is returned; under concurrent mode the other
    /// categories are dropped at their next await point.
    pub async fn populate_all(&self) -> Result<RunReport, PopulateError> {
        let start_time = Instant::now();

        info!(
            "Seeding {} rows via {} sink (seed={}, batch size={}, concurrent={})",
            self.counts.total(),
            self.sink.name(),
            self.seed,
            self.batch_size,
            self.concurrent
        );

        let categories = if self.concurrent {
            let (claims, payments, audits) = tokio::try_join!(
                self.populate_category(Category::Claims),
                self.populate_category(Category::Payments),
                self.populate_category(Category::Audits),
            )?;
            vec![claims, payments, audits]
        } else {
            let mut categories = Vec::with_capacity(Category::ALL.len());
            for category in Category::ALL {
                categories.push(self.populate_category(category).await?);
            }
            categories
        };

        Ok(RunReport {
            seed: self.seed,
            categories,
            total_duration: start_time.elapsed(),
        })
    }

    /// Seed one category with its configured count and its own derived generator.
    pub async fn populate_category(
        &self,
        category: Category,
    ) -> Result<PopulateMetrics, PopulateError> {
        let mut generator = RecordGenerator::for_category(self.seed, category, self.window);
        self.populate(category, self.counts.get(category), &mut generator)
            .await
    }

    /// Generate and submit exactly `count` rows of `category`.
    ///
    /// Every batch holds `batch_size` rows except the last, which holds the
    /// remainder when `count` is not a multiple of the batch size.
    pub async fn populate(
        &self,
        category: Category,
        count: u64,
        generator: &mut RecordGenerator,
    ) -> Result<PopulateMetrics, PopulateError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::new(category);

        let total_batches = count.div_ceil(self.batch_size as u64);
        let progress_every = (total_batches / PROGRESS_STEPS).max(1);

        info!(
            "Populating table '{}' with {} rows (batch size: {}, {} batches)",
            category.table_name(),
            count,
            self.batch_size,
            total_batches
        );

        let mut remaining = count;
        let mut batch_index = 0u64;

        while remaining > 0 {
            let batch_rows = std::cmp::min(remaining, self.batch_size as u64);

            // Generate rows
            let gen_start = Instant::now();
            let batch = generator.next_batch(category, batch_rows as usize);
            metrics.generation_duration += gen_start.elapsed();

            // Insert rows
            let insert_start = Instant::now();
            let result = self.submit_batch(&batch, batch_index, &mut metrics).await;
            metrics.insert_duration += insert_start.elapsed();
            metrics.batch_count += 1;

            match result {
                Ok(()) => metrics.rows_inserted += batch_rows,
                Err(e) if self.policy == BatchFailurePolicy::Skip => {
                    warn!("Skipping failed batch: {}", e);
                    metrics.failed_batches += 1;
                    metrics.rows_skipped += batch_rows;
                }
                Err(e) => return Err(e),
            }

            remaining -= batch_rows;
            batch_index += 1;

            debug!(
                "Batch {} of '{}' complete: {} rows, {} remaining",
                batch_index, category, batch_rows, remaining
            );
            if batch_index % progress_every == 0 || remaining == 0 {
                info!(
                    "{}: {}/{} rows inserted",
                    category.table_name(),
                    metrics.rows_inserted,
                    count
                );
            }
        }

        metrics.total_duration = start_time.elapsed();

        info!(
            "Population of '{}' complete: {} rows in {:?} ({:.2} rows/sec)",
            category.table_name(),
            metrics.rows_inserted,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Submit one batch, retrying under the retry policy.
    async fn submit_batch(
        &self,
        batch: &RecordBatch,
        batch_index: u64,
        metrics: &mut PopulateMetrics,
    ) -> Result<(), PopulateError> {
        let (max_attempts, backoff_ms) = match self.policy {
            BatchFailurePolicy::Retry {
                max_attempts,
                backoff_ms,
            } => (max_attempts, backoff_ms),
            BatchFailurePolicy::Abort | BatchFailurePolicy::Skip => (1, 0),
        };

        let mut attempt = 1;
        loop {
            match self.submit_once(batch).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < max_attempts => {
                    warn!(
                        "Batch {} of '{}' failed (attempt {}/{}): {}",
                        batch_index,
                        batch.category(),
                        attempt,
                        max_attempts,
                        e
                    );
                    metrics.retries += 1;
                    tokio::time::sleep(Duration::from_millis(backoff_ms * u64::from(attempt)))
                        .await;
                    attempt += 1;
                }
                Err(source) => {
                    return Err(PopulateError::Batch {
                        category: batch.category(),
                        batch_index,
                        attempts: attempt,
                        source,
                    })
                }
            }
        }
    }

    async fn submit_once(&self, batch: &RecordBatch) -> Result<(), SinkError> {
        match self.batch_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.sink.submit(batch))
                .await
                .map_err(|_| SinkError::Timeout(timeout))?,
            None => self.sink.submit(batch).await,
        }
    }
}
