//! CLI argument definitions for the seed command.

use clap::{Args, ValueEnum};
use seed_types::{BatchFailurePolicy, SeedConfig};
use std::path::PathBuf;

/// Default number of attempts per batch under `--on-batch-error retry`.
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Failure policy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicyArg {
    /// Stop at the first failed batch
    Abort,
    /// Resubmit a failed batch before giving up
    Retry,
    /// Log the failed batch and continue
    Skip,
}

/// Seeding arguments.
///
/// Every option left unset keeps the value from `--config` (or the built-in
/// default when no file is given).
#[derive(Args, Clone, Debug, Default)]
pub struct SeedArgs {
    /// Path to a YAML config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Cassandra contact points (comma-separated host:port)
    #[arg(long, value_delimiter = ',', env = "CASSANDRA_CONTACT_POINTS")]
    pub contact_points: Option<Vec<String>>,

    /// Keyspace to seed
    #[arg(long, env = "CASSANDRA_KEYSPACE")]
    pub keyspace: Option<String>,

    /// Cassandra username
    #[arg(long, env = "CASSANDRA_USERNAME")]
    pub username: Option<String>,

    /// Cassandra password
    #[arg(long, env = "CASSANDRA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Number of claims to generate
    #[arg(long)]
    pub claims: Option<u64>,

    /// Number of payments to generate
    #[arg(long)]
    pub payments: Option<u64>,

    /// Number of audit records to generate
    #[arg(long)]
    pub audits: Option<u64>,

    /// Rows per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seed the three tables concurrently (`--concurrent=false` overrides the config file)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub concurrent: Option<bool>,

    /// What to do when a batch fails
    #[arg(long, value_enum)]
    pub on_batch_error: Option<FailurePolicyArg>,

    /// Attempts per batch with `--on-batch-error retry`
    #[arg(long)]
    pub retry_attempts: Option<u32>,

    /// Base delay between retries; grows linearly with each attempt
    #[arg(long)]
    pub retry_backoff_ms: Option<u64>,

    /// Fail a batch that takes longer than this many seconds
    #[arg(long)]
    pub batch_timeout_secs: Option<u64>,

    /// Create the keyspace and tables if they do not exist
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub create_schema: Option<bool>,

    /// Replication factor used with `--create-schema`
    #[arg(long)]
    pub replication_factor: Option<u32>,

    /// Dry-run mode: generate every batch without connecting to Cassandra
    #[arg(long)]
    pub dry_run: bool,
}

impl SeedArgs {
    /// Overlay the options given on the command line onto `base`.
    pub fn apply(&self, mut base: SeedConfig) -> SeedConfig {
        if let Some(contact_points) = &self.contact_points {
            base.contact_points = contact_points.clone();
        }
        if let Some(keyspace) = &self.keyspace {
            base.keyspace = keyspace.clone();
        }
        if self.username.is_some() {
            base.username = self.username.clone();
        }
        if self.password.is_some() {
            base.password = self.password.clone();
        }
        if let Some(claims) = self.claims {
            base.counts.claims = claims;
        }
        if let Some(payments) = self.payments {
            base.counts.payments = payments;
        }
        if let Some(audits) = self.audits {
            base.counts.audits = audits;
        }
        if let Some(batch_size) = self.batch_size {
            base.batch_size = batch_size;
        }
        if self.seed.is_some() {
            base.seed = self.seed;
        }
        if let Some(concurrent) = self.concurrent {
            base.concurrent = concurrent;
        }
        if let Some(create_schema) = self.create_schema {
            base.create_schema = create_schema;
        }
        if self.batch_timeout_secs.is_some() {
            base.batch_timeout_secs = self.batch_timeout_secs;
        }
        if let Some(replication_factor) = self.replication_factor {
            base.replication_factor = replication_factor;
        }
        base.on_batch_error = self.failure_policy(base.on_batch_error);
        base
    }

    fn failure_policy(&self, current: BatchFailurePolicy) -> BatchFailurePolicy {
        let (current_attempts, current_backoff) = match current {
            BatchFailurePolicy::Retry {
                max_attempts,
                backoff_ms,
            } => (max_attempts, backoff_ms),
            _ => (DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS),
        };

        let retry = || BatchFailurePolicy::Retry {
            max_attempts: self.retry_attempts.unwrap_or(current_attempts),
            backoff_ms: self.retry_backoff_ms.unwrap_or(current_backoff),
        };

        match self.on_batch_error {
            Some(FailurePolicyArg::Abort) => BatchFailurePolicy::Abort,
            Some(FailurePolicyArg::Skip) => BatchFailurePolicy::Skip,
            Some(FailurePolicyArg::Retry) => retry(),
            None if matches!(current, BatchFailurePolicy::Retry { .. }) => retry(),
            None => current,
        }
    }
}
