//! Seeding configuration.
//!
//! A [`SeedConfig`] can be loaded from YAML; every field is optional in the
//! file and falls back to the defaults below.
//!
//! ```yaml
//! contact_points: ["cassandra:9042"]
//! keyspace: primac_db
//! counts:
//!   claims: 12000
//!   payments: 20000
//!   audits: 20000
//! batch_size: 100
//! seed: 42
//! on_batch_error:
//!   policy: retry
//!   max_attempts: 3
//!   backoff_ms: 500
//! ```

use crate::records::Category;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default number of rows per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Longest keyspace name Cassandra accepts.
const MAX_KEYSPACE_LEN: usize = 48;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("batch_size must be greater than zero")]
    ZeroBatchSize,

    #[error("at least one contact point is required")]
    NoContactPoints,

    #[error("invalid keyspace name '{0}': expected a letter followed by up to 47 letters, digits or underscores")]
    InvalidKeyspace(String),

    #[error("retry policy needs max_attempts >= 1")]
    ZeroRetryAttempts,

    #[error("replication_factor must be at least 1")]
    ZeroReplicationFactor,

    #[error("username and password must be set together")]
    IncompleteCredentials,
}

/// Rows to generate per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CategoryCounts {
    pub claims: u64,
    pub payments: u64,
    pub audits: u64,
}

impl Default for CategoryCounts {
    fn default() -> Self {
        Self {
            claims: 12_000,
            payments: 20_000,
            audits: 20_000,
        }
    }
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Claims => self.claims,
            Category::Payments => self.payments,
            Category::Audits => self.audits,
        }
    }

    pub fn total(&self) -> u64 {
        self.claims
            .saturating_add(self.payments)
            .saturating_add(self.audits)
    }
}

/// What the populator does when the store rejects a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum BatchFailurePolicy {
    /// Stop the category and propagate the error.
    #[default]
    Abort,
    /// Resubmit the same batch, waiting `backoff_ms * attempt` between tries.
    Retry { max_attempts: u32, backoff_ms: u64 },
    /// Log the failure and move on to the next batch.
    Skip,
}

/// Complete configuration for one seeding run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed addresses of the cluster (`host:port`)
    pub contact_points: Vec<String>,
    /// Keyspace the session is bound to
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub counts: CategoryCounts,
    pub batch_size: usize,
    /// RNG seed; a fresh one is drawn per run when unset
    pub seed: Option<u64>,
    /// Seed the three categories concurrently over the shared session
    pub concurrent: bool,
    pub on_batch_error: BatchFailurePolicy,
    /// Per-batch timeout; unset waits indefinitely
    pub batch_timeout_secs: Option<u64>,
    /// Create the keyspace and tables before seeding
    pub create_schema: bool,
    pub replication_factor: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            contact_points: vec!["cassandra:9042".to_string()],
            keyspace: "primac_db".to_string(),
            username: None,
            password: None,
            counts: CategoryCounts::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            concurrent: false,
            on_batch_error: BatchFailurePolicy::Abort,
            batch_timeout_secs: None,
            create_schema: false,
            replication_factor: 1,
        }
    }
}

impl SeedConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check the invariants the populator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.contact_points.is_empty() {
            return Err(ConfigError::NoContactPoints);
        }
        if !is_valid_keyspace(&self.keyspace) {
            return Err(ConfigError::InvalidKeyspace(self.keyspace.clone()));
        }
        if let BatchFailurePolicy::Retry { max_attempts: 0, .. } = self.on_batch_error {
            return Err(ConfigError::ZeroRetryAttempts);
        }
        if self.replication_factor == 0 {
            return Err(ConfigError::ZeroReplicationFactor);
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(ConfigError::IncompleteCredentials);
        }
        Ok(())
    }

    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout_secs.map(Duration::from_secs)
    }

    /// Number of batches needed for `category`, counting a trailing partial batch.
    pub fn batch_count(&self, category: Category) -> u64 {
        let batch_size = self.batch_size.max(1) as u64;
        self.counts.get(category).div_ceil(batch_size)
    }
}

/// Keyspace names are interpolated into DDL, so only unquoted identifiers are allowed.
fn is_valid_keyspace(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= MAX_KEYSPACE_LEN && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
