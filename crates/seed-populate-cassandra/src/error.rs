//! Error types for the Cassandra populator.

use seed_types::{Category, ConfigError};
use std::time::Duration;
use thiserror::Error;

/// Errors returned by a [`BatchSink`](crate::sink::BatchSink) for one submission.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The cluster rejected or failed to execute the batch.
    #[error("Cassandra error: {0}")]
    Cassandra(#[from] scylla::errors::ExecutionError),

    /// The batch did not complete within the configured timeout.
    #[error("batch timed out after {0:?}")]
    Timeout(Duration),

    /// The batch was rejected by a non-Cassandra sink.
    #[error("batch rejected: {0}")]
    Rejected(String),
}

/// Errors that can occur during Cassandra population.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// Invalid configuration, detected before connecting.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Could not establish the session.
    #[error("Connection error: {0}")]
    Connection(#[from] scylla::errors::NewSessionError),

    /// Could not switch the session to the keyspace.
    #[error("Keyspace error: {0}")]
    Keyspace(#[from] scylla::errors::UseKeyspaceError),

    /// Could not prepare an insert template.
    #[error("Failed to prepare insert for '{table}': {source}")]
    Prepare {
        table: &'static str,
        source: scylla::errors::PrepareError,
    },

    /// A DDL statement failed.
    #[error("Schema error: {0}")]
    Schema(scylla::errors::ExecutionError),

    /// A batch failed and the failure policy gave up on the category.
    #[error("Batch {batch_index} of '{category}' failed after {attempts} attempt(s): {source}")]
    Batch {
        category: Category,
        batch_index: u64,
        attempts: u32,
        #[source]
        source: SinkError,
    },
}
