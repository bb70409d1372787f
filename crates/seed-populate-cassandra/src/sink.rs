//! The write seam between the populator and the backing store.

use crate::error::SinkError;
use async_trait::async_trait;
use seed_types::RecordBatch;

/// Destination for generated batches.
///
/// One call to [`submit`](BatchSink::submit) is one atomic multi-row write.
/// Implementations must be shareable so categories can be seeded
/// concurrently over the same sink.
#[async_trait]
pub trait BatchSink: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Write every row of `batch`, returning once the store has acknowledged it.
    async fn submit(&self, batch: &RecordBatch) -> Result<(), SinkError>;
}
