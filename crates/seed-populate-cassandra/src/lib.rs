//! Cassandra populator for the policy-seed data generator.
//!
//! ```text
//! RecordGenerator ──► Populator ──► dyn BatchSink
//!                                     ├── CassandraSink  (prepared inserts, logged batches)
//!                                     ├── DryRunSink     (counts only)
//!                                     └── RecordingSink  (in-memory, for tests)
//! ```

pub mod cassandra;
pub mod error;
pub mod memory;
pub mod populator;
pub mod schema;
pub mod sink;

pub use cassandra::{create_schema, CassandraSink};
pub use error::{PopulateError, SinkError};
pub use memory::{DryRunSink, RecordingSink};
pub use populator::{PopulateMetrics, Populator, RunReport};
pub use sink::BatchSink;
