//! Core types for the policy-seed data generator.
//!
//! - [`Claim`], [`Payment`], [`AuditRecord`] - the seeded rows
//! - [`Category`] and [`RecordBatch`] - grouping used by generator and populator
//! - [`SeedConfig`] - run configuration, loadable from YAML
//!
//! ```text
//! seed-types (this crate)
//!    │
//!    ├─── seed-generator            (produces RecordBatch values)
//!    └─── seed-populate-cassandra   (writes RecordBatch values)
//! ```

pub mod config;
pub mod records;

pub use config::{BatchFailurePolicy, CategoryCounts, ConfigError, SeedConfig, DEFAULT_BATCH_SIZE};
pub use records::{
    AuditEntity, AuditOperation, AuditRecord, AuditService, Category, Claim, ClaimStatus, Payment,
    PaymentMethod, PaymentStatus, RecordBatch, CLAIM_AMOUNT_RANGE, CLIENT_ID_RANGE,
    DESCRIPTION_MAX_CHARS, PAYMENT_AMOUNT_RANGE, POLICY_ID_RANGE, REFERENCE_ID_RANGE,
    USER_ID_RANGE,
};
