//! Record generator for the policy-seed data generator.
//!
//! [`RecordGenerator`] produces claims, payments and audit records from a
//! seeded RNG, so a given seed and time window always yield the same rows.
//!
//! ```text
//! seed + TimeWindow
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ RecordGenerator  │
//! │                  │
//! │  - rng (StdRng)  │
//! │  - window        │
//! │  - index         │
//! └────────┬─────────┘
//!          │
//!          ▼
//!    RecordBatch::{Claims, Payments, Audits}
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_generator::RecordGenerator;
//! use seed_types::Category;
//!
//! let mut generator = RecordGenerator::this_decade(42);
//! let batch = generator.next_batch(Category::Claims, 100);
//! assert_eq!(batch.len(), 100);
//! ```

pub mod generator;
pub mod generators;

pub use generator::{category_seed, RecordGenerator};
pub use generators::TimeWindow;
