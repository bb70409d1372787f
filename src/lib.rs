//! policy-seed library
//!
//! Seeds a Cassandra keyspace with synthetic insurance data: claims,
//! payments and transaction audit records, written through prepared
//! statements in fixed-size logged batches.
//!
//! # Crates
//!
//! - `seed_types` - row types and [`SeedConfig`](seed_types::SeedConfig)
//! - `seed_generator` - seeded, reproducible row generation
//! - `seed_populate_cassandra` - batch sinks and the populate loop
//!
//! # CLI Usage
//!
//! ```bash
//! # Seed with the default counts (12000 claims, 20000 payments, 20000 audits)
//! policy-seed --contact-points cassandra:9042 --keyspace primac_db
//!
//! # Small reproducible fixture, creating the schema first
//! policy-seed --create-schema --claims 200 --payments 200 --audits 200 --seed 42
//!
//! # Validate configuration and generation without a cluster
//! policy-seed --config seed.yaml --dry-run
//! ```

pub mod seed;

pub use seed::{
    ensure_complete, load_config, run_seed, run_with_sink, FailurePolicyArg, SeedArgs,
};
