//! The seed command: configuration assembly and run orchestration.

pub mod args;
pub mod run;

pub use args::{FailurePolicyArg, SeedArgs};
pub use run::{ensure_complete, load_config, run_seed, run_with_sink};
