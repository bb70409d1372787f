//! Individual value generators.
//!
//! Each generator draws from a caller-supplied RNG so the whole row stream
//! stays reproducible for a given seed.

pub mod choice;
pub mod numeric;
pub mod text;
pub mod timestamp;
pub mod uuid;

pub use choice::generate_one_of;
pub use numeric::{generate_decimal_range, generate_int_range};
pub use text::{generate_paragraph, generate_sentence};
pub use timestamp::{generate_timestamp_range, TimeWindow};
pub use uuid::generate_uuid_v4;
