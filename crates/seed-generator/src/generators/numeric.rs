//! Numeric value generators.

use rand::Rng;
use rust_decimal::Decimal;

/// Scale of generated amounts (two fractional digits, always zero).
pub const AMOUNT_SCALE: u32 = 2;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}

/// Generate a whole-unit amount in `[min, max]` (inclusive), stored with cent scale.
///
/// `generate_decimal_range(rng, 100, 5000)` yields values like `1234.00`.
pub fn generate_decimal_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> Decimal {
    let units = rng.gen_range(min..=max);
    Decimal::new(units * 10_i64.pow(AMOUNT_SCALE), AMOUNT_SCALE)
}
