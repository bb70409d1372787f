//! Uniform selection from a fixed set of values.

use rand::Rng;

/// Pick one element of `values` uniformly at random.
///
/// `values` must be non-empty; every caller passes one of the `ALL` constants
/// from `seed-types`.
pub fn generate_one_of<R: Rng, T: Copy>(rng: &mut R, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_types::PaymentMethod;
    use std::collections::HashSet;

    #[test]
    fn test_one_of_covers_all_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<PaymentMethod> = (0..500)
            .map(|_| generate_one_of(&mut rng, PaymentMethod::ALL))
            .collect();

        assert_eq!(seen.len(), PaymentMethod::ALL.len());
    }
}
