//! Record generator producing rows for the three seeded tables.

use crate::generators::{
    generate_decimal_range, generate_int_range, generate_one_of, generate_paragraph,
    generate_sentence, generate_timestamp_range, generate_uuid_v4, TimeWindow,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_types::{
    AuditEntity, AuditOperation, AuditRecord, AuditService, Category, Claim, ClaimStatus, Payment,
    PaymentMethod, PaymentStatus, RecordBatch, CLAIM_AMOUNT_RANGE, CLIENT_ID_RANGE,
    DESCRIPTION_MAX_CHARS, PAYMENT_AMOUNT_RANGE, POLICY_ID_RANGE, REFERENCE_ID_RANGE,
    USER_ID_RANGE,
};
use std::ops::RangeInclusive;

/// Spread between per-category seeds (64-bit golden ratio).
const CATEGORY_SEED_STRIDE: u64 = 0x9E3779B97F4A7C15;

/// Word bounds for audit detail sentences (about 12 words).
const DETAIL_MIN_WORDS: usize = 7;
const DETAIL_MAX_WORDS: usize = 16;

/// Data generator that produces reproducible rows.
///
/// Two generators built with the same seed and window yield identical row
/// streams.
pub struct RecordGenerator {
    rng: StdRng,
    window: TimeWindow,
    /// Rows generated so far
    index: u64,
}

impl RecordGenerator {
    pub fn new(seed: u64, window: TimeWindow) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window,
            index: 0,
        }
    }

    /// Generator with dates drawn from the current decade.
    pub fn this_decade(seed: u64) -> Self {
        Self::new(seed, TimeWindow::this_decade(Utc::now()))
    }

    /// Generator for one category, seeded independently of the others.
    ///
    /// Deriving the seed per category keeps each table's rows identical
    /// whether categories run sequentially or concurrently.
    pub fn for_category(base_seed: u64, category: Category, window: TimeWindow) -> Self {
        Self::new(category_seed(base_seed, category), window)
    }

    /// Number of rows generated so far.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn next_claim(&mut self) -> Claim {
        self.index += 1;
        Claim {
            claim_id: generate_uuid_v4(&mut self.rng),
            client_id: self.int_in(&CLIENT_ID_RANGE),
            policy_id: self.int_in(&POLICY_ID_RANGE),
            date: generate_timestamp_range(&mut self.rng, &self.window),
            status: generate_one_of(&mut self.rng, ClaimStatus::ALL),
            amount: generate_decimal_range(
                &mut self.rng,
                *CLAIM_AMOUNT_RANGE.start(),
                *CLAIM_AMOUNT_RANGE.end(),
            ),
            description: generate_paragraph(&mut self.rng, DESCRIPTION_MAX_CHARS),
        }
    }

    pub fn next_payment(&mut self) -> Payment {
        self.index += 1;
        Payment {
            payment_id: generate_uuid_v4(&mut self.rng),
            client_id: self.int_in(&CLIENT_ID_RANGE),
            policy_id: self.int_in(&POLICY_ID_RANGE),
            date: generate_timestamp_range(&mut self.rng, &self.window),
            amount: generate_decimal_range(
                &mut self.rng,
                *PAYMENT_AMOUNT_RANGE.start(),
                *PAYMENT_AMOUNT_RANGE.end(),
            ),
            method: generate_one_of(&mut self.rng, PaymentMethod::ALL),
            status: generate_one_of(&mut self.rng, PaymentStatus::ALL),
        }
    }

    pub fn next_audit(&mut self) -> AuditRecord {
        self.index += 1;
        AuditRecord {
            audit_id: generate_uuid_v4(&mut self.rng),
            service: generate_one_of(&mut self.rng, AuditService::ALL),
            operation: generate_one_of(&mut self.rng, AuditOperation::ALL),
            entity: generate_one_of(&mut self.rng, AuditEntity::ALL),
            reference_id: self.int_in(&REFERENCE_ID_RANGE).to_string(),
            user_id: self.int_in(&USER_ID_RANGE),
            date: generate_timestamp_range(&mut self.rng, &self.window),
            detail: generate_sentence(&mut self.rng, DETAIL_MIN_WORDS, DETAIL_MAX_WORDS),
        }
    }

    /// Generate exactly `count` rows of `category`.
    pub fn next_batch(&mut self, category: Category, count: usize) -> RecordBatch {
        match category {
            Category::Claims => RecordBatch::Claims((0..count).map(|_| self.next_claim()).collect()),
            Category::Payments => {
                RecordBatch::Payments((0..count).map(|_| self.next_payment()).collect())
            }
            Category::Audits => RecordBatch::Audits((0..count).map(|_| self.next_audit()).collect()),
        }
    }

    fn int_in(&mut self, range: &RangeInclusive<i32>) -> i32 {
        generate_int_range(&mut self.rng, *range.start(), *range.end())
    }
}

/// Seed used for `category` when the run's base seed is `base_seed`.
pub fn category_seed(base_seed: u64, category: Category) -> u64 {
    base_seed.wrapping_add((category.index() + 1).wrapping_mul(CATEGORY_SEED_STRIDE))
}
