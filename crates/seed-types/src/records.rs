//! Row types for the three seeded tables.
//!
//! Every enum here maps to a CQL `text` column; [`as_str`](ClaimStatus::as_str)
//! gives the exact string stored in the database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Client ids referenced by claims and payments.
pub const CLIENT_ID_RANGE: RangeInclusive<i32> = 1..=15_000;
/// Policy ids referenced by claims and payments.
pub const POLICY_ID_RANGE: RangeInclusive<i32> = 1..=20_000;
/// Claim amounts, in whole currency units.
pub const CLAIM_AMOUNT_RANGE: RangeInclusive<i64> = 100..=5_000;
/// Payment amounts, in whole currency units.
pub const PAYMENT_AMOUNT_RANGE: RangeInclusive<i64> = 50..=2_000;
pub const REFERENCE_ID_RANGE: RangeInclusive<i32> = 1..=20_000;
pub const USER_ID_RANGE: RangeInclusive<i32> = 1..=20_000;
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Implements `ALL`, `as_str` and `Display` for a fieldless enum whose
/// variants are stored by name.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The string stored in the database for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Review status of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

text_enum!(ClaimStatus {
    Pending => "Pending",
    Approved => "Approved",
    Rejected => "Rejected",
});

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Card,
    Transfer,
    Cash,
    Yape,
    Plin,
}

text_enum!(PaymentMethod {
    Card => "Card",
    Transfer => "Transfer",
    Cash => "Cash",
    Yape => "Yape",
    Plin => "Plin",
});

/// Processing status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Processed,
    Pending,
    Failed,
}

text_enum!(PaymentStatus {
    Processed => "Processed",
    Pending => "Pending",
    Failed => "Failed",
});

/// Service that emitted an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditService {
    ClaimsApi,
    PaymentsApi,
    PoliciesApi,
}

text_enum!(AuditService {
    ClaimsApi => "ClaimsAPI",
    PaymentsApi => "PaymentsAPI",
    PoliciesApi => "PoliciesAPI",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditOperation {
    Create,
    Update,
    Delete,
    Read,
}

text_enum!(AuditOperation {
    Create => "CREATE",
    Update => "UPDATE",
    Delete => "DELETE",
    Read => "READ",
});

/// Kind of entity an audit record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditEntity {
    Claim,
    Payment,
    Client,
    Policy,
}

text_enum!(AuditEntity {
    Claim => "Claim",
    Payment => "Payment",
    Client => "Client",
    Policy => "Policy",
});

/// An insurance claim row (`claims` table).
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub claim_id: Uuid,
    pub client_id: i32,
    pub policy_id: i32,
    pub date: DateTime<Utc>,
    pub status: ClaimStatus,
    pub amount: Decimal,
    pub description: String,
}

/// A policy payment row (`payments` table).
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub payment_id: Uuid,
    pub client_id: i32,
    pub policy_id: i32,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

/// A transaction audit row (`transaction_audit` table).
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub audit_id: Uuid,
    pub service: AuditService,
    pub operation: AuditOperation,
    pub entity: AuditEntity,
    /// Stored as text; always the decimal form of an integer.
    pub reference_id: String,
    pub user_id: i32,
    pub date: DateTime<Utc>,
    pub detail: String,
}

/// The three record categories, in seeding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Claims,
    Payments,
    Audits,
}

impl Category {
    /// All categories in the order they are seeded.
    pub const ALL: [Category; 3] = [Category::Claims, Category::Payments, Category::Audits];

    /// Name of the backing table.
    pub fn table_name(&self) -> &'static str {
        match self {
            Category::Claims => "claims",
            Category::Payments => "payments",
            Category::Audits => "transaction_audit",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(&self) -> u64 {
        match self {
            Category::Claims => 0,
            Category::Payments => 1,
            Category::Audits => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A group of rows of one category submitted as a single write.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordBatch {
    Claims(Vec<Claim>),
    Payments(Vec<Payment>),
    Audits(Vec<AuditRecord>),
}

impl RecordBatch {
    pub fn category(&self) -> Category {
        match self {
            RecordBatch::Claims(_) => Category::Claims,
            RecordBatch::Payments(_) => Category::Payments,
            RecordBatch::Audits(_) => Category::Audits,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecordBatch::Claims(rows) => rows.len(),
            RecordBatch::Payments(rows) => rows.len(),
            RecordBatch::Audits(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Primary keys of every row in the batch, in row order.
    pub fn ids(&self) -> Vec<Uuid> {
        match self {
            RecordBatch::Claims(rows) => rows.iter().map(|r| r.claim_id).collect(),
            RecordBatch::Payments(rows) => rows.iter().map(|r| r.payment_id).collect(),
            RecordBatch::Audits(rows) => rows.iter().map(|r| r.audit_id).collect(),
        }
    }
}
