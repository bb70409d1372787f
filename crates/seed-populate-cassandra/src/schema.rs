//! CQL statements for the seeded keyspace.

use seed_types::Category;

/// Positional insert template for `category`.
///
/// Bind markers follow the column order of the matching
/// [`seed_types::records`] struct.
pub fn insert_cql(category: Category) -> &'static str {
    match category {
        Category::Claims => {
            "INSERT INTO claims (claim_id, client_id, policy_id, date, status, amount, description) \
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        }
        Category::Payments => {
            "INSERT INTO payments (payment_id, client_id, policy_id, date, amount, method, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        }
        Category::Audits => {
            "INSERT INTO transaction_audit \
             (audit_id, service, operation, entity, reference_id, user_id, date, detail) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        }
    }
}

/// Generate CREATE KEYSPACE statement.
///
/// `keyspace` must already be validated by [`seed_types::SeedConfig::validate`].
pub fn create_keyspace_cql(keyspace: &str, replication_factor: u32) -> String {
    format!(
        "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH replication = \
         {{'class': 'SimpleStrategy', 'replication_factor': {replication_factor}}}"
    )
}

/// Generate CREATE TABLE statement for `category` inside `keyspace`.
pub fn create_table_cql(keyspace: &str, category: Category) -> String {
    let columns = match category {
        Category::Claims => {
            "claim_id uuid PRIMARY KEY, client_id int, policy_id int, date timestamp, \
             status text, amount decimal, description text"
        }
        Category::Payments => {
            "payment_id uuid PRIMARY KEY, client_id int, policy_id int, date timestamp, \
             amount decimal, method text, status text"
        }
        Category::Audits => {
            "audit_id uuid PRIMARY KEY, service text, operation text, entity text, \
             reference_id text, user_id int, date timestamp, detail text"
        }
    };

    format!(
        "CREATE TABLE IF NOT EXISTS {keyspace}.{} ({columns})",
        category.table_name()
    )
}
