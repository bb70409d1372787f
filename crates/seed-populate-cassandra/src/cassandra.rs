//! Cassandra sink: prepared inserts submitted as logged batches.

use crate::error::{PopulateError, SinkError};
use crate::schema::{create_keyspace_cql, create_table_cql, insert_cql};
use crate::sink::BatchSink;
use async_trait::async_trait;
use rust_decimal::Decimal;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::statement::batch::{Batch, BatchType};
use scylla::statement::prepared::PreparedStatement;
use scylla::value::CqlDecimal;
use seed_types::{Category, RecordBatch, SeedConfig};
use tracing::{debug, info};

/// Sink writing to a Cassandra (or ScyllaDB) keyspace over one session.
///
/// The scylla [`Session`] pools connections per node internally, so a single
/// sink can be shared by concurrently seeded categories.
pub struct CassandraSink {
    session: Session,
    insert_claim: PreparedStatement,
    insert_payment: PreparedStatement,
    insert_audit: PreparedStatement,
}

impl CassandraSink {
    /// Connect to the cluster described by `config` and prepare the insert templates.
    ///
    /// With `create_schema` set, the keyspace and tables are created first.
    pub async fn connect(config: &SeedConfig) -> Result<Self, PopulateError> {
        config.validate()?;

        info!(
            "Connecting to Cassandra at {:?} (keyspace: {})",
            config.contact_points, config.keyspace
        );

        let mut builder = SessionBuilder::new().known_nodes(&config.contact_points);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.user(username, password);
        }
        let session = builder.build().await?;

        if config.create_schema {
            create_schema(&session, &config.keyspace, config.replication_factor).await?;
        }

        session.use_keyspace(&config.keyspace, false).await?;

        Self::with_session(session).await
    }

    /// Create a sink over an existing session already bound to the target keyspace.
    pub async fn with_session(session: Session) -> Result<Self, PopulateError> {
        let insert_claim = prepare(&session, Category::Claims).await?;
        let insert_payment = prepare(&session, Category::Payments).await?;
        let insert_audit = prepare(&session, Category::Audits).await?;

        Ok(Self {
            session,
            insert_claim,
            insert_payment,
            insert_audit,
        })
    }

    /// Get a reference to the underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn logged_batch(statement: &PreparedStatement, rows: usize) -> Batch {
        let mut batch = Batch::new(BatchType::Logged);
        for _ in 0..rows {
            batch.append_statement(statement.clone());
        }
        batch
    }
}

#[async_trait]
impl BatchSink for CassandraSink {
    fn name(&self) -> &'static str {
        "cassandra"
    }

    async fn submit(&self, batch: &RecordBatch) -> Result<(), SinkError> {
        if batch.is_empty() {
            return Ok(());
        }

        match batch {
            RecordBatch::Claims(rows) => {
                let values: Vec<_> = rows
                    .iter()
                    .map(|r| {
                        (
                            r.claim_id,
                            r.client_id,
                            r.policy_id,
                            r.date,
                            r.status.as_str(),
                            to_cql_decimal(&r.amount),
                            r.description.as_str(),
                        )
                    })
                    .collect();
                let cql_batch = Self::logged_batch(&self.insert_claim, values.len());
                self.session.batch(&cql_batch, values).await?;
            }
            RecordBatch::Payments(rows) => {
                let values: Vec<_> = rows
                    .iter()
                    .map(|r| {
                        (
                            r.payment_id,
                            r.client_id,
                            r.policy_id,
                            r.date,
                            to_cql_decimal(&r.amount),
                            r.method.as_str(),
                            r.status.as_str(),
                        )
                    })
                    .collect();
                let cql_batch = Self::logged_batch(&self.insert_payment, values.len());
                self.session.batch(&cql_batch, values).await?;
            }
            RecordBatch::Audits(rows) => {
                let values: Vec<_> = rows
                    .iter()
                    .map(|r| {
                        (
                            r.audit_id,
                            r.service.as_str(),
                            r.operation.as_str(),
                            r.entity.as_str(),
                            r.reference_id.as_str(),
                            r.user_id,
                            r.date,
                            r.detail.as_str(),
                        )
                    })
                    .collect();
                let cql_batch = Self::logged_batch(&self.insert_audit, values.len());
                self.session.batch(&cql_batch, values).await?;
            }
        }

        Ok(())
    }
}

/// Create the keyspace and the three tables if they do not exist.
pub async fn create_schema(
    session: &Session,
    keyspace: &str,
    replication_factor: u32,
) -> Result<(), PopulateError> {
    let ddl = create_keyspace_cql(keyspace, replication_factor);
    info!("Creating keyspace: {}", keyspace);
    debug!("DDL: {}", ddl);
    session
        .query_unpaged(ddl, ())
        .await
        .map_err(PopulateError::Schema)?;

    for category in Category::ALL {
        let ddl = create_table_cql(keyspace, category);
        info!("Creating table: {}.{}", keyspace, category.table_name());
        debug!("DDL: {}", ddl);
        session
            .query_unpaged(ddl, ())
            .await
            .map_err(PopulateError::Schema)?;
    }

    Ok(())
}

async fn prepare(session: &Session, category: Category) -> Result<PreparedStatement, PopulateError> {
    session
        .prepare(insert_cql(category))
        .await
        .map_err(|source| PopulateError::Prepare {
            table: category.table_name(),
            source,
        })
}

/// Encode a decimal as CQL `decimal`: big-endian two's complement unscaled value plus scale.
fn to_cql_decimal(amount: &Decimal) -> CqlDecimal {
    let bytes = minimal_be_bytes(amount.mantissa());
    CqlDecimal::from_signed_be_bytes_slice_and_exponent(&bytes, amount.scale() as i32)
}

/// Shortest big-endian two's complement encoding of `value`.
fn minimal_be_bytes(value: i128) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}
