//! # Transaction Repository
//!
//! SQLite persistence for transaction records, and the SQLite-backed
//! implementation of the [`TransactionStore`] contract.
//!
//! The unique index on (pos_system_id, sequence_number) is the database's
//! copy of the lane invariant that sequence numbers are never reused; a
//! violation surfaces as [`StoreError::Duplicate`] at the contract
//! boundary, everything else as [`StoreError::Unavailable`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use mercury_core::{LaneIdentity, StoreError, TransactionRecord, TransactionStore};

use crate::error::{DbError, DbResult};

/// Private row mirror of the `transactions` table.
#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: String,
    store_name: String,
    lane_number: i64,
    pos_system_id: String,
    sequence_number: i64,
    started_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_record(self) -> DbResult<TransactionRecord> {
        Ok(TransactionRecord {
            id: parse_uuid("transactions.id", &self.id)?,
            store_name: self.store_name,
            lane_number: self.lane_number as u32,
            pos_system_id: parse_uuid("transactions.pos_system_id", &self.pos_system_id)?,
            sequence_number: self.sequence_number as u64,
            started_at: self.started_at,
        })
    }
}

fn parse_uuid(column: &str, value: &str) -> DbResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::decode(column, e.to_string()))
}

/// Repository for the `transactions` table.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Inserts one record. A duplicate (pos system, sequence) pair maps
    /// to [`DbError::UniqueViolation`] via the unique index.
    pub async fn insert(&self, record: &TransactionRecord) -> DbResult<()> {
        debug!(
            id = %record.id,
            sequence = record.sequence_number,
            "inserting transaction"
        );

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, store_name, lane_number, pos_system_id,
                sequence_number, started_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.store_name)
        .bind(record.lane_number as i64)
        .bind(record.pos_system_id.to_string())
        .bind(record.sequence_number as i64)
        .bind(record.started_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets one record by id.
    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Option<TransactionRecord>> {
        let row: Option<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, store_name, lane_number, pos_system_id,
                   sequence_number, started_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TransactionRow::into_record).transpose()
    }

    /// Every record for one POS system, in sequence order.
    pub async fn find_by_pos_system(
        &self,
        pos_system_id: Uuid,
    ) -> DbResult<Vec<TransactionRecord>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, store_name, lane_number, pos_system_id,
                   sequence_number, started_at
            FROM transactions
            WHERE pos_system_id = ?1
            ORDER BY sequence_number
            "#,
        )
        .bind(pos_system_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_record).collect()
    }

    /// Number of persisted transactions, all lanes.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn create_and_persist(
        &self,
        identity: &LaneIdentity,
        sequence_number: u64,
    ) -> Result<TransactionRecord, StoreError> {
        let record = TransactionRecord::create(identity, sequence_number);

        match self.insert(&record).await {
            Ok(()) => Ok(record),
            Err(e) if e.is_unique_violation() => Err(StoreError::Duplicate {
                pos_system_id: identity.pos_system_id(),
                sequence: sequence_number,
            }),
            Err(e) => Err(StoreError::Unavailable {
                reason: e.to_string(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
