//! # POS Registry Repository
//!
//! SQLite-backed [`PosRegistry`] over the `pos_systems` table. Registration
//! is idempotent per (store, lane): the unique index catches the race where
//! two bootstraps register the same lane at once, and the loser reads back
//! the winner's row.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use mercury_core::LaneIdentity;

use crate::catalog::PosRegistry;
use crate::error::{DbError, DbResult};

#[derive(sqlx::FromRow)]
struct PosSystemRow {
    id: String,
    store_name: String,
    lane_number: i64,
}

impl PosSystemRow {
    fn into_identity(self) -> DbResult<LaneIdentity> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| DbError::decode("pos_systems.id", e.to_string()))?;
        LaneIdentity::new(self.store_name, self.lane_number as u32, id)
            .map_err(|e| DbError::decode("pos_systems", e.to_string()))
    }
}

/// Repository for the `pos_systems` table.
#[derive(Debug, Clone)]
pub struct PosRegistryRepository {
    pool: SqlitePool,
}

impl PosRegistryRepository {
    /// Creates a repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        PosRegistryRepository { pool }
    }

    async fn find(&self, store_name: &str, lane_number: u32) -> DbResult<Option<LaneIdentity>> {
        let row: Option<PosSystemRow> = sqlx::query_as(
            r#"
            SELECT id, store_name, lane_number
            FROM pos_systems
            WHERE store_name = ?1 AND lane_number = ?2
            "#,
        )
        .bind(store_name)
        .bind(lane_number as i64)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PosSystemRow::into_identity).transpose()
    }
}

#[async_trait]
impl PosRegistry for PosRegistryRepository {
    async fn register_lane(&self, store_name: &str, lane_number: u32) -> DbResult<LaneIdentity> {
        if let Some(existing) = self.find(store_name, lane_number).await? {
            return Ok(existing);
        }

        let identity = LaneIdentity::new(store_name, lane_number, Uuid::new_v4())
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO pos_systems (id, store_name, lane_number, registered_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(identity.pos_system_id().to_string())
        .bind(store_name)
        .bind(lane_number as i64)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => {
                info!(lane = %identity, "registered new lane");
                Ok(identity)
            }
            Err(e) => {
                let err = DbError::from(e);
                if err.is_unique_violation() {
                    // Lost a registration race: the other bootstrap's row wins.
                    self.find(store_name, lane_number).await?.ok_or_else(|| {
                        DbError::Internal("registration race left no row".into())
                    })
                } else {
                    Err(err)
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> PosRegistryRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .registry()
    }

    #[tokio::test]
    async fn test_registration_is_idempotent() {
        let repo = repo().await;

        let first = repo.register_lane("Main Street", 1).await.unwrap();
        let again = repo.register_lane("Main Street", 1).await.unwrap();
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn test_each_lane_gets_its_own_id() {
        let repo = repo().await;

        let one = repo.register_lane("Main Street", 1).await.unwrap();
        let two = repo.register_lane("Main Street", 2).await.unwrap();
        assert_ne!(one.pos_system_id(), two.pos_system_id());
    }
}
