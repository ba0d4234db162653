//! # Discount Repository
//!
//! SQLite persistence for discounts. The two [`DiscountKind`] variants
//! map onto the nullable `percent_bps` / `amount_cents` columns; the
//! schema's CHECK constraint keeps exactly one of them set.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use mercury_core::Money;

use crate::catalog::{Discount, DiscountKind, DiscountStore};
use crate::error::{DbError, DbResult};

#[derive(sqlx::FromRow)]
struct DiscountRow {
    id: String,
    code: String,
    description: String,
    percent_bps: Option<i64>,
    amount_cents: Option<i64>,
}

impl DiscountRow {
    fn into_discount(self) -> DbResult<Discount> {
        let kind = match (self.percent_bps, self.amount_cents) {
            (Some(bps), None) => DiscountKind::Percent { bps: bps as u32 },
            (None, Some(cents)) => DiscountKind::Flat {
                amount: Money::from_cents(cents),
            },
            _ => {
                return Err(DbError::decode(
                    "discounts.percent_bps/amount_cents",
                    "expected exactly one of percent_bps, amount_cents",
                ))
            }
        };

        Ok(Discount {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| DbError::decode("discounts.id", e.to_string()))?,
            code: self.code,
            description: self.description,
            kind,
        })
    }
}

/// Repository for the `discounts` table.
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: SqlitePool,
}

impl DiscountRepository {
    /// Creates a repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository { pool }
    }

    /// All discounts, ordered by code.
    pub async fn list(&self) -> DbResult<Vec<Discount>> {
        let rows: Vec<DiscountRow> = sqlx::query_as(
            r#"
            SELECT id, code, description, percent_bps, amount_cents
            FROM discounts
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DiscountRow::into_discount).collect()
    }
}

#[async_trait]
impl DiscountStore for DiscountRepository {
    async fn find_by_code(&self, code: &str) -> DbResult<Option<Discount>> {
        let row: Option<DiscountRow> = sqlx::query_as(
            r#"
            SELECT id, code, description, percent_bps, amount_cents
            FROM discounts
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DiscountRow::into_discount).transpose()
    }

    async fn upsert(&self, discount: Discount) -> DbResult<()> {
        let (percent_bps, amount_cents) = match discount.kind {
            DiscountKind::Percent { bps } => (Some(bps as i64), None),
            DiscountKind::Flat { amount } => (None, Some(amount.cents())),
        };

        sqlx::query(
            r#"
            INSERT INTO discounts (id, code, description, percent_bps, amount_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (code) DO UPDATE SET
                description = excluded.description,
                percent_bps = excluded.percent_bps,
                amount_cents = excluded.amount_cents
            "#,
        )
        .bind(discount.id.to_string())
        .bind(&discount.code)
        .bind(&discount.description)
        .bind(percent_bps)
        .bind(amount_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> DiscountRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .discounts()
    }

    #[tokio::test]
    async fn test_percent_round_trips_through_columns() {
        let repo = repo().await;
        let discount = Discount::percent("SAVE10", "10% off", 1000);

        repo.upsert(discount.clone()).await.unwrap();

        let loaded = repo.find_by_code("SAVE10").await.unwrap().unwrap();
        assert_eq!(loaded, discount);
    }

    #[tokio::test]
    async fn test_flat_round_trips_through_columns() {
        let repo = repo().await;
        let discount = Discount::flat("5OFF", "$5 off", Money::from_cents(500));

        repo.upsert(discount.clone()).await.unwrap();

        let loaded = repo.find_by_code("5OFF").await.unwrap().unwrap();
        assert_eq!(loaded.kind, DiscountKind::Flat {
            amount: Money::from_cents(500)
        });
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_code() {
        let repo = repo().await;

        repo.upsert(Discount::percent("SAVE", "10% off", 1000))
            .await
            .unwrap();
        // Same code, now a flat amount: the kind columns swap over.
        repo.upsert(Discount::flat("SAVE", "$2 off", Money::from_cents(200)))
            .await
            .unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(matches!(all[0].kind, DiscountKind::Flat { .. }));
    }

    #[tokio::test]
    async fn test_unknown_code_is_none() {
        let repo = repo().await;
        assert!(repo.find_by_code("NOPE").await.unwrap().is_none());
    }
}
