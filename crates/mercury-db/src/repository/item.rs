//! # Item Repository
//!
//! SQLite persistence for the item catalog.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use mercury_core::Money;

use crate::catalog::{Item, ItemStore};
use crate::error::{DbError, DbResult};

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    sku: String,
    name: String,
    price_cents: i64,
    active: i64,
}

impl ItemRow {
    fn into_item(self) -> DbResult<Item> {
        Ok(Item {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| DbError::decode("items.id", e.to_string()))?,
            sku: self.sku,
            name: self.name,
            price: Money::from_cents(self.price_cents),
            active: self.active != 0,
        })
    }
}

/// Repository for the `items` table.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// All active items, ordered by SKU.
    pub async fn list_active(&self) -> DbResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, sku, name, price_cents, active
            FROM items
            WHERE active = 1
            ORDER BY sku
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn find_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, sku, name, price_cents, active
            FROM items
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ItemRow::into_item).transpose()
    }

    async fn upsert(&self, item: Item) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO items (id, sku, name, price_cents, active)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (sku) DO UPDATE SET
                name = excluded.name,
                price_cents = excluded.price_cents,
                active = excluded.active
            "#,
        )
        .bind(item.id.to_string())
        .bind(&item.sku)
        .bind(&item.name)
        .bind(item.price.cents())
        .bind(item.active as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
