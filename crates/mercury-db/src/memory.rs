//! # In-Memory Stores
//!
//! The `dev` mode backends: mutex-guarded maps implementing the same
//! contracts as the SQLite repositories. Also the fixtures every other
//! crate's tests lean on — an in-memory store set behaves exactly like the
//! real one minus the durability.
//!
//! Duplicate detection mirrors the SQLite unique indexes: (pos system,
//! sequence) on transactions, SKU on items, code on discounts, (store,
//! lane) on registrations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use mercury_core::{LaneIdentity, StoreError, TransactionRecord, TransactionStore};

use crate::catalog::{Discount, DiscountStore, Item, ItemStore, PosRegistry};
use crate::error::{DbError, DbResult};

// =============================================================================
// Transaction Store
// =============================================================================

/// In-memory [`TransactionStore`].
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    records: Mutex<Vec<TransactionRecord>>,
}

impl MemoryTransactionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted records (all lanes).
    pub fn len(&self) -> usize {
        self.records.lock().expect("transaction store lock poisoned").len()
    }

    /// Whether nothing was persisted yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every persisted record for one POS system, in persist order.
    pub fn for_pos_system(&self, pos_system_id: Uuid) -> Vec<TransactionRecord> {
        self.records
            .lock()
            .expect("transaction store lock poisoned")
            .iter()
            .filter(|r| r.pos_system_id == pos_system_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn create_and_persist(
        &self,
        identity: &LaneIdentity,
        sequence_number: u64,
    ) -> Result<TransactionRecord, StoreError> {
        let mut records = self.records.lock().expect("transaction store lock poisoned");

        let duplicate = records.iter().any(|r| {
            r.pos_system_id == identity.pos_system_id() && r.sequence_number == sequence_number
        });
        if duplicate {
            return Err(StoreError::Duplicate {
                pos_system_id: identity.pos_system_id(),
                sequence: sequence_number,
            });
        }

        let record = TransactionRecord::create(identity, sequence_number);
        records.push(record.clone());
        Ok(record)
    }
}

// =============================================================================
// Item Store
// =============================================================================

/// In-memory [`ItemStore`], keyed by SKU.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: Mutex<HashMap<String, Item>>,
}

impl MemoryItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.items.lock().expect("item store lock poisoned").len()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn find_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        Ok(self
            .items
            .lock()
            .expect("item store lock poisoned")
            .get(sku)
            .cloned())
    }

    async fn upsert(&self, item: Item) -> DbResult<()> {
        self.items
            .lock()
            .expect("item store lock poisoned")
            .insert(item.sku.clone(), item);
        Ok(())
    }
}

// =============================================================================
// Discount Store
// =============================================================================

/// In-memory [`DiscountStore`], keyed by code.
#[derive(Debug, Default)]
pub struct MemoryDiscountStore {
    discounts: Mutex<HashMap<String, Discount>>,
}

impl MemoryDiscountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiscountStore for MemoryDiscountStore {
    async fn find_by_code(&self, code: &str) -> DbResult<Option<Discount>> {
        Ok(self
            .discounts
            .lock()
            .expect("discount store lock poisoned")
            .get(code)
            .cloned())
    }

    async fn upsert(&self, discount: Discount) -> DbResult<()> {
        self.discounts
            .lock()
            .expect("discount store lock poisoned")
            .insert(discount.code.clone(), discount);
        Ok(())
    }
}

// =============================================================================
// POS Registry
// =============================================================================

/// In-memory [`PosRegistry`], keyed by (store name, lane number).
#[derive(Debug, Default)]
pub struct MemoryPosRegistry {
    lanes: Mutex<HashMap<(String, u32), LaneIdentity>>,
}

impl MemoryPosRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered lanes.
    pub fn len(&self) -> usize {
        self.lanes.lock().expect("registry lock poisoned").len()
    }
}

#[async_trait]
impl PosRegistry for MemoryPosRegistry {
    async fn register_lane(&self, store_name: &str, lane_number: u32) -> DbResult<LaneIdentity> {
        let mut lanes = self.lanes.lock().expect("registry lock poisoned");
        let key = (store_name.to_string(), lane_number);

        if let Some(existing) = lanes.get(&key) {
            return Ok(existing.clone());
        }

        let identity = LaneIdentity::new(store_name, lane_number, Uuid::new_v4())
            .map_err(|e| DbError::Internal(e.to_string()))?;
        lanes.insert(key, identity.clone());
        Ok(identity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mercury_core::Money;

    fn identity() -> LaneIdentity {
        LaneIdentity::new("Main Street", 1, Uuid::new_v4()).unwrap()
    }

    #[tokio::test]
    async fn test_transaction_store_persists_and_rejects_duplicates() {
        let store = MemoryTransactionStore::new();
        let identity = identity();

        let first = store.create_and_persist(&identity, 1).await.unwrap();
        assert_eq!(first.sequence_number, 1);
        assert_eq!(store.len(), 1);

        let err = store.create_and_persist(&identity, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { sequence: 1, .. }));
        assert_eq!(store.len(), 1); // nothing persisted on Err

        store.create_and_persist(&identity, 2).await.unwrap();
        let records = store.for_pos_system(identity.pos_system_id());
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_same_sequence_on_different_lanes_is_fine() {
        let store = MemoryTransactionStore::new();
        let lane_one = identity();
        let lane_two = LaneIdentity::new("Main Street", 2, Uuid::new_v4()).unwrap();

        store.create_and_persist(&lane_one, 1).await.unwrap();
        store.create_and_persist(&lane_two, 1).await.unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_item_store_lookup_and_upsert() {
        let store = MemoryItemStore::new();
        assert!(store.find_by_sku("COKE-330").await.unwrap().is_none());

        store
            .upsert(Item::new("COKE-330", "Coke 330ml", Money::from_cents(199)))
            .await
            .unwrap();
        let item = store.find_by_sku("COKE-330").await.unwrap().unwrap();
        assert_eq!(item.name, "Coke 330ml");

        // Upsert replaces by SKU.
        store
            .upsert(Item::new("COKE-330", "Coke Can", Money::from_cents(209)))
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
        let item = store.find_by_sku("COKE-330").await.unwrap().unwrap();
        assert_eq!(item.price, Money::from_cents(209));
    }

    #[tokio::test]
    async fn test_discount_store_lookup() {
        let store = MemoryDiscountStore::new();
        store
            .upsert(Discount::percent("SAVE10", "10% off", 1000))
            .await
            .unwrap();

        assert!(store.find_by_code("SAVE10").await.unwrap().is_some());
        assert!(store.find_by_code("SAVE99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_registry_is_idempotent_per_lane() {
        let registry = MemoryPosRegistry::new();

        let first = registry.register_lane("Main Street", 1).await.unwrap();
        let again = registry.register_lane("Main Street", 1).await.unwrap();
        assert_eq!(first, again); // same posSystemId, no fork

        let other = registry.register_lane("Main Street", 2).await.unwrap();
        assert_ne!(first.pos_system_id(), other.pos_system_id());
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_registry_rejects_invalid_lane() {
        let registry = MemoryPosRegistry::new();
        assert!(registry.register_lane("Main Street", 0).await.is_err());
        assert!(registry.register_lane("  ", 1).await.is_err());
    }
}
