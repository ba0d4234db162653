//! # Catalog Contracts
//!
//! What the views resolve against before they dispatch a request event: a
//! scanned barcode becomes an [`Item`], a typed code becomes a
//! [`Discount`], and the bootstrap turns a (store, lane) pair into a
//! registered lane identity through the [`PosRegistry`].
//!
//! These are contracts only — `dev` mode wires the in-memory
//! implementations from [`memory`](crate::memory), and the SQLite
//! repositories in [`repository`](crate::repository) cover the same
//! surface for a future `prod` wiring.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mercury_core::{LaneIdentity, Money};

use crate::error::DbResult;

// =============================================================================
// Item
// =============================================================================

/// One sellable item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Primary key.
    pub id: Uuid,
    /// Business key the scanner produces.
    pub sku: String,
    /// Display name for receipts and the customer display.
    pub name: String,
    /// Unit price in integer cents.
    pub price: Money,
    /// Inactive items stay in history but no longer scan.
    pub active: bool,
}

impl Item {
    /// Builds an active item with a fresh id.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            sku: sku.into(),
            name: name.into(),
            price,
            active: true,
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// How a discount reduces a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage off, in basis points (1000 = 10%).
    Percent { bps: u32 },
    /// Fixed amount off, in integer cents.
    Flat { amount: Money },
}

/// One redeemable discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Primary key.
    pub id: Uuid,
    /// Business key the keypad produces.
    pub code: String,
    /// Display text for receipts.
    pub description: String,
    /// How the discount applies.
    pub kind: DiscountKind,
}

impl Discount {
    /// Builds a percentage discount (basis points).
    pub fn percent(code: impl Into<String>, description: impl Into<String>, bps: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            description: description.into(),
            kind: DiscountKind::Percent { bps },
        }
    }

    /// Builds a flat-amount discount.
    pub fn flat(code: impl Into<String>, description: impl Into<String>, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            description: description.into(),
            kind: DiscountKind::Flat { amount },
        }
    }

    /// The amount this discount takes off `subtotal`. Never more than the
    /// subtotal itself: a $5 coupon on a $3 sale takes $3 off.
    pub fn amount_off(&self, subtotal: Money) -> Money {
        let off = match self.kind {
            DiscountKind::Percent { bps } => subtotal.percent_of(bps),
            DiscountKind::Flat { amount } => amount,
        };
        off.min(subtotal)
    }
}

// =============================================================================
// Store Contracts
// =============================================================================

/// Lookup and maintenance of the item catalog.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Finds an item by its SKU. `Ok(None)` for an unknown SKU.
    async fn find_by_sku(&self, sku: &str) -> DbResult<Option<Item>>;

    /// Inserts or replaces an item, keyed by SKU.
    async fn upsert(&self, item: Item) -> DbResult<()>;
}

/// Lookup and maintenance of discounts.
#[async_trait]
pub trait DiscountStore: Send + Sync {
    /// Finds a discount by its code. `Ok(None)` for an unknown code.
    async fn find_by_code(&self, code: &str) -> DbResult<Option<Discount>>;

    /// Inserts or replaces a discount, keyed by code.
    async fn upsert(&self, discount: Discount) -> DbResult<()>;
}

/// Assigns POS system ids to lanes.
#[async_trait]
pub trait PosRegistry: Send + Sync {
    /// Registers a lane, assigning it a fresh `posSystemId`. Idempotent:
    /// re-registering a (store, lane) pair returns the identity it already
    /// has, so a re-booted bootstrap never forks a lane's identity.
    async fn register_lane(&self, store_name: &str, lane_number: u32) -> DbResult<LaneIdentity>;
}

// =============================================================================
// Unit Tests
// =============================================================================
