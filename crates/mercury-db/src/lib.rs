//! # mercury-db: Persistence for Mercury POS
//!
//! Implementations of the store contracts behind the lane controller and
//! the dev bootstrap:
//!
//! - [`memory`] - Mutex-guarded in-memory stores, wired by `dev` mode and
//!   used as fixtures everywhere
//! - [`pool`] + [`repository`] - SQLite via `sqlx`: WAL-mode pool,
//!   embedded migrations, one repository struct per table. Library and
//!   test surface only until a `prod` run mode exists to wire it.
//! - [`catalog`] - The item/discount/registration contracts and types the
//!   views resolve scans against
//!
//! The transaction contract itself ([`TransactionStore`]) lives in
//! `mercury-core`, because the lane controller calls it; this crate only
//! supplies backends for it.
//!
//! [`TransactionStore`]: mercury_core::TransactionStore

pub mod catalog;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use catalog::{Discount, DiscountKind, DiscountStore, Item, ItemStore, PosRegistry};
pub use error::{DbError, DbResult};
pub use memory::{
    MemoryDiscountStore, MemoryItemStore, MemoryPosRegistry, MemoryTransactionStore,
};
pub use pool::{Database, DbConfig};
