//! # SQLite Repositories
//!
//! One repository struct per table, all runtime-checked `sqlx` queries
//! over the shared pool. Row structs stay private to each module; the
//! public surface speaks the domain types from `mercury-core` and
//! [`catalog`](crate::catalog).

pub mod discount;
pub mod item;
pub mod registry;
pub mod transaction;

pub use discount::DiscountRepository;
pub use item::ItemRepository;
pub use registry::PosRegistryRepository;
pub use transaction::TransactionRepository;
