//! # mercury-lane: The Lane Controller Core
//!
//! One [`LaneController`] per physical checkout lane. It owns the lane's
//! transaction state machine, accepts events from views and devices through
//! [`dispatch`](LaneController::dispatch), and tells listeners what happened
//! once per [`tick`](LaneController::tick) — never earlier.
//!
//! ## The Two Clocks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ANY TIME (views, devices, tests)        ONCE PER TICK (driver loop)   │
//! │                                                                         │
//! │   dispatch(event)                          tick()                       │
//! │        │                                     │                          │
//! │        ▼                                     ▼                          │
//! │   guard check ──► state moves NOW       flush buffer ──► listeners      │
//! │        │                                 hear about it NOW              │
//! │        ▼                                                                │
//! │   confirmation ──► pending buffer                                       │
//! │                                                                         │
//! │   State transitions are synchronous inside dispatch.                    │
//! │   Listener notification is deferred to the next tick.                   │
//! │   Collapsing these two clocks breaks delivery ordering.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`controller`] - The per-lane state machine and dispatcher
//! - [`buffer`] - The pending notification buffer flushed by each tick
//! - [`composite`] - Boot/tick/shutdown fan-out over all lanes of a store
//! - [`error`] - Lane error types
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mercury_core::{Event, EventKind, LaneIdentity, StoreError, TransactionRecord,
//!     TransactionStore};
//! use mercury_lane::controller::{DispatchOutcome, LaneController};
//!
//! struct InMemory;
//!
//! #[async_trait::async_trait]
//! impl TransactionStore for InMemory {
//!     async fn create_and_persist(
//!         &self,
//!         identity: &LaneIdentity,
//!         sequence_number: u64,
//!     ) -> Result<TransactionRecord, StoreError> {
//!         Ok(TransactionRecord::create(identity, sequence_number))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), mercury_lane::error::LaneError> {
//! let identity = LaneIdentity::new("Main Street", 1, uuid::Uuid::new_v4()).unwrap();
//! let mut lane = LaneController::builder(Arc::new(InMemory))
//!     .with_identity(identity)
//!     .build();
//!
//! lane.boot()?;
//! let outcome = lane.dispatch(Event::new(EventKind::RequestStartTransaction)).await?;
//! assert!(matches!(outcome, DispatchOutcome::Accepted { .. }));
//! lane.tick(); // listeners (if registered) hear POS_BOOTUP, TRANSACTION_STARTED
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod composite;
pub mod controller;
pub mod error;

pub use buffer::PendingBuffer;
pub use composite::StoreComposite;
pub use controller::{DispatchOutcome, LaneController, LaneControllerBuilder};
pub use error::{BootError, BootFailure, LaneError, LaneResult};
