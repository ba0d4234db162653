//! # mercury-core: Pure Domain Model for Mercury POS
//!
//! This crate is the **heart** of Mercury POS. It contains the event model,
//! the transaction guard table, and the contracts every other crate plugs
//! into, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mercury POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Views / Devices / Test Drivers                  │   │
//! │  │    scanner ──► keypad ──► customer display ──► journal          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch(Event) / on_event(&Event)     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              mercury-lane (LaneController, tick loop)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mercury-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   event   │  │   state   │  │   money   │  │ contracts │   │   │
//! │  │   │ EventKind │  │  guards   │  │   Money   │  │ Listener  │   │   │
//! │  │   │Properties │  │transitions│  │  (cents)  │  │ TxStore   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           mercury-db (TransactionStore implementations)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`event`] - Event kinds and the immutable event value
//! - [`property`] - Typed, string-keyed property bag carried by every event
//! - [`state`] - Transaction states and the request guard table
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`identity`] - Lane identity (store name, lane number, POS system id)
//! - [`listener`] - The event listener contract
//! - [`store`] - The transaction persistence contract
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Guard evaluation is a lookup in a const table
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use mercury_core::event::{Event, EventKind};
//! use mercury_core::state::{guard, TransactionState};
//!
//! // A request intent is just an event with a REQUEST_* kind.
//! let request = Event::new(EventKind::RequestStartTransaction);
//!
//! // Guards are pure: no controller needed to check what a request would do.
//! let transition = guard::evaluate(TransactionState::NotStarted, request.kind())
//!     .expect("start is legal from NOT_STARTED");
//! assert_eq!(transition.next_state, TransactionState::ScanningInProgress);
//! assert_eq!(transition.confirmation, EventKind::TransactionStarted);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod event;
pub mod identity;
pub mod listener;
pub mod money;
pub mod property;
pub mod state;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mercury_core::Event` instead of
// `use mercury_core::event::Event`

pub use error::{CoreError, CoreResult};
pub use event::{Event, EventKind};
pub use identity::LaneIdentity;
pub use listener::EventListener;
pub use money::Money;
pub use property::{Properties, PropertyError, PropertyValue};
pub use state::{guard, TransactionState};
pub use store::{StoreError, TransactionRecord, TransactionStore};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The sequence number assigned to the first transaction on a lane.
///
/// ## Why a constant?
/// Receipt numbering and the duplicate check in every `TransactionStore`
/// implementation key off this value. Sequence numbers count up from here and
/// are never reused for the lifetime of a lane controller, even across
/// boot/shutdown cycles.
pub const FIRST_SEQUENCE: u64 = 1;
