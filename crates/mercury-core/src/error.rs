//! # Error Types
//!
//! Domain-specific error types for mercury-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mercury-core errors (this file)                                        │
//! │  ├── CoreError       - Identity/property validation                     │
//! │  ├── PropertyError   - Bag reads (property.rs)                          │
//! │  └── StoreError      - Persistence contract failures (store.rs)         │
//! │                                                                         │
//! │  mercury-lane errors (separate crate)                                   │
//! │  └── LaneError       - Boot config + collaborator failures              │
//! │                                                                         │
//! │  mercury-db errors (separate crate)                                     │
//! │  └── DbError         - SQLite failures, mapped into StoreError          │
//! │                                                                         │
//! │  Flow: DbError → StoreError → LaneError → terminal exit code            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (key, lane number, etc.)
//! 3. Errors are enum variants, never String
//! 4. Guard violations are NOT errors — a dropped request is an expected
//!    race between the UI and the state machine, reported on the error
//!    event channel instead

use thiserror::Error;

use crate::property::PropertyError;

// =============================================================================
// Core Error
// =============================================================================

/// Validation failures building core domain values.
///
/// These are configuration-time errors: they occur while wiring a terminal
/// up, never while a lane is running.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lane identity was built without a store name.
    #[error("store name is required")]
    StoreNameRequired,

    /// Lanes are numbered from 1; zero means a wiring bug upstream.
    #[error("lane number must be 1 or greater, got {got}")]
    LaneNumberOutOfRange { got: u32 },

    /// A property read failed while assembling a domain value.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
