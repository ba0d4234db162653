//! # Transaction Persistence Contract
//!
//! The lane controller does not know where transactions live. When a start
//! request passes its guard, the controller asks its injected
//! [`TransactionStore`] to create and persist a record, holds the returned
//! reference while the transaction is live, and lets go of it when the lane
//! leaves the live states.
//!
//! Implementations are in `mercury-db`: an in-memory store for dev mode and
//! a SQLite-backed repository. Both are injected at controller construction
//! time — there is no global registry to reach into.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::identity::LaneIdentity;

// =============================================================================
// Transaction Record
// =============================================================================

/// One persisted transaction, as returned by the store.
///
/// The controller treats this as an opaque reference: it stamps the id and
/// sequence onto confirmation events and otherwise never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Primary key, assigned by the store.
    pub id: Uuid,
    /// Store name at creation time (denormalized for the journal).
    pub store_name: String,
    /// Lane number at creation time.
    pub lane_number: u32,
    /// The lane's registry-assigned id.
    pub pos_system_id: Uuid,
    /// Per-lane sequence number, strictly increasing from 1.
    pub sequence_number: u64,
    /// When the store accepted the record.
    pub started_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Builds a fresh record for `identity` with a new v4 id, stamped now.
    ///
    /// Store implementations call this at the top of `create_and_persist`
    /// so every backend assigns ids and timestamps the same way.
    pub fn create(identity: &LaneIdentity, sequence_number: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            store_name: identity.store_name().to_string(),
            lane_number: identity.lane_number(),
            pos_system_id: identity.pos_system_id(),
            sequence_number,
            started_at: Utc::now(),
        }
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// Failure persisting a transaction.
///
/// A failed persist aborts the start request with no state change on the
/// lane; the caller of `dispatch` decides whether to retry.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the write.
    #[error("transaction store unavailable: {reason}")]
    Unavailable { reason: String },

    /// A record with this (lane, sequence) pair already exists. Sequence
    /// numbers are never reused, so this means two controllers share an
    /// identity or a sequence counter was rewound.
    #[error("transaction {sequence} already persisted for POS {pos_system_id}")]
    Duplicate {
        pos_system_id: Uuid,
        sequence: u64,
    },
}

impl StoreError {
    /// Whether retrying the same request can succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

// =============================================================================
// Transaction Store Contract
// =============================================================================

/// The persistence collaborator injected into every lane controller.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Creates and persists a new transaction record for `identity` with
    /// the given per-lane sequence number.
    ///
    /// Must be atomic: on `Err` nothing was persisted.
    async fn create_and_persist(
        &self,
        identity: &LaneIdentity,
        sequence_number: u64,
    ) -> Result<TransactionRecord, StoreError>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_copies_identity_fields() {
        let identity = LaneIdentity::new("Main Street", 2, Uuid::new_v4()).unwrap();
        let record = TransactionRecord::create(&identity, 7);

        assert_eq!(record.store_name, "Main Street");
        assert_eq!(record.lane_number, 2);
        assert_eq!(record.pos_system_id, identity.pos_system_id());
        assert_eq!(record.sequence_number, 7);
        assert_ne!(record.id, Uuid::nil());
    }

    #[test]
    fn test_error_messages_and_retryability() {
        let unavailable = StoreError::Unavailable {
            reason: "pool exhausted".to_string(),
        };
        assert_eq!(
            unavailable.to_string(),
            "transaction store unavailable: pool exhausted"
        );
        assert!(unavailable.is_retryable());

        let duplicate = StoreError::Duplicate {
            pos_system_id: Uuid::nil(),
            sequence: 4,
        };
        assert!(duplicate.to_string().contains("already persisted"));
        assert!(!duplicate.is_retryable());
    }
}
