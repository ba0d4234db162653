//! # Lane Error Types
//!
//! Error types for the lane controller and the store composite.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                                  │
//! │                                                                         │
//! │  StoreError (mercury-core contract)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LaneError (this module) ← Adds the boot configuration case             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BootError (composite) ← Collects per-lane boot failures                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Terminal exit code / journal line                                      │
//! │                                                                         │
//! │  NOT IN THIS PICTURE: guard violations. A request arriving in the       │
//! │  wrong state is an expected race, reported on the ERROR event channel   │
//! │  and returned as DispatchOutcome::Dropped — never as an Err.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use mercury_core::{LaneIdentity, StoreError};

// =============================================================================
// Lane Error
// =============================================================================

/// Failures of a single lane controller.
#[derive(Debug, Error)]
pub enum LaneError {
    /// `boot()` (or a start request) was issued before the lane identity
    /// was set. This is a wiring bug in the bootstrap, not a runtime
    /// condition: the affected lane must not proceed.
    #[error("lane identity required before boot")]
    IdentityRequired,

    /// The transaction persistence collaborator failed. The start request
    /// is aborted with no state change; the caller decides whether to
    /// retry.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LaneError {
    /// Whether this is a fatal configuration error (the lane must not
    /// continue) as opposed to a recoverable collaborator failure.
    pub const fn is_config_error(&self) -> bool {
        matches!(self, LaneError::IdentityRequired)
    }

    /// Whether retrying the failed operation can succeed.
    pub const fn is_retryable(&self) -> bool {
        match self {
            LaneError::IdentityRequired => false,
            LaneError::Store(e) => e.is_retryable(),
        }
    }
}

/// Result type for lane operations.
pub type LaneResult<T> = Result<T, LaneError>;

// =============================================================================
// Composite Boot Error
// =============================================================================

/// One lane's boot failure, as collected by the composite.
#[derive(Debug)]
pub struct BootFailure {
    /// Position of the lane in registration order.
    pub lane_index: usize,
    /// The lane's identity, when it had one. A lane that failed with
    /// [`LaneError::IdentityRequired`] has none — that is the failure.
    pub identity: Option<LaneIdentity>,
    /// The underlying error.
    pub error: LaneError,
}

/// Aggregate failure from [`boot_all`](crate::StoreComposite::boot_all).
///
/// The composite never short-circuits: every lane gets its boot attempt,
/// and this error carries one [`BootFailure`] per lane that refused. Lanes
/// not listed here booted normally and are running.
#[derive(Debug, Error)]
pub struct BootError {
    /// The lanes that failed to boot, in registration order.
    pub failures: Vec<BootFailure>,
}

impl BootError {
    /// Number of lanes that failed to boot.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// True when no lane failed (never constructed this way by the
    /// composite, but keeps the type honest).
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl std::fmt::Display for BootError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} lane(s) failed to boot:", self.failures.len())?;
        for failure in &self.failures {
            match &failure.identity {
                Some(identity) => {
                    write!(f, " [{} ({}): {}]", failure.lane_index, identity, failure.error)?
                }
                None => write!(f, " [{}: {}]", failure.lane_index, failure.error)?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_identity_required_is_fatal_config() {
        let err = LaneError::IdentityRequired;
        assert!(err.is_config_error());
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "lane identity required before boot");
    }

    #[test]
    fn test_store_errors_are_recoverable() {
        let err = LaneError::from(StoreError::Unavailable {
            reason: "pool exhausted".to_string(),
        });
        assert!(!err.is_config_error());
        assert!(err.is_retryable());
        // Transparent: the store error's own message surfaces.
        assert_eq!(
            err.to_string(),
            "transaction store unavailable: pool exhausted"
        );
    }

    #[test]
    fn test_boot_error_names_each_failed_lane() {
        let identity = LaneIdentity::new("Main Street", 2, Uuid::nil()).unwrap();
        let err = BootError {
            failures: vec![
                BootFailure {
                    lane_index: 0,
                    identity: None,
                    error: LaneError::IdentityRequired,
                },
                BootFailure {
                    lane_index: 2,
                    identity: Some(identity),
                    error: LaneError::IdentityRequired,
                },
            ],
        };

        let rendered = err.to_string();
        assert!(rendered.starts_with("2 lane(s) failed to boot:"));
        assert!(rendered.contains("[0: lane identity required before boot]"));
        assert!(rendered.contains("Main Street/lane 2"));
        assert_eq!(err.len(), 2);
        assert!(!err.is_empty());
    }
}
