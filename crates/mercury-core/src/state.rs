//! # Transaction States and the Guard Table
//!
//! One lane owns exactly one transaction state at a time. Request intents
//! move it through the life-cycle below; everything else is rejected and
//! dropped with a diagnostic.
//!
//! ## Life-cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   NOT_STARTED ──REQUEST_START_TRANSACTION──► SCANNING_IN_PROGRESS       │
//! │       ▲                                          │        │             │
//! │       │                              scan/discount│        │payment     │
//! │       │                                  (loops)  │        ▼            │
//! │       │                                          │   AWAITING_PAYMENT   │
//! │       │                                          │    │ payment │       │
//! │       │                                          │    │ (loops) │       │
//! │       │                                          │    ▼         ▼       │
//! │  REQUEST_RESET_POS                               │  COMPLETED◄──complete│
//! │       │                                          │      │               │
//! │       │              REQUEST_VOID_TRANSACTION    ▼      ▼               │
//! │       └──────────────── VOIDED ◄─────────── (any state except           │
//! │                                               NOT_STARTED)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transition table is a `const` and [`guard::evaluate`] is a pure
//! lookup, so the whole state machine is testable without constructing a
//! controller. Note the void guard: it excludes only `NOT_STARTED`, which
//! deliberately allows voiding a `COMPLETED` transaction — the behavior the
//! floor staff rely on for post-sale corrections.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::EventKind;

// =============================================================================
// Transaction State
// =============================================================================

/// The per-lane transaction life-cycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    /// No transaction in flight. The state every boot starts from.
    NotStarted,
    /// A transaction is open and items may be scanned.
    ScanningInProgress,
    /// At least one tender has been entered; scanning is closed.
    AwaitingPayment,
    /// The transaction was abandoned. Terminal until reset.
    Voided,
    /// The transaction was paid in full. Terminal until reset (or void).
    Completed,
}

impl TransactionState {
    /// The wire name, e.g. `SCANNING_IN_PROGRESS`.
    pub const fn name(&self) -> &'static str {
        match self {
            TransactionState::NotStarted => "NOT_STARTED",
            TransactionState::ScanningInProgress => "SCANNING_IN_PROGRESS",
            TransactionState::AwaitingPayment => "AWAITING_PAYMENT",
            TransactionState::Voided => "VOIDED",
            TransactionState::Completed => "COMPLETED",
        }
    }

    /// Whether a transaction record is live in this state.
    ///
    /// The controller holds its transaction reference exactly while this is
    /// true; leaving a live state drops the reference (the persisted record
    /// survives, only the controller lets go of it).
    pub const fn is_live(&self) -> bool {
        matches!(
            self,
            TransactionState::ScanningInProgress | TransactionState::AwaitingPayment
        )
    }

    /// Whether this is a terminal state (only reset or void apply).
    pub const fn is_terminal(&self) -> bool {
        matches!(self, TransactionState::Voided | TransactionState::Completed)
    }

    /// Every state, for exhaustive table tests.
    pub const ALL: [TransactionState; 5] = [
        TransactionState::NotStarted,
        TransactionState::ScanningInProgress,
        TransactionState::AwaitingPayment,
        TransactionState::Voided,
        TransactionState::Completed,
    ];
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Guard Table
// =============================================================================

/// The data-driven request guard table.
pub mod guard {
    use super::TransactionState;
    use crate::event::EventKind;

    /// Which current states a request is legal from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Required {
        /// Exactly one state.
        Only(TransactionState),
        /// Any of the listed states.
        OneOf(&'static [TransactionState]),
        /// Every state except the listed one.
        AnyExcept(TransactionState),
    }

    impl Required {
        /// Whether `state` satisfies this guard.
        pub fn permits(&self, state: TransactionState) -> bool {
            match self {
                Required::Only(only) => state == *only,
                Required::OneOf(states) => states.contains(&state),
                Required::AnyExcept(except) => state != *except,
            }
        }
    }

    /// One row of the guard table: what a request needs and what it does.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Transition {
        /// The request intent this row answers.
        pub request: EventKind,
        /// The guard: states the request is accepted from.
        pub required: Required,
        /// The state the lane moves to on acceptance.
        pub next_state: TransactionState,
        /// The confirmation broadcast after the move.
        pub confirmation: EventKind,
    }

    /// The complete transition table. One row per request kind.
    ///
    /// Ordering is cosmetic (lookup is by request kind); rows follow the
    /// natural flow of a sale.
    pub const TRANSITIONS: [Transition; 7] = [
        Transition {
            request: EventKind::RequestStartTransaction,
            required: Required::Only(TransactionState::NotStarted),
            next_state: TransactionState::ScanningInProgress,
            confirmation: EventKind::TransactionStarted,
        },
        Transition {
            request: EventKind::RequestScanItem,
            required: Required::Only(TransactionState::ScanningInProgress),
            next_state: TransactionState::ScanningInProgress,
            confirmation: EventKind::ItemScanned,
        },
        Transition {
            request: EventKind::RequestApplyDiscount,
            required: Required::Only(TransactionState::ScanningInProgress),
            next_state: TransactionState::ScanningInProgress,
            confirmation: EventKind::DiscountApplied,
        },
        // First tender closes scanning; later tenders keep the state so a
        // sale can be split across cash and card.
        Transition {
            request: EventKind::RequestEnterPayment,
            required: Required::OneOf(&[
                TransactionState::ScanningInProgress,
                TransactionState::AwaitingPayment,
            ]),
            next_state: TransactionState::AwaitingPayment,
            confirmation: EventKind::PaymentEntered,
        },
        Transition {
            request: EventKind::RequestCompleteTransaction,
            required: Required::Only(TransactionState::AwaitingPayment),
            next_state: TransactionState::Completed,
            confirmation: EventKind::TransactionCompleted,
        },
        // Void is legal from anywhere but NOT_STARTED, including COMPLETED.
        Transition {
            request: EventKind::RequestVoidTransaction,
            required: Required::AnyExcept(TransactionState::NotStarted),
            next_state: TransactionState::Voided,
            confirmation: EventKind::TransactionVoided,
        },
        Transition {
            request: EventKind::RequestResetPos,
            required: Required::OneOf(&[
                TransactionState::Voided,
                TransactionState::Completed,
            ]),
            next_state: TransactionState::NotStarted,
            confirmation: EventKind::PosReset,
        },
    ];

    /// Looks up what `request` would do from `state`.
    ///
    /// Returns the matching transition when the guard passes, `None` when
    /// the guard fails or `request` is not a request intent at all. Pure:
    /// the caller decides what a `None` means (the controller drops the
    /// request with a diagnostic).
    pub fn evaluate(state: TransactionState, request: EventKind) -> Option<&'static Transition> {
        TRANSITIONS
            .iter()
            .find(|t| t.request == request)
            .filter(|t| t.required.permits(state))
    }

    /// The table row for `request`, ignoring the current state.
    ///
    /// Used by diagnostics to say what a dropped request *would have*
    /// needed.
    pub fn row_for(request: EventKind) -> Option<&'static Transition> {
        TRANSITIONS.iter().find(|t| t.request == request)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::guard::{evaluate, row_for, Required, TRANSITIONS};
    use super::*;

    /// Applies a request sequence by folding `evaluate`, skipping rejected
    /// requests, exactly as a controller would.
    fn fold(requests: &[EventKind]) -> TransactionState {
        requests.iter().fold(TransactionState::NotStarted, |state, &req| {
            match evaluate(state, req) {
                Some(transition) => transition.next_state,
                None => state,
            }
        })
    }

    #[test]
    fn test_every_request_kind_has_exactly_one_row() {
        for kind in EventKind::ALL.into_iter().filter(EventKind::is_request) {
            let rows = TRANSITIONS.iter().filter(|t| t.request == kind).count();
            assert_eq!(rows, 1, "{kind} must have exactly one table row");
        }
        assert_eq!(TRANSITIONS.len(), 7);
    }

    #[test]
    fn test_confirmations_are_never_requests() {
        for transition in &TRANSITIONS {
            assert!(!transition.confirmation.is_request());
        }
    }

    #[test]
    fn test_happy_path_sale() {
        let state = fold(&[
            EventKind::RequestStartTransaction,
            EventKind::RequestScanItem,
            EventKind::RequestScanItem,
            EventKind::RequestApplyDiscount,
            EventKind::RequestEnterPayment,
            EventKind::RequestCompleteTransaction,
        ]);
        assert_eq!(state, TransactionState::Completed);
    }

    #[test]
    fn test_split_tender_stays_awaiting_payment() {
        let state = fold(&[
            EventKind::RequestStartTransaction,
            EventKind::RequestScanItem,
            EventKind::RequestEnterPayment,
            EventKind::RequestEnterPayment,
        ]);
        assert_eq!(state, TransactionState::AwaitingPayment);

        // Scanning is closed once payment begins.
        assert!(evaluate(state, EventKind::RequestScanItem).is_none());
    }

    #[test]
    fn test_void_rejected_only_from_not_started() {
        assert!(evaluate(
            TransactionState::NotStarted,
            EventKind::RequestVoidTransaction
        )
        .is_none());

        for state in TransactionState::ALL {
            if state == TransactionState::NotStarted {
                continue;
            }
            let transition = evaluate(state, EventKind::RequestVoidTransaction)
                .unwrap_or_else(|| panic!("void must be legal from {state}"));
            assert_eq!(transition.next_state, TransactionState::Voided);
        }
    }

    /// Post-sale correction: voiding an already-completed sale is legal.
    #[test]
    fn test_void_from_completed_is_allowed() {
        let transition =
            evaluate(TransactionState::Completed, EventKind::RequestVoidTransaction).unwrap();
        assert_eq!(transition.next_state, TransactionState::Voided);
        assert_eq!(transition.confirmation, EventKind::TransactionVoided);
    }

    #[test]
    fn test_reset_only_from_terminal_states() {
        for state in TransactionState::ALL {
            let allowed = evaluate(state, EventKind::RequestResetPos).is_some();
            assert_eq!(allowed, state.is_terminal(), "reset from {state}");
        }
    }

    #[test]
    fn test_complete_requires_awaiting_payment() {
        for state in TransactionState::ALL {
            let allowed = evaluate(state, EventKind::RequestCompleteTransaction).is_some();
            assert_eq!(allowed, state == TransactionState::AwaitingPayment);
        }
    }

    #[test]
    fn test_rejected_requests_leave_state_unchanged_in_fold() {
        // Complete before any payment: guard fails, fold stays put, and the
        // follow-up void still applies from SCANNING_IN_PROGRESS.
        let state = fold(&[
            EventKind::RequestStartTransaction,
            EventKind::RequestCompleteTransaction, // dropped
            EventKind::RequestVoidTransaction,
        ]);
        assert_eq!(state, TransactionState::Voided);
    }

    #[test]
    fn test_evaluate_ignores_notification_kinds() {
        for kind in EventKind::ALL.into_iter().filter(|k| !k.is_request()) {
            for state in TransactionState::ALL {
                assert!(evaluate(state, kind).is_none(), "{kind} from {state}");
            }
        }
    }

    #[test]
    fn test_row_for_reports_guard_without_state() {
        let row = row_for(EventKind::RequestCompleteTransaction).unwrap();
        assert_eq!(
            row.required,
            Required::Only(TransactionState::AwaitingPayment)
        );
        assert!(row_for(EventKind::Log).is_none());
    }

    #[test]
    fn test_live_states_match_reference_holding() {
        assert!(TransactionState::ScanningInProgress.is_live());
        assert!(TransactionState::AwaitingPayment.is_live());
        assert!(!TransactionState::NotStarted.is_live());
        assert!(!TransactionState::Voided.is_live());
        assert!(!TransactionState::Completed.is_live());
    }

    #[test]
    fn test_state_wire_names() {
        let json = serde_json::to_string(&TransactionState::ScanningInProgress).unwrap();
        assert_eq!(json, r#""SCANNING_IN_PROGRESS""#);
        assert_eq!(TransactionState::NotStarted.to_string(), "NOT_STARTED");
    }
}
