//! # Lane Controller
//!
//! The per-lane transaction state machine and event dispatcher.
//!
//! ## Dispatch Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        dispatch(event)                                  │
//! │                             │                                           │
//! │              ┌──────────────┴──────────────┐                            │
//! │              ▼                             ▼                            │
//! │      notification kind              request intent                      │
//! │              │                             │                            │
//! │              │                     guard::evaluate(state, kind)         │
//! │              │                   ┌─────────┴─────────┐                  │
//! │              │                   ▼                   ▼                  │
//! │              │               guard fails        guard passes            │
//! │              │                   │                   │                  │
//! │              │             ERROR event +     persist (start only),      │
//! │              │             tracing::warn     move state, build          │
//! │              │                   │           confirmation               │
//! │              ▼                   ▼                   ▼                  │
//! │      ┌──────────────────────────────────────────────────┐              │
//! │      │              pending buffer (per-kind FIFO)       │              │
//! │      └──────────────────────────┬───────────────────────┘              │
//! │                                 │ next tick()                           │
//! │                                 ▼                                       │
//! │                     listeners, in registration order                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! State moves *inside* `dispatch`; listeners hear about it on the *next*
//! `tick`. Both take `&mut self`, so the borrow checker enforces the
//! single-driver assumption — no locks, no interior mutability.

use std::sync::Arc;
use tracing::{debug, info, warn};

use mercury_core::property::keys;
use mercury_core::{
    guard, Event, EventKind, EventListener, LaneIdentity, TransactionRecord, TransactionState,
    TransactionStore, FIRST_SEQUENCE,
};

use crate::buffer::PendingBuffer;
use crate::error::{LaneError, LaneResult};

// =============================================================================
// Dispatch Outcome
// =============================================================================

/// What `dispatch` did with an event.
///
/// All three arms are `Ok`: a dropped request is an expected race between
/// a view and the state machine, not a failure. Only collaborator failures
/// surface as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A notification event was buffered verbatim, no guard involved.
    Recorded { kind: EventKind },

    /// A request passed its guard; the state moved and the confirmation is
    /// in the buffer for the next tick.
    Accepted {
        confirmation: EventKind,
        state: TransactionState,
    },

    /// A request failed its guard and was dropped. An `ERROR` diagnostic
    /// is in the buffer; the state did not move.
    Dropped {
        request: EventKind,
        state: TransactionState,
    },
}

// =============================================================================
// Lane Controller
// =============================================================================

/// One checkout lane: state machine, pending buffer, listener registry.
///
/// Constructed through [`LaneController::builder`] with the transaction
/// store injected — there is no global repository to reach into.
pub struct LaneController {
    /// Who this lane is. Must be set before `boot()`.
    identity: Option<LaneIdentity>,

    /// The injected persistence collaborator, consulted only when a start
    /// request passes its guard.
    store: Arc<dyn TransactionStore>,

    /// Whether ticks flush the buffer. Set by `boot`, cleared one tick
    /// after `shutdown`.
    running: bool,

    /// Set by `shutdown`; the next tick flushes and then stops the lane.
    shutting_down: bool,

    /// The transaction life-cycle state. This controller is the sole writer.
    state: TransactionState,

    /// Reference to the live transaction record. `Some` exactly while the
    /// state is live; replaced on start, dropped on void/complete/reset.
    current: Option<TransactionRecord>,

    /// Sequence number the *next* transaction will take. Strictly
    /// increasing for the controller's lifetime, never rewound by a boot.
    next_sequence: u64,

    /// Events accepted since the last tick.
    buffer: PendingBuffer,

    /// Registered observers, in registration order. Identity is `Arc`
    /// pointer identity.
    listeners: Vec<Arc<dyn EventListener>>,
}

impl LaneController {
    /// Starts building a controller around the given transaction store.
    pub fn builder(store: Arc<dyn TransactionStore>) -> LaneControllerBuilder {
        LaneControllerBuilder {
            store,
            identity: None,
        }
    }

    // -------------------------------------------------------------------------
    // Life-cycle
    // -------------------------------------------------------------------------

    /// Boots the lane.
    ///
    /// Resets the transaction state to `NOT_STARTED`, drops any transaction
    /// reference, marks the lane running, and records a `POS_BOOTUP`
    /// notification for the next tick. The sequence counter deliberately
    /// survives a re-boot: numbers are never reused within a process run.
    ///
    /// ## Errors
    /// [`LaneError::IdentityRequired`] if no identity was set. Fatal: the
    /// lane must not proceed.
    pub fn boot(&mut self) -> LaneResult<()> {
        let identity = self.identity.clone().ok_or(LaneError::IdentityRequired)?;

        self.state = TransactionState::NotStarted;
        self.current = None;
        self.shutting_down = false;
        self.running = true;
        self.buffer.record(Event::bootup(&identity));

        info!(lane = %identity, "lane booted");
        Ok(())
    }

    /// Shuts the lane down.
    ///
    /// Resets the transaction state, drops the transaction reference, and
    /// records a `POS_SHUTDOWN` notification. The lane keeps running until
    /// the *next* tick so that listeners still observe the shutdown event;
    /// that tick flushes and then stops the lane.
    pub fn shutdown(&mut self) {
        self.state = TransactionState::NotStarted;
        self.current = None;

        let event = match &self.identity {
            Some(identity) => Event::shutdown(identity),
            None => Event::new(EventKind::PosShutdown),
        };
        self.buffer.record(event);
        self.shutting_down = true;

        debug!("lane shutting down, final flush on next tick");
    }

    /// Flushes the pending buffer to the registered listeners.
    ///
    /// No-op while the lane is not running. Each listener receives, in
    /// global acceptance order, every buffered event whose kind it declared
    /// interest in; afterwards the buffer is empty. When a shutdown is
    /// pending the lane stops as the final step, so the shutdown
    /// notification still goes out in this same tick.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        if !self.buffer.is_empty() {
            // Snapshot: registrations made while the batch is in flight
            // affect the next tick, not this one.
            let listeners = self.listeners.clone();
            let batch = self.buffer.drain_sorted();

            for listener in &listeners {
                for event in &batch {
                    if listener.wants(event.kind()) {
                        listener.on_event(event);
                    }
                }
            }
        }

        if self.shutting_down {
            self.shutting_down = false;
            self.running = false;
            info!("lane stopped");
        }
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Accepts an event from a view, device, or test driver.
    ///
    /// Notification kinds are buffered verbatim. Request intents are
    /// checked against the guard table: a failing guard drops the request
    /// with an `ERROR` diagnostic (state untouched), a passing guard moves
    /// the state synchronously and buffers the confirmation for the next
    /// tick. The confirmation carries the request's properties plus the
    /// lane identity and, while a transaction is live, its id and sequence
    /// number.
    ///
    /// ## Errors
    /// Only collaborator failures: a failed persist during a start request
    /// aborts with no state change (state, reference, and sequence counter
    /// all untouched).
    pub async fn dispatch(&mut self, event: Event) -> LaneResult<DispatchOutcome> {
        let kind = event.kind();

        if !kind.is_request() {
            self.buffer.record(event);
            return Ok(DispatchOutcome::Recorded { kind });
        }

        let Some(transition) = guard::evaluate(self.state, kind) else {
            let message = format!("{} dropped: lane is {}", kind, self.state);
            warn!(request = %kind, state = %self.state, "request dropped by guard");
            self.buffer.record(Event::error(message));
            return Ok(DispatchOutcome::Dropped {
                request: kind,
                state: self.state,
            });
        };

        // Starting a transaction is the one request with a side effect:
        // the store persists a record before any state moves, so an Err
        // here leaves the lane exactly as it was.
        if kind == EventKind::RequestStartTransaction {
            let identity = self.identity.as_ref().ok_or(LaneError::IdentityRequired)?;
            let record = self
                .store
                .create_and_persist(identity, self.next_sequence)
                .await?;

            debug!(
                transaction_id = %record.id,
                sequence = record.sequence_number,
                "transaction persisted"
            );
            self.current = Some(record);
            self.next_sequence += 1;
        }

        self.state = transition.next_state;

        // Stamp before dropping the reference: a completion or void still
        // names the transaction it ended.
        let mut confirmation =
            Event::with_properties(transition.confirmation, event.properties().clone());
        if let Some(identity) = &self.identity {
            confirmation = confirmation.with_identity(identity);
        }
        if let Some(record) = &self.current {
            confirmation = confirmation
                .with(keys::TRANSACTION_ID, record.id.to_string())
                .with(keys::SEQUENCE_NUMBER, record.sequence_number);
        }

        if !self.state.is_live() {
            self.current = None;
        }

        debug!(request = %kind, confirmation = %transition.confirmation, state = %self.state,
            "request accepted");
        self.buffer.record(confirmation);

        Ok(DispatchOutcome::Accepted {
            confirmation: transition.confirmation,
            state: self.state,
        })
    }

    // -------------------------------------------------------------------------
    // Listener registry
    // -------------------------------------------------------------------------

    /// Registers a listener. Idempotent: registering the same `Arc` twice
    /// keeps a single entry at its original position.
    pub fn register(&mut self, listener: Arc<dyn EventListener>) {
        let already = self.listeners.iter().any(|l| Arc::ptr_eq(l, &listener));
        if !already {
            self.listeners.push(listener);
        }
    }

    /// Unregisters a listener. Idempotent: unknown listeners are ignored.
    pub fn unregister(&mut self, listener: &Arc<dyn EventListener>) {
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The lane's identity, when set.
    pub fn identity(&self) -> Option<&LaneIdentity> {
        self.identity.as_ref()
    }

    /// Sets the lane identity. Must happen before `boot()`.
    pub fn set_identity(&mut self, identity: LaneIdentity) {
        self.identity = Some(identity);
    }

    /// The current transaction life-cycle state.
    pub const fn state(&self) -> TransactionState {
        self.state
    }

    /// Whether the lane is currently running (ticks flush the buffer).
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The live transaction record, while one exists.
    pub fn current_transaction(&self) -> Option<&TransactionRecord> {
        self.current.as_ref()
    }

    /// The sequence number the next transaction will take.
    pub const fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Number of events waiting for the next tick.
    pub fn pending_count(&self) -> usize {
        self.buffer.len()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`LaneController`].
pub struct LaneControllerBuilder {
    store: Arc<dyn TransactionStore>,
    identity: Option<LaneIdentity>,
}

impl LaneControllerBuilder {
    /// Sets the lane identity up front. Without this, `set_identity` must
    /// be called before `boot()`.
    pub fn with_identity(mut self, identity: LaneIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Builds the controller. Not running until `boot()`.
    pub fn build(self) -> LaneController {
        LaneController {
            identity: self.identity,
            store: self.store,
            running: false,
            shutting_down: false,
            state: TransactionState::NotStarted,
            current: None,
            next_sequence: FIRST_SEQUENCE,
            buffer: PendingBuffer::new(),
            listeners: Vec::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mercury_core::StoreError;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Store that accepts everything and remembers what it persisted.
    #[derive(Default)]
    struct RecordingStore {
        persisted: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl TransactionStore for RecordingStore {
        async fn create_and_persist(
            &self,
            identity: &LaneIdentity,
            sequence_number: u64,
        ) -> Result<TransactionRecord, StoreError> {
            self.persisted.lock().unwrap().push(sequence_number);
            Ok(TransactionRecord::create(identity, sequence_number))
        }
    }

    /// Store that is always down.
    struct OfflineStore;

    #[async_trait]
    impl TransactionStore for OfflineStore {
        async fn create_and_persist(
            &self,
            _identity: &LaneIdentity,
            _sequence_number: u64,
        ) -> Result<TransactionRecord, StoreError> {
            Err(StoreError::Unavailable {
                reason: "store offline".to_string(),
            })
        }
    }

    /// Listener that records what it was delivered.
    struct Recorder {
        interests: Vec<EventKind>,
        seen: Mutex<Vec<Event>>,
    }

    impl Recorder {
        fn new(interests: &[EventKind]) -> Arc<Self> {
            Arc::new(Self {
                interests: interests.to_vec(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn kinds(&self) -> Vec<EventKind> {
            self.seen.lock().unwrap().iter().map(Event::kind).collect()
        }

        fn events(&self) -> Vec<Event> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl EventListener for Recorder {
        fn interests(&self) -> &[EventKind] {
            &self.interests
        }

        fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.clone());
        }
    }

    fn identity() -> LaneIdentity {
        LaneIdentity::new("Main Street", 1, Uuid::new_v4()).unwrap()
    }

    fn lane() -> LaneController {
        LaneController::builder(Arc::new(RecordingStore::default()))
            .with_identity(identity())
            .build()
    }

    #[test]
    fn test_boot_without_identity_is_fatal() {
        let mut lane = LaneController::builder(Arc::new(RecordingStore::default())).build();
        let err = lane.boot().unwrap_err();
        assert!(err.is_config_error());
        assert!(!lane.is_running());
    }

    #[test]
    fn test_set_identity_then_boot() {
        let mut lane = LaneController::builder(Arc::new(RecordingStore::default())).build();
        lane.set_identity(identity());
        lane.boot().unwrap();
        assert!(lane.is_running());
        assert_eq!(lane.state(), TransactionState::NotStarted);
        assert_eq!(lane.pending_count(), 1); // POS_BOOTUP
    }

    #[tokio::test]
    async fn test_boot_start_tick_delivers_in_order() {
        let mut lane = lane();
        let listener = Recorder::new(&[EventKind::PosBootup, EventKind::TransactionStarted]);
        lane.register(listener.clone());

        lane.boot().unwrap();
        let outcome = lane
            .dispatch(Event::new(EventKind::RequestStartTransaction))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome::Accepted {
                confirmation: EventKind::TransactionStarted,
                state: TransactionState::ScanningInProgress,
            }
        );

        // Nothing delivered before the tick.
        assert!(listener.kinds().is_empty());

        lane.tick();
        assert_eq!(
            listener.kinds(),
            vec![EventKind::PosBootup, EventKind::TransactionStarted]
        );
        assert_eq!(lane.state(), TransactionState::ScanningInProgress);
        assert_eq!(lane.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_confirmation_carries_identity_and_transaction() {
        let mut lane = lane();
        let listener = Recorder::new(&[EventKind::TransactionStarted]);
        lane.register(listener.clone());

        lane.boot().unwrap();
        lane.dispatch(Event::new(EventKind::RequestStartTransaction))
            .await
            .unwrap();
        lane.tick();

        let started = &listener.events()[0];
        assert_eq!(started.text(keys::STORE_NAME).unwrap(), "Main Street");
        assert_eq!(started.int(keys::LANE_NUMBER).unwrap(), 1);
        assert_eq!(started.int(keys::SEQUENCE_NUMBER).unwrap(), 1);

        let id: Uuid = started.text(keys::TRANSACTION_ID).unwrap().parse().unwrap();
        assert_eq!(id, lane.current_transaction().unwrap().id);
    }

    #[tokio::test]
    async fn test_void_from_not_started_is_dropped() {
        let mut lane = lane();
        let listener = Recorder::new(&[EventKind::TransactionVoided, EventKind::Error]);
        lane.register(listener.clone());
        lane.boot().unwrap();

        let outcome = lane
            .dispatch(Event::new(EventKind::RequestVoidTransaction))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome::Dropped {
                request: EventKind::RequestVoidTransaction,
                state: TransactionState::NotStarted,
            }
        );
        assert_eq!(lane.state(), TransactionState::NotStarted);

        lane.tick();
        // The diagnostic arrives; no TRANSACTION_VOIDED was ever buffered.
        assert_eq!(listener.kinds(), vec![EventKind::Error]);
        let diagnostic = &listener.events()[0];
        assert!(diagnostic
            .text(keys::MESSAGE)
            .unwrap()
            .contains("REQUEST_VOID_TRANSACTION dropped"));
    }

    #[tokio::test]
    async fn test_premature_complete_dropped_then_void_accepted() {
        let mut lane = lane();
        lane.boot().unwrap();
        lane.dispatch(Event::new(EventKind::RequestStartTransaction))
            .await
            .unwrap();

        // Complete needs AWAITING_PAYMENT; from SCANNING_IN_PROGRESS it drops.
        let outcome = lane
            .dispatch(Event::new(EventKind::RequestCompleteTransaction))
            .await
            .unwrap();
        assert!(matches!(outcome, DispatchOutcome::Dropped { .. }));
        assert_eq!(lane.state(), TransactionState::ScanningInProgress);

        let outcome = lane
            .dispatch(Event::new(EventKind::RequestVoidTransaction))
            .await
            .unwrap();
        assert!(matches!(outcome, DispatchOutcome::Accepted { .. }));
        assert_eq!(lane.state(), TransactionState::Voided);
        assert!(lane.current_transaction().is_none());
    }

    #[tokio::test]
    async fn test_sequence_numbers_strictly_increase() {
        let store = Arc::new(RecordingStore::default());
        let mut lane = LaneController::builder(store.clone())
            .with_identity(identity())
            .build();
        lane.boot().unwrap();

        for expected in 1..=3u64 {
            lane.dispatch(Event::new(EventKind::RequestStartTransaction))
                .await
                .unwrap();
            assert_eq!(
                lane.current_transaction().unwrap().sequence_number,
                expected
            );
            lane.dispatch(Event::new(EventKind::RequestVoidTransaction))
                .await
                .unwrap();
            lane.dispatch(Event::new(EventKind::RequestResetPos))
                .await
                .unwrap();
        }

        assert_eq!(*store.persisted.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(lane.next_sequence(), 4);
    }

    #[tokio::test]
    async fn test_sequence_survives_reboot() {
        let mut lane = lane();
        lane.boot().unwrap();
        lane.dispatch(Event::new(EventKind::RequestStartTransaction))
            .await
            .unwrap();

        lane.shutdown();
        lane.tick();
        lane.boot().unwrap();

        lane.dispatch(Event::new(EventKind::RequestStartTransaction))
            .await
            .unwrap();
        assert_eq!(lane.current_transaction().unwrap().sequence_number, 2);
    }

    #[test]
    fn test_tick_with_empty_buffer_invokes_nobody() {
        let mut lane = lane();
        let listener = Recorder::new(&EventKind::ALL);
        lane.register(listener.clone());

        lane.boot().unwrap();
        lane.tick(); // flushes POS_BOOTUP
        lane.tick(); // empty
        lane.tick(); // empty

        assert_eq!(listener.kinds(), vec![EventKind::PosBootup]);
        assert_eq!(lane.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_delivers_then_stops() {
        let mut lane = lane();
        let listener = Recorder::new(&EventKind::ALL);
        lane.register(listener.clone());

        lane.boot().unwrap();
        lane.tick();
        lane.shutdown();
        assert!(lane.is_running()); // stop is deferred to the next tick

        lane.tick();
        assert_eq!(
            listener.kinds(),
            vec![EventKind::PosBootup, EventKind::PosShutdown]
        );
        assert!(!lane.is_running());

        // A stopped lane still accepts dispatches into the buffer, but
        // ticks no longer flush them.
        lane.dispatch(Event::log("after shutdown")).await.unwrap();
        lane.tick();
        assert_eq!(listener.kinds().len(), 2);
        assert_eq!(lane.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_leaves_lane_untouched() {
        let mut lane = LaneController::builder(Arc::new(OfflineStore))
            .with_identity(identity())
            .build();
        let listener = Recorder::new(&[EventKind::TransactionStarted]);
        lane.register(listener.clone());
        lane.boot().unwrap();

        let err = lane
            .dispatch(Event::new(EventKind::RequestStartTransaction))
            .await
            .unwrap_err();
        assert!(err.is_retryable());

        // No partial transition: state, reference, and sequence unchanged.
        assert_eq!(lane.state(), TransactionState::NotStarted);
        assert!(lane.current_transaction().is_none());
        assert_eq!(lane.next_sequence(), 1);

        lane.tick();
        assert!(listener.kinds().is_empty());
    }

    #[tokio::test]
    async fn test_notifications_are_recorded_verbatim() {
        let mut lane = lane();
        let listener = Recorder::new(&[EventKind::Log]);
        lane.register(listener.clone());
        lane.boot().unwrap();

        let outcome = lane.dispatch(Event::log("drawer opened")).await.unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome::Recorded {
                kind: EventKind::Log
            }
        );

        lane.tick();
        let delivered = &listener.events()[0];
        assert_eq!(delivered.text(keys::MESSAGE).unwrap(), "drawer opened");
    }

    #[tokio::test]
    async fn test_listeners_only_hear_their_interests() {
        let mut lane = lane();
        let boot_watcher = Recorder::new(&[EventKind::PosBootup]);
        let everything = Recorder::new(&EventKind::ALL);
        let nothing = Recorder::new(&[]);
        lane.register(boot_watcher.clone());
        lane.register(everything.clone());
        lane.register(nothing.clone());

        lane.boot().unwrap();
        lane.dispatch(Event::new(EventKind::RequestStartTransaction))
            .await
            .unwrap();
        lane.tick();

        assert_eq!(boot_watcher.kinds(), vec![EventKind::PosBootup]);
        assert_eq!(
            everything.kinds(),
            vec![EventKind::PosBootup, EventKind::TransactionStarted]
        );
        assert!(nothing.kinds().is_empty());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut lane = lane();
        let listener = Recorder::new(&[EventKind::Log]);
        lane.register(listener.clone());
        lane.register(listener.clone());
        assert_eq!(lane.listener_count(), 1);

        let as_dyn: Arc<dyn EventListener> = listener;
        lane.unregister(&as_dyn);
        lane.unregister(&as_dyn); // second removal is a no-op
        assert_eq!(lane.listener_count(), 0);
    }

    /// The controller's state after any request sequence equals the pure
    /// fold of the guard table over it, skipping failed guards.
    #[tokio::test]
    async fn test_state_matches_guard_table_fold() {
        let requests = [
            EventKind::RequestScanItem,            // dropped: NOT_STARTED
            EventKind::RequestStartTransaction,    // accepted
            EventKind::RequestStartTransaction,    // dropped: already started
            EventKind::RequestScanItem,            // accepted
            EventKind::RequestApplyDiscount,       // accepted
            EventKind::RequestEnterPayment,        // accepted
            EventKind::RequestScanItem,            // dropped: payment begun
            EventKind::RequestEnterPayment,        // accepted: split tender
            EventKind::RequestCompleteTransaction, // accepted
            EventKind::RequestVoidTransaction,     // accepted: post-sale void
            EventKind::RequestResetPos,            // accepted
        ];

        let expected = requests
            .iter()
            .fold(TransactionState::NotStarted, |state, &req| {
                guard::evaluate(state, req).map_or(state, |t| t.next_state)
            });

        let mut lane = lane();
        lane.boot().unwrap();
        for request in requests {
            lane.dispatch(Event::new(request)).await.unwrap();
        }

        assert_eq!(lane.state(), expected);
        assert_eq!(lane.state(), TransactionState::NotStarted);
    }
}
