//! # Store Composite
//!
//! A store is an ordered collection of lanes. The composite owns no
//! transaction state of its own; it fans the three life-cycle calls out to
//! every lane in registration order and otherwise hands out access to
//! individual lanes so views and the bootstrap can dispatch into them.
//!
//! ## Boot Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  boot_all()                                                             │
//! │     │                                                                   │
//! │     ├── lane 0: boot() ✓                                                │
//! │     ├── lane 1: boot() ✗ IdentityRequired ──┐                           │
//! │     ├── lane 2: boot() ✓                    │  collected, NOT            │
//! │     └── lane 3: boot() ✗ ──────────────────┤  short-circuited           │
//! │                                             ▼                           │
//! │     Err(BootError { failures: [lane 1, lane 3] })                       │
//! │                                                                         │
//! │  Lanes 0 and 2 are running. One lane's broken wiring never keeps the    │
//! │  rest of the store closed.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::controller::LaneController;
use crate::error::{BootError, BootFailure};

/// An ordered collection of lane controllers for one store.
#[derive(Default)]
pub struct StoreComposite {
    lanes: Vec<LaneController>,
}

impl StoreComposite {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a lane, returning its index. Iteration and life-cycle fan-out
    /// follow this registration order.
    pub fn add_lane(&mut self, lane: LaneController) -> usize {
        self.lanes.push(lane);
        self.lanes.len() - 1
    }

    /// Number of registered lanes.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Whether the composite has no lanes.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// The lane at `index`, if any.
    pub fn lane(&self, index: usize) -> Option<&LaneController> {
        self.lanes.get(index)
    }

    /// Mutable access to the lane at `index` (for `dispatch`).
    pub fn lane_mut(&mut self, index: usize) -> Option<&mut LaneController> {
        self.lanes.get_mut(index)
    }

    /// Iterates lanes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &LaneController> {
        self.lanes.iter()
    }

    /// Iterates lanes mutably in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LaneController> {
        self.lanes.iter_mut()
    }

    // -------------------------------------------------------------------------
    // Life-cycle fan-out
    // -------------------------------------------------------------------------

    /// Boots every lane in registration order.
    ///
    /// Never short-circuits: every lane gets its boot attempt, and the
    /// failures are collected into one [`BootError`] so the caller sees
    /// which lanes refused and why. `Ok` means the whole store is running.
    pub fn boot_all(&mut self) -> Result<(), BootError> {
        let mut failures = Vec::new();

        for (lane_index, lane) in self.lanes.iter_mut().enumerate() {
            if let Err(error) = lane.boot() {
                failures.push(BootFailure {
                    lane_index,
                    identity: lane.identity().cloned(),
                    error,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(BootError { failures })
        }
    }

    /// Ticks every lane in registration order. Infallible: a lane that is
    /// not running ignores its tick.
    pub fn tick_all(&mut self) {
        for lane in &mut self.lanes {
            lane.tick();
        }
    }

    /// Shuts every lane down in registration order. The lanes stop after
    /// their next tick, so callers should follow this with one more
    /// `tick_all` to flush the shutdown notifications.
    pub fn shutdown_all(&mut self) {
        for lane in &mut self.lanes {
            lane.shutdown();
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
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    use mercury_core::{
        Event, EventKind, EventListener, LaneIdentity, StoreError, TransactionRecord,
        TransactionStore,
    };

    struct AcceptingStore;

    #[async_trait]
    impl TransactionStore for AcceptingStore {
        async fn create_and_persist(
            &self,
            identity: &LaneIdentity,
            sequence_number: u64,
        ) -> Result<TransactionRecord, StoreError> {
            Ok(TransactionRecord::create(identity, sequence_number))
        }
    }

    struct KindRecorder {
        seen: Mutex<Vec<EventKind>>,
    }

    impl KindRecorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl EventListener for KindRecorder {
        fn interests(&self) -> &[EventKind] {
            &[EventKind::PosBootup, EventKind::PosShutdown]
        }

        fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.kind());
        }
    }

    fn lane_with_identity(number: u32) -> LaneController {
        LaneController::builder(Arc::new(AcceptingStore))
            .with_identity(LaneIdentity::new("Main Street", number, Uuid::new_v4()).unwrap())
            .build()
    }

    fn lane_without_identity() -> LaneController {
        LaneController::builder(Arc::new(AcceptingStore)).build()
    }

    #[test]
    fn test_boot_all_continues_past_failures() {
        let mut store = StoreComposite::new();
        store.add_lane(lane_with_identity(1));
        store.add_lane(lane_without_identity());
        store.add_lane(lane_with_identity(3));
        store.add_lane(lane_without_identity());

        let err = store.boot_all().unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.failures[0].lane_index, 1);
        assert_eq!(err.failures[1].lane_index, 3);
        assert!(err.failures.iter().all(|f| f.error.is_config_error()));

        // The healthy lanes booted anyway.
        assert!(store.lane(0).unwrap().is_running());
        assert!(!store.lane(1).unwrap().is_running());
        assert!(store.lane(2).unwrap().is_running());
    }

    #[test]
    fn test_full_life_cycle_fan_out() {
        let mut store = StoreComposite::new();
        let recorders: Vec<_> = (1..=3)
            .map(|n| {
                let mut lane = lane_with_identity(n);
                let recorder = KindRecorder::new();
                lane.register(recorder.clone());
                store.add_lane(lane);
                recorder
            })
            .collect();

        store.boot_all().unwrap();
        store.tick_all();
        store.shutdown_all();
        store.tick_all(); // flushes POS_SHUTDOWN, then the lanes stop

        for recorder in &recorders {
            assert_eq!(
                *recorder.seen.lock().unwrap(),
                vec![EventKind::PosBootup, EventKind::PosShutdown]
            );
        }
        assert!(store.iter().all(|lane| !lane.is_running()));
    }

    #[test]
    fn test_indexed_access() {
        let mut store = StoreComposite::new();
        assert!(store.is_empty());

        let index = store.add_lane(lane_with_identity(1));
        assert_eq!(index, 0);
        assert_eq!(store.add_lane(lane_with_identity(2)), 1);
        assert_eq!(store.len(), 2);

        assert_eq!(store.lane(1).unwrap().identity().unwrap().lane_number(), 2);
        assert!(store.lane(9).is_none());
        assert!(store.lane_mut(0).is_some());
    }

    #[test]
    fn test_empty_composite_life_cycle_is_harmless() {
        let mut store = StoreComposite::new();
        store.boot_all().unwrap();
        store.tick_all();
        store.shutdown_all();
    }
}
