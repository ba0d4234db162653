//! # Event Listener Contract
//!
//! Anything that wants to observe a lane implements [`EventListener`]:
//! declare the kinds you care about, receive matching events during the
//! flush phase of each tick.
//!
//! ## Delivery Contract
//! - Events arrive in the order the controller accepted them, across kinds.
//! - `on_event` is called once per matching buffered event per tick; an
//!   empty buffer means no calls at all.
//! - Delivery happens on the thread driving `tick()`; `on_event` must not
//!   block. Anything slow (sockets, disks) hands off to its own task — see
//!   the journal's remote sink for the pattern.
//! - Listeners receive `&Event` and must not reach back into controller
//!   state; reactions flow in as new `dispatch` calls.

use crate::event::{Event, EventKind};

/// An observer of lane events.
///
/// Implementations are shared (`Arc<dyn EventListener>`), so state behind
/// the listener uses interior mutability. Registration identity is `Arc`
/// pointer identity: registering the same `Arc` twice is a no-op.
pub trait EventListener: Send + Sync {
    /// The event kinds this listener wants delivered.
    ///
    /// Consulted during every flush, so a listener may narrow or widen its
    /// interests between ticks.
    fn interests(&self) -> &[EventKind];

    /// Receives one matching event.
    fn on_event(&self, event: &Event);

    /// Whether this listener wants `kind`.
    fn wants(&self, kind: EventKind) -> bool {
        self.interests().contains(&kind)
    }
}

/// Listener that ignores everything. Useful as a registration placeholder
/// and in tests that only exercise the listener set itself.
#[derive(Debug, Default)]
pub struct NoOpListener;

impl EventListener for NoOpListener {
    fn interests(&self) -> &[EventKind] {
        &[]
    }

    fn on_event(&self, _event: &Event) {}
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct BootWatcher;

    impl EventListener for BootWatcher {
        fn interests(&self) -> &[EventKind] {
            &[EventKind::PosBootup, EventKind::PosShutdown]
        }

        fn on_event(&self, _event: &Event) {}
    }

    #[test]
    fn test_wants_follows_interests() {
        let watcher = BootWatcher;
        assert!(watcher.wants(EventKind::PosBootup));
        assert!(watcher.wants(EventKind::PosShutdown));
        assert!(!watcher.wants(EventKind::ItemScanned));
    }

    #[test]
    fn test_noop_listener_wants_nothing() {
        let noop = NoOpListener;
        for kind in EventKind::ALL {
            assert!(!noop.wants(kind));
        }
    }
}
