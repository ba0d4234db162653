//! # Pending Notification Buffer
//!
//! The holding area between the two clocks of a lane: `dispatch` records
//! accepted events here immediately, `tick` drains everything here to the
//! listeners and leaves the buffer empty.
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  dispatch order:   bootup(#0)  started(#1)  log(#2)  scanned(#3)        │
//! │                        │           │          │          │              │
//! │                        ▼           ▼          ▼          ▼              │
//! │  per-kind queues:  POS_BOOTUP: [#0]                                     │
//! │                    TRANSACTION_STARTED: [#1]                            │
//! │                    LOG: [#2]                                            │
//! │                    ITEM_SCANNED: [#3]                                   │
//! │                        │                                                │
//! │                        ▼ drain_sorted()                                 │
//! │  delivery order:   #0, #1, #2, #3  (global acceptance order)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every recorded event is stamped with a global acceptance number. Within
//! one kind the queue is FIFO; across kinds the stamps recover the exact
//! order `dispatch` accepted them, which is the delivery guarantee listeners
//! rely on. The stamp counter is never reset, not even by a drain, so two
//! batches can never interleave ambiguously.

use std::collections::BTreeMap;

use mercury_core::{Event, EventKind};

/// Buffer of accepted-but-not-yet-delivered events, grouped by kind.
#[derive(Debug, Default)]
pub struct PendingBuffer {
    /// Per-kind FIFO queues of (acceptance stamp, event).
    queues: BTreeMap<EventKind, Vec<(u64, Event)>>,
    /// Next global acceptance stamp. Monotonic for the buffer's lifetime.
    next_stamp: u64,
    /// Number of buffered events across all kinds.
    len: usize,
}

impl PendingBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an accepted event, stamping it with the next global
    /// acceptance number.
    pub fn record(&mut self, event: Event) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.queues.entry(event.kind()).or_default().push((stamp, event));
        self.len += 1;
    }

    /// Number of buffered events across all kinds.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buffered events of one kind.
    pub fn count_of(&self, kind: EventKind) -> usize {
        self.queues.get(&kind).map_or(0, Vec::len)
    }

    /// Removes and returns every buffered event in global acceptance order.
    ///
    /// After this call the buffer is empty; the stamp counter keeps
    /// counting.
    pub fn drain_sorted(&mut self) -> Vec<Event> {
        let mut stamped: Vec<(u64, Event)> = self
            .queues
            .values_mut()
            .flat_map(std::mem::take)
            .collect();
        self.queues.clear();
        self.len = 0;

        stamped.sort_by_key(|(stamp, _)| *stamp);
        stamped.into_iter().map(|(_, event)| event).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
