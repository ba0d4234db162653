//! # The Journal Listener
//!
//! Glue between the event bus and a [`LineSink`]: declares interest in
//! `LOG` and `ERROR`, formats each delivered event with the wall clock,
//! and writes the line. Register one [`Journal`] per lane (or share one
//! across lanes — the line carries the lane identity either way).

use std::sync::Arc;

use chrono::Utc;

use mercury_core::{Event, EventKind, EventListener};

use crate::format::format_entry;
use crate::sink::{ConsoleSink, LineSink};

/// The only kinds a journal wants.
const INTERESTS: [EventKind; 2] = [EventKind::Log, EventKind::Error];

/// Event listener that renders LOG/ERROR events into its sink.
pub struct Journal {
    sink: Arc<dyn LineSink>,
}

impl Journal {
    /// Creates a journal writing into the given sink.
    pub fn new(sink: Arc<dyn LineSink>) -> Self {
        Self { sink }
    }

    /// Convenience: a journal writing to stdout.
    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleSink::new()))
    }
}

impl EventListener for Journal {
    fn interests(&self) -> &[EventKind] {
        &INTERESTS
    }

    fn on_event(&self, event: &Event) {
        let line = format_entry(Utc::now(), event);
        self.sink.write_line(&line);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
