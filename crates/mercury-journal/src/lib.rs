//! # mercury-journal: The Journal Listener
//!
//! The journal is a pluggable [`EventListener`](mercury_core::EventListener)
//! that declares interest in `LOG` and `ERROR` only, renders each event
//! through a timestamped formatter, and forwards the line to a
//! [`LineSink`]. Sinks are swappable: stdout for the terminal, a TCP socket
//! for a back-office collector, an in-memory buffer for tests.
//!
//! Everything here is best effort. A sink that cannot write loses lines; it
//! never fails a dispatch or a tick.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use mercury_core::{Event, EventListener};
//! use mercury_journal::{Journal, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let journal = Journal::new(sink.clone());
//!
//! journal.on_event(&Event::error("scanner offline"));
//! assert!(sink.lines()[0].ends_with("scanner offline"));
//! ```

pub mod format;
pub mod journal;
pub mod remote;
pub mod sink;

pub use format::format_entry;
pub use journal::Journal;
pub use remote::{ConnectionState, JournalError, JournalResult, RemoteSink};
pub use sink::{ConsoleSink, LineSink, MemorySink};
