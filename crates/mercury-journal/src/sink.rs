//! # Line Sinks
//!
//! Where formatted journal lines go. The [`Journal`](crate::Journal) does
//! not care: it writes to a `dyn LineSink` and every implementation is
//! best effort by contract.

use std::io::Write;
use std::sync::Mutex;

/// Destination for formatted journal lines.
///
/// `write_line` must not block the tick that is delivering events: console
/// and memory writes are effectively instant, and the remote sink hands
/// off to its own writer task. Failures are swallowed by the sink — a
/// journal that cannot write loses lines, nothing else.
pub trait LineSink: Send + Sync {
    /// Writes one line (without trailing newline).
    fn write_line(&self, line: &str);
}

// =============================================================================
// Console Sink
// =============================================================================

/// Sink that writes lines to stdout. Write failures (closed pipe) are
/// ignored.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Creates a console sink.
    pub fn new() -> Self {
        Self
    }
}

impl LineSink for ConsoleSink {
    fn write_line(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
    }
}

// =============================================================================
// Memory Sink
// =============================================================================

/// Sink that captures lines in memory, for tests and the terminal's
/// scrollback view.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every captured line, in write order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("memory sink lock poisoned").clone()
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.lock().expect("memory sink lock poisoned").len()
    }

    /// Whether nothing was captured yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().expect("memory sink lock poisoned"))
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .expect("memory sink lock poisoned")
            .push(line.to_string());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
