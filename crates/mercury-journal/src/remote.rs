//! # Remote Sink
//!
//! TCP sink for shipping journal lines to a back-office collector.
//!
//! ## Connection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌────────────┐    connect().await     ┌────────────┐                   │
//! │  │Disconnected│ ─────────────────────► │ Connected  │                   │
//! │  └────────────┘        ok              └─────┬──────┘                   │
//! │        ▲   ▲                                 │                          │
//! │        │   └── connect err (reported,        │ write_line() →           │
//! │        │       sink stays silent)            │ mpsc → writer task       │
//! │        │                                     │ owning the TcpStream     │
//! │        │       disconnect().await /          │                          │
//! │        └────── write error in task ──────────┘                          │
//! │                                                                         │
//! │  NO RECONNECTION. connect/disconnect are explicit steps driven by the   │
//! │  bootstrap; a dropped peer leaves the journal silent, not retrying.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines travel through a bounded channel into a spawned writer task that
//! owns the socket, so `write_line` never blocks a tick. When the channel
//! is full or the peer is gone, lines are dropped — the journal is best
//! effort by contract.

use std::sync::Mutex;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::sink::LineSink;

/// Lines buffered towards the writer task before new ones are dropped.
const LINE_CHANNEL_CAPACITY: usize = 256;

// =============================================================================
// Journal Error
// =============================================================================

/// Failures of the journal's remote sink.
///
/// Reported, never fatal: a store whose journal collector is down keeps
/// selling with the journal silent.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The TCP connect step failed.
    #[error("failed to connect journal sink to {addr}: {reason}")]
    Connect { addr: String, reason: String },
}

/// Result type for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;

// =============================================================================
// Connection State
// =============================================================================

/// Connection state of the remote sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket. Lines are dropped.
    Disconnected,
    /// Writer task holds a socket. Lines are queued to it.
    Connected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connected => write!(f, "connected"),
        }
    }
}

// =============================================================================
// Remote Sink
// =============================================================================

/// A channel into the running writer task.
struct Connection {
    line_tx: mpsc::Sender<String>,
    shutdown_tx: mpsc::Sender<()>,
}

/// TCP journal sink with explicit connect/disconnect steps.
pub struct RemoteSink {
    addr: String,
    connection: Mutex<Option<Connection>>,
}

impl RemoteSink {
    /// Creates a disconnected sink targeting `addr` (`host:port`).
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            connection: Mutex::new(None),
        }
    }

    /// The configured collector address.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// The current connection state.
    ///
    /// `Connected` means the writer task was alive at the last look; a
    /// peer that dropped since shows up as `Disconnected` because the
    /// task's channel closes with it.
    pub fn state(&self) -> ConnectionState {
        let guard = self.connection.lock().expect("remote sink lock poisoned");
        match guard.as_ref() {
            Some(conn) if !conn.line_tx.is_closed() => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }

    /// Opens the TCP connection and spawns the writer task.
    ///
    /// Calling `connect` while connected is a no-op. A failed connect is
    /// reported as [`JournalError::Connect`] and leaves the sink silent;
    /// the caller logs it and carries on.
    pub async fn connect(&self) -> JournalResult<()> {
        if self.state() == ConnectionState::Connected {
            debug!(addr = %self.addr, "remote sink already connected");
            return Ok(());
        }

        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| JournalError::Connect {
                addr: self.addr.clone(),
                reason: e.to_string(),
            })?;

        let (line_tx, line_rx) = mpsc::channel::<String>(LINE_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(writer_task(stream, line_rx, shutdown_rx));

        *self.connection.lock().expect("remote sink lock poisoned") = Some(Connection {
            line_tx,
            shutdown_tx,
        });

        info!(addr = %self.addr, "journal sink connected");
        Ok(())
    }

    /// Closes the connection. Lines already queued to the writer task are
    /// flushed before the socket closes; calling this while disconnected
    /// is a no-op.
    pub async fn disconnect(&self) {
        let connection = self
            .connection
            .lock()
            .expect("remote sink lock poisoned")
            .take();

        if let Some(conn) = connection {
            let _ = conn.shutdown_tx.send(()).await;
            info!(addr = %self.addr, "journal sink disconnected");
        }
    }
}

impl LineSink for RemoteSink {
    fn write_line(&self, line: &str) {
        let guard = self.connection.lock().expect("remote sink lock poisoned");
        if let Some(conn) = guard.as_ref() {
            if conn.line_tx.try_send(line.to_string()).is_err() {
                debug!("journal line dropped: writer task backlogged or gone");
            }
        }
        // Disconnected: drop silently, the sink is best effort.
    }
}

/// Owns the socket: drains the line channel until shutdown or a write
/// failure.
async fn writer_task(
    mut stream: TcpStream,
    mut line_rx: mpsc::Receiver<String>,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    loop {
        tokio::select! {
            maybe_line = line_rx.recv() => {
                let Some(line) = maybe_line else { break };
                let framed = format!("{line}\n");
                if let Err(e) = stream.write_all(framed.as_bytes()).await {
                    warn!(error = %e, "journal peer lost, sink goes silent");
                    break;
                }
            }

            _ = shutdown_rx.recv() => {
                // Flush whatever is already queued, then close.
                line_rx.close();
                while let Some(line) = line_rx.recv().await {
                    let framed = format!("{line}\n");
                    if stream.write_all(framed.as_bytes()).await.is_err() {
                        break;
                    }
                }
                break;
            }
        }
    }

    let _ = stream.shutdown().await;
    debug!("journal writer task stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================
