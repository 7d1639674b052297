//! Operator-facing session log.
//!
//! Sessions never log through a global directly; they are handed a
//! [`SessionLog`] so tests can capture exactly what a session reported.

use jiff::Timestamp;
use std::net::SocketAddr;
use std::sync::Mutex;
use telnet_negotiation::Negotiation;

/// Something a session reports to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Connected,
    Negotiation(Negotiation),
    /// Raw bytes of a chunk that was echoed back
    Echo(Vec<u8>),
    /// Client sent the exit command
    Exit,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub peer: SocketAddr,
    pub at: Timestamp,
    pub kind: EventKind,
}

impl LogEvent {
    pub fn now(peer: SocketAddr, kind: EventKind) -> Self {
        Self {
            peer,
            at: Timestamp::now(),
            kind,
        }
    }
}

/// Sink for session events, shared by every session thread
pub trait SessionLog: Send + Sync {
    fn record(&self, event: &LogEvent);
}

/// Default sink: one `tracing` event per record
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl SessionLog for TracingLog {
    fn record(&self, event: &LogEvent) {
        let peer = event.peer;
        let at = event.at;
        match &event.kind {
            EventKind::Connected => {
                tracing::info!(%peer, %at, "client connected");
            }
            EventKind::Negotiation(negotiation) => {
                tracing::info!(
                    %peer,
                    %at,
                    %negotiation,
                    "negotiation request"
                );
            }
            EventKind::Echo(bytes) => {
                let text = String::from_utf8_lossy(bytes);
                tracing::info!(
                    %peer,
                    %at,
                    len = bytes.len(),
                    bytes = ?bytes,
                    text = %text.escape_debug(),
                    "echo"
                );
            }
            EventKind::Exit => {
                tracing::info!(%peer, %at, "client sent exit, closing connection");
            }
            EventKind::Disconnected => {
                tracing::info!(%peer, %at, "client disconnected");
            }
        }
    }
}

/// In-memory sink that keeps every event, for tests and embedding
#[derive(Debug, Default)]
pub struct CapturedLog {
    events: Mutex<Vec<LogEvent>>,
}

impl CapturedLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<LogEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().into_iter().map(|e| e.kind).collect()
    }
}

impl SessionLog for CapturedLog {
    fn record(&self, event: &LogEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
