use crate::chunk::{ChunkAction, classify};
use crate::config::ServerConfig;
use crate::errors::{ServerError, ServerResult};
use crate::log::{EventKind, LogEvent, SessionLog};

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;

use telnet_negotiation::Negotiation;
use telnet_negotiation::protocol::option;

/// Transport a session can run over
///
/// `close` is only called when the session ends on the exit command; a peer
/// that hung up first needs no explicit close.
pub trait Connection: Read + Write {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Connection for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

/// Everything sessions share: read-only config, the pre-rendered banner and
/// the log sink
pub struct SessionContext {
    pub config: Arc<ServerConfig>,
    pub banner: Vec<u8>,
    pub log: Arc<dyn SessionLog>,
}

impl SessionContext {
    pub fn new(config: Arc<ServerConfig>, banner: Vec<u8>, log: Arc<dyn SessionLog>) -> Self {
        Self {
            config,
            banner,
            log,
        }
    }

    fn prompt(&self) -> &[u8] {
        self.config.line_prefix.as_bytes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Greeting,
    Receiving,
    /// Client sent the exit command
    Terminated,
    /// Peer closed first, or the transport failed
    Closed,
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Terminated,
    Closed,
}

pub struct Session<S: Connection> {
    stream: S,
    peer: SocketAddr,
    context: Arc<SessionContext>,
    state: SessionState,
}

impl<S: Connection> Session<S> {
    pub fn new(stream: S, peer: SocketAddr, context: Arc<SessionContext>) -> Self {
        Self {
            stream,
            peer,
            context,
            state: SessionState::Greeting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Run the session until the client exits or goes away
    pub fn run(mut self) -> SessionEnd {
        self.log(EventKind::Connected);

        if let Err(e) = self.greet() {
            return self.close_by_peer(e);
        }
        self.state = SessionState::Receiving;

        let mut buffer = vec![0u8; self.context.config.tcp_options.read_buffer_size.max(1)];
        loop {
            let read = match self.stream.read(&mut buffer) {
                Ok(0) => return self.close_by_peer(ServerError::ClientDisconnected),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return self.close_by_peer(e.into()),
            };

            match self.handle_chunk(&buffer[..read]) {
                Ok(SessionState::Terminated) => return self.terminate(),
                Ok(_) => {}
                Err(e) => return self.close_by_peer(e),
            }
        }
    }

    /// Announce options, then banner and prompt: four writes, in this order
    fn greet(&mut self) -> ServerResult<()> {
        self.stream
            .write_all(&Negotiation::wont(option::SUPPRESS_GO_AHEAD).to_bytes())?;
        self.stream
            .write_all(&Negotiation::wont(option::ECHO).to_bytes())?;
        self.stream.write_all(&self.context.banner)?;
        self.stream.write_all(self.context.prompt())?;
        self.stream.flush()?;

        Ok(())
    }

    /// Act on one chunk and return the state the session is in afterwards
    fn handle_chunk(&mut self, chunk: &[u8]) -> ServerResult<SessionState> {
        match classify(chunk) {
            ChunkAction::Exit => {
                self.log(EventKind::Exit);
                return Ok(SessionState::Terminated);
            }
            ChunkAction::Negotiate(run) => {
                for negotiation in run.negotiations {
                    self.log(EventKind::Negotiation(negotiation));
                }
            }
            ChunkAction::Echo(bytes) => {
                self.log(EventKind::Echo(bytes.to_vec()));

                let prompt = self.context.prompt();
                let mut reply = Vec::with_capacity(bytes.len() + prompt.len());
                reply.extend_from_slice(bytes);
                reply.extend_from_slice(prompt);

                self.stream.write_all(&reply)?;
                self.stream.flush()?;
            }
        }

        Ok(SessionState::Receiving)
    }

    fn terminate(mut self) -> SessionEnd {
        self.state = SessionState::Terminated;
        if let Err(e) = self.stream.close() {
            tracing::debug!(peer = %self.peer, error = %e, "shutdown failed");
        }
        SessionEnd::Terminated
    }

    fn close_by_peer(mut self, reason: ServerError) -> SessionEnd {
        self.state = SessionState::Closed;
        tracing::debug!(peer = %self.peer, %reason, "session closed");
        self.log(EventKind::Disconnected);
        SessionEnd::Closed
    }

    fn log(&self, kind: EventKind) {
        self.context.log.record(&LogEvent::now(self.peer, kind));
    }
}
