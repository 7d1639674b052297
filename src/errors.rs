use std::io;

use thiserror::Error;

/// Error types for the echo server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Listening socket could not be set up; fatal at startup
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Invalid listen address in the configuration
    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),

    /// I/O related errors (network, socket options, etc.)
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// Client went away mid-read or mid-write
    #[error("client disconnected")]
    ClientDisconnected,
}

impl From<io::Error> for ServerError {
    fn from(err: io::Error) -> Self {
        use io::ErrorKind;

        match err.kind() {
            ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe => ServerError::ClientDisconnected,
            _ => ServerError::Io(err),
        }
    }
}

/// Result type alias for server operations
pub type ServerResult<T> = Result<T, ServerError>;
