//! # Telnet Echo Server
//!
//! Greets each telnet client, echoes back whatever it sends and closes the
//! session on `exit\r\n`. Option negotiation requests are logged and ignored.
//!
//! - `listener`: binds the port and spawns one session thread per client
//! - `session`: greeting, receive loop and termination for one connection
//! - `chunk`: per-chunk classification into exit / negotiation / echo
//! - `banner`: welcome box rendering
//! - `log`: the operator log sink sessions report to

pub mod banner;
pub mod chunk;
pub mod config;
pub mod errors;
pub mod listener;
pub mod log;
pub mod session;

pub use config::ServerConfig;
pub use errors::{ServerError, ServerResult};
pub use listener::{Listener, start};
pub use log::{CapturedLog, SessionLog, TracingLog};
pub use session::{Connection, Session, SessionContext, SessionEnd};
