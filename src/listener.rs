use crate::banner::render_welcome;
use crate::config::ServerConfig;
use crate::errors::{ServerError, ServerResult};
use crate::log::{SessionLog, TracingLog};
use crate::session::{Session, SessionContext, SessionEnd};

use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Pause after a failed accept so a persistent error (EMFILE) cannot spin
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections and hands each one to its own session thread
pub struct Listener {
    listener: TcpListener,
    context: Arc<SessionContext>,
}

impl Listener {
    /// Bind the listening socket described by `config`
    ///
    /// Nothing is retried: any failure here is fatal for the server.
    pub fn bind(config: ServerConfig, log: Arc<dyn SessionLog>) -> ServerResult<Self> {
        let addr = config.socket_addr()?;
        let listener = bind_socket(addr, &config).map_err(|source| ServerError::Bind {
            addr: config.bind_addr(),
            source,
        })?;
        let banner = render_welcome(&config)?;

        let context = Arc::new(SessionContext::new(Arc::new(config), banner, log));

        Ok(Self { listener, context })
    }

    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever, spawning a session for each
    pub fn run(self) -> ServerResult<()> {
        tracing::info!(addr = %self.local_addr()?, "listening for telnet connections");

        for stream in self.listener.incoming() {
            self.handle_accept(stream);
        }

        Ok(())
    }

    fn handle_accept(&self, accepted: io::Result<TcpStream>) {
        match accepted {
            Ok(stream) => self.spawn_session(stream),
            Err(e) => {
                tracing::error!(error = %e, "error accepting connection");
                thread::sleep(ACCEPT_ERROR_BACKOFF);
            }
        }
    }

    fn spawn_session(&self, stream: TcpStream) {
        let peer = match stream.peer_addr() {
            Ok(peer) => peer,
            Err(e) => {
                tracing::warn!(error = %e, "dropping connection without peer address");
                return;
            }
        };

        if let Err(e) = stream.set_nodelay(self.context.config.tcp_options.no_delay) {
            tracing::warn!(%peer, error = %e, "failed to set TCP_NODELAY");
        }

        let context = Arc::clone(&self.context);
        let spawned = thread::Builder::new()
            .name(format!("session-{}", peer))
            .spawn(move || match Session::new(stream, peer, context).run() {
                SessionEnd::Terminated => tracing::debug!(%peer, "session terminated by client"),
                SessionEnd::Closed => tracing::debug!(%peer, "session closed by peer"),
            });

        if let Err(e) = spawned {
            tracing::error!(%peer, error = %e, "failed to spawn session thread");
        }
    }
}

fn bind_socket(addr: SocketAddr, config: &ServerConfig) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(config.tcp_options.reuse_address)?;
    socket.set_nodelay(config.tcp_options.no_delay)?;
    socket.bind(&addr.into())?;
    socket.listen(config.tcp_options.backlog)?;
    Ok(socket.into())
}

/// Start the server with the built-in configuration and log to `tracing`
pub fn start() -> ServerResult<()> {
    let config = ServerConfig::default();
    let listener = Listener::bind(config, Arc::new(TracingLog))?;
    listener.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::CapturedLog;

    fn local_config() -> ServerConfig {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            listen_port: 0,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_bind_ephemeral_port() {
        let listener = Listener::bind(local_config(), Arc::new(CapturedLog::new())).unwrap();
        let addr = listener.local_addr().unwrap();

        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();
        let config = ServerConfig {
            listen_port: port,
            ..local_config()
        };

        match Listener::bind(config, Arc::new(CapturedLog::new())) {
            Err(ServerError::Bind { addr, .. }) => assert_eq!(addr, format!("127.0.0.1:{port}")),
            Err(other) => panic!("expected bind error, got {other}"),
            Ok(_) => panic!("bind on a taken port should fail"),
        }
    }

    #[test]
    fn test_accept_error_backs_off() {
        let listener = Listener::bind(local_config(), Arc::new(CapturedLog::new())).unwrap();

        let started = std::time::Instant::now();
        listener.handle_accept(Err(io::Error::from_raw_os_error(24)));

        assert!(started.elapsed() >= ACCEPT_ERROR_BACKOFF);
    }

    #[test]
    fn test_invalid_address_fails_before_binding() {
        let config = ServerConfig {
            bind_address: "nowhere".to_string(),
            ..local_config()
        };

        assert!(matches!(
            Listener::bind(config, Arc::new(CapturedLog::new())),
            Err(ServerError::InvalidAddress(_))
        ));
    }
}
