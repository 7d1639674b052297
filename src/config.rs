use std::net::SocketAddr;

use crate::errors::{ServerError, ServerResult};

/// Server configuration, fixed at build time and constructed once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_port: u16,
    pub bind_address: String,
    pub welcome_message: String,
    /// Prompt written after the banner and after every echo
    pub line_prefix: String,
    pub tcp_options: TcpOptions,
    pub banner: BannerConfig,
}

/// Socket behaviour for the listener and every accepted connection
///
/// Reads are raw and binary-safe: each blocking read of up to
/// `read_buffer_size` bytes is one chunk, and the next read is only issued
/// once that chunk has been handled.
#[derive(Debug, Clone)]
pub struct TcpOptions {
    pub no_delay: bool,
    pub reuse_address: bool,
    pub backlog: i32,
    pub read_buffer_size: usize,
}

#[derive(Debug, Clone)]
pub struct BannerConfig {
    pub title: String,
    pub use_colors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: 2323,
            bind_address: "0.0.0.0".to_string(),
            welcome_message: concat!(
                "Welcome to the telnet echo server!\n",
                "\n",
                "Anything you type is sent straight back to you.\n",
                "Type 'exit' to close the connection."
            )
            .to_string(),
            line_prefix: "> ".to_string(),
            tcp_options: TcpOptions::default(),
            banner: BannerConfig {
                title: "TELNET ECHO".to_string(),
                use_colors: true,
            },
        }
    }
}

impl Default for TcpOptions {
    fn default() -> Self {
        Self {
            no_delay: true,
            reuse_address: true,
            backlog: 128,
            read_buffer_size: 1024,
        }
    }
}

impl ServerConfig {
    /// Address string in `host:port` form, as used in log lines
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.listen_port)
    }

    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        let addr = self.bind_addr();
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.listen_port, 2323);
        assert_eq!(config.line_prefix, "> ");
        assert!(config.tcp_options.no_delay);
        assert!(config.tcp_options.reuse_address);
        assert_eq!(config.tcp_options.read_buffer_size, 1024);
        assert!(config.welcome_message.contains("exit"));
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            listen_port: 4000,
            ..ServerConfig::default()
        };

        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:4000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_invalid_address() {
        let config = ServerConfig {
            bind_address: "not an address".to_string(),
            ..ServerConfig::default()
        };

        assert!(matches!(
            config.socket_addr(),
            Err(ServerError::InvalidAddress(_))
        ));
    }
}
