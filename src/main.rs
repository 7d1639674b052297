use std::process::ExitCode;

use telnet_echo::ServerConfig;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::default();
    tracing::info!(
        addr = %config.bind_addr(),
        version = env!("CARGO_PKG_VERSION"),
        protocol_version = telnet_negotiation::VERSION,
        "starting telnet echo server, connect with: telnet <host> {}",
        config.listen_port
    );

    match telnet_echo::start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed to start");
            ExitCode::FAILURE
        }
    }
}
