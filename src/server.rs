//! HTTP server bootstrap: listener configuration and graceful shutdown.

use std::env;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// Configuration
// =============================================================================

/// Invalid listener configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServerConfigError {
    #[error("Invalid PORT: '{0}'. Expected an integer between 1 and 65535")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Reads `HOST` and `PORT` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ServerConfigError::InvalidPort` if `PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads `HOST` and `PORT` through an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// Returns `ServerConfigError::InvalidPort` if `PORT` is not a valid port.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerConfigError> {
        let host = lookup("HOST")
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT").map(|port| port.trim().to_string()) {
            None => DEFAULT_PORT,
            Some(port) if port.is_empty() => DEFAULT_PORT,
            Some(port) => match port.parse::<u16>() {
                Ok(parsed) if parsed > 0 => parsed,
                _ => return Err(ServerConfigError::InvalidPort(port)),
            },
        };

        Ok(Self::new(host, port))
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

// =============================================================================
// Server
// =============================================================================

pub struct Server {
    config: ServerConfig,
}

impl Server {
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Binds the listener and serves `router` until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if binding or serving fails.
    pub async fn run(self, router: Router) -> std::io::Result<()> {
        let address = self.config.socket_addr();

        let listener = TcpListener::bind(&address).await?;

        tracing::info!("Server listening on {}", address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }
}

// =============================================================================
// Shutdown Signal
// =============================================================================

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup(
        host: Option<&'static str>,
        port: Option<&'static str>,
    ) -> impl Fn(&str) -> Option<String> {
        move |name| match name {
            "HOST" => host.map(str::to_string),
            "PORT" => port.map(str::to_string),
            _ => None,
        }
    }

    #[rstest]
    fn test_defaults_listen_on_port_5000() {
        let config = ServerConfig::from_lookup(lookup(None, None)).unwrap();

        assert_eq!(config, ServerConfig::new("0.0.0.0", 5000));
    }

    #[rstest]
    #[case(Some("127.0.0.1"), Some("8080"), "127.0.0.1:8080")]
    #[case(Some(""), Some(" 3000 "), "0.0.0.0:3000")]
    #[case(None, Some(""), "0.0.0.0:5000")]
    fn test_reads_host_and_port(
        #[case] host: Option<&'static str>,
        #[case] port: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let config = ServerConfig::from_lookup(lookup(host, port)).unwrap();

        assert_eq!(config.socket_addr(), expected);
    }

    #[rstest]
    #[case("http")]
    #[case("0")]
    #[case("70000")]
    fn test_rejects_invalid_port(#[case] port: &'static str) {
        let result = ServerConfig::from_lookup(lookup(None, Some(port)));

        assert_eq!(
            result,
            Err(ServerConfigError::InvalidPort(port.to_string()))
        );
    }

    #[rstest]
    fn test_server_keeps_config() {
        let server = Server::new(ServerConfig::new("localhost", 3000));

        assert_eq!(server.config().socket_addr(), "localhost:3000");
    }
}
