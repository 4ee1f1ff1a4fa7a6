//! Logging pass-through proxy for the PokerTH protocol.
//!
//! Bytes are relayed unchanged between each client and the upstream server.
//! Every complete frame is decoded on the side and logged.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ProxyConfig};

use anyhow::{Context, Error};
use pokerth_proto::Proxy;
use tokio::net::TcpListener;

/// Binds the configured address and relays clients until accepting fails.
///
/// # Errors
///
/// Returns an error if the bind address is unavailable or accepting fails.
pub async fn run(config: &ProxyConfig) -> Result<(), Error> {
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("couldn't bind {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        upstream = %config.upstream,
        "Proxy listening"
    );
    Proxy::new(config.upstream.clone()).serve(listener).await
}
