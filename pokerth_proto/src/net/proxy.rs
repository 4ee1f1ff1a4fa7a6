//! A logging pass-through proxy between a PokerTH client and server.
//!
//! Bytes are relayed verbatim in both directions. A copy of each direction is
//! run through a [`FrameBuffer`] so every complete frame can be decoded and
//! logged; decoding never alters or delays what is relayed.

use anyhow::{Context, Error};
use log::{info, warn};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{
        TcpListener, TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

use super::{
    buffer::FrameBuffer,
    errors::TransportError,
    messages::Message,
    utils::{develop, unpack},
};

const RELAY_BUFFER_SIZE: usize = 8 * 1024;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    FromClient,
    FromServer,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let repr = match self {
            Self::FromClient => "From client",
            Self::FromServer => "From server",
        };
        write!(f, "{repr}")
    }
}

pub struct Proxy {
    upstream: String,
    connections: Arc<AtomicUsize>,
}

impl Proxy {
    #[must_use]
    pub fn new(upstream: impl Into<String>) -> Self {
        Self {
            upstream: upstream.into(),
            connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// Number of client connections currently relayed.
    #[must_use]
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::Relaxed)
    }

    /// Accepts clients forever, relaying each on its own task.
    ///
    /// # Errors
    ///
    /// Returns an error if accepting a connection fails.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), Error> {
        loop {
            let (client, peer) = listener.accept().await?;
            let upstream = self.upstream.clone();
            let connections = Arc::clone(&self.connections);
            tokio::spawn(async move {
                let active = connections.fetch_add(1, Ordering::Relaxed) + 1;
                info!("Client {peer} connected ({active} active)");
                if let Err(error) = relay(client, &upstream).await {
                    warn!("Relay for {peer} failed: {error:#}");
                }
                connections.fetch_sub(1, Ordering::Relaxed);
                info!("Client {peer} disconnected");
            });
        }
    }
}

async fn relay(client: TcpStream, upstream: &str) -> Result<(), Error> {
    let server = TcpStream::connect(upstream)
        .await
        .with_context(|| format!("couldn't connect to {upstream}"))?;
    info!("Server connection made to {upstream}");

    let (client_reader, client_writer) = client.into_split();
    let (server_reader, server_writer) = server.into_split();
    let (to_server, to_client) = tokio::join!(
        pipe(client_reader, server_writer, Direction::FromClient),
        pipe(server_reader, client_writer, Direction::FromServer),
    );
    to_server?;
    to_client?;
    Ok(())
}

async fn pipe(
    mut from: OwnedReadHalf,
    mut to: OwnedWriteHalf,
    direction: Direction,
) -> Result<(), Error> {
    let mut inspector = Some(FrameBuffer::default());
    let mut buf = vec![0; RELAY_BUFFER_SIZE];
    loop {
        let n = from.read(&mut buf).await?;
        if n == 0 {
            to.shutdown().await?;
            return Ok(());
        }
        to.write_all(&buf[..n]).await?;
        if let Some(buffer) = inspector.as_mut() {
            if let Err(error) = log_frames(buffer, &buf[..n], direction) {
                warn!("{direction}: {error}, no longer decoding this direction");
                inspector = None;
            }
        }
    }
}

/// Buffers `data` and logs every frame completed so far. Returns the number
/// of messages logged.
///
/// # Errors
///
/// Returns an error if the stream lost its frame boundaries. Frames that do
/// not decode are logged and skipped.
pub fn log_frames(
    buffer: &mut FrameBuffer,
    data: &[u8],
    direction: Direction,
) -> Result<usize, TransportError> {
    buffer.extend(data);
    let mut logged = 0;
    while let Some(frame) = buffer.next_frame()? {
        let envelope = match unpack(&frame) {
            Ok(envelope) => envelope,
            Err(error) if error.is_framing() => return Err(error),
            Err(error) => {
                warn!("{direction}: undecodable frame: {error}");
                continue;
            }
        };
        match develop(envelope) {
            Ok(message) => {
                info!("{direction}: {}", render(&message));
                logged += 1;
            }
            Err(error) => warn!("{direction}: malformed envelope: {error}"),
        }
    }
    Ok(logged)
}

fn render(message: &Message) -> String {
    serde_json::to_string(message).unwrap_or_else(|_| format!("{message:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{
        messages::{ChatRequestMessage, ResetTimeoutMessage},
        utils::{MAX_MESSAGE_SIZE, make_size_bytes, pack_envelop},
    };

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::FromClient.to_string(), "From client");
        assert_eq!(Direction::FromServer.to_string(), "From server");
    }

    #[test]
    fn test_log_frames_counts_split_messages() {
        let mut data = pack_envelop(ResetTimeoutMessage {}).unwrap().to_vec();
        data.extend_from_slice(
            &pack_envelop(ChatRequestMessage {
                chat_text: "hi".to_string(),
                ..ChatRequestMessage::default()
            })
            .unwrap(),
        );
        let (first, second) = data.split_at(7);
        let mut buffer = FrameBuffer::default();
        let logged = log_frames(&mut buffer, first, Direction::FromClient).unwrap();
        assert_eq!(logged, 0);
        let logged = log_frames(&mut buffer, second, Direction::FromClient).unwrap();
        assert_eq!(logged, 2);
        assert_eq!(buffer.buffered(), 0);
    }

    #[test]
    fn test_log_frames_skips_garbage_frame() {
        let mut data = make_size_bytes(3).to_vec();
        data.extend_from_slice(&[0xff, 0xff, 0xff]);
        data.extend_from_slice(&pack_envelop(ResetTimeoutMessage {}).unwrap());
        let mut buffer = FrameBuffer::default();
        let logged = log_frames(&mut buffer, &data, Direction::FromServer).unwrap();
        assert_eq!(logged, 1);
    }

    #[test]
    fn test_log_frames_oversized_frame() {
        let data = make_size_bytes(MAX_MESSAGE_SIZE as u32 + 1);
        let mut buffer = FrameBuffer::default();
        assert!(log_frames(&mut buffer, &data, Direction::FromServer).is_err());
    }
}
