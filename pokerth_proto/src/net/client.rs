//! An async TCP driver for [`ClientProtocol`].
//!
//! The driver owns the socket and a timer channel and runs everything on one
//! task: a read is fed to the protocol and fully dispatched before the next
//! read, deferred tasks come back through the channel, and queued frames are
//! written in order after every step.

use anyhow::{Error, bail};
use log::{debug, error, info, warn};
use std::{io, time::Duration};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpStream, tcp::OwnedWriteHalf},
    sync::mpsc,
    time,
};

use crate::protocol::{ClientCallbacks, ClientProtocol, Deferred, ProtocolAction, ProtocolError};

/// Default wait before reconnecting after the server dropped us.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(1);

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// What to do after a connection ended or could not be established.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reconnect {
    Retry { after: Duration },
    Halt,
}

pub trait ConnectionPolicy {
    fn on_connection_lost(&mut self, reason: &str) -> Reconnect;

    fn on_connection_failed(&mut self, error: &io::Error) -> Reconnect;
}

/// Reconnect whenever an established connection is lost, give up when the
/// server cannot be reached at all.
#[derive(Clone, Copy, Debug)]
pub struct ReconnectOnLoss {
    pub delay: Duration,
}

impl Default for ReconnectOnLoss {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

impl ConnectionPolicy for ReconnectOnLoss {
    fn on_connection_lost(&mut self, _reason: &str) -> Reconnect {
        Reconnect::Retry { after: self.delay }
    }

    fn on_connection_failed(&mut self, _error: &io::Error) -> Reconnect {
        Reconnect::Halt
    }
}

/// Run a single connection.
#[derive(Clone, Copy, Debug, Default)]
pub struct HaltAlways;

impl ConnectionPolicy for HaltAlways {
    fn on_connection_lost(&mut self, _reason: &str) -> Reconnect {
        Reconnect::Halt
    }

    fn on_connection_failed(&mut self, _error: &io::Error) -> Reconnect {
        Reconnect::Halt
    }
}

/// A deferred task tagged with the connection it was scheduled on.
type Timer = (u64, Deferred);

pub struct Client<C, P = ReconnectOnLoss> {
    addr: String,
    protocol: ClientProtocol<C>,
    policy: P,
    generation: u64,
}

impl<C: ClientCallbacks, P: ConnectionPolicy> Client<C, P> {
    #[must_use]
    pub fn new(addr: impl Into<String>, protocol: ClientProtocol<C>, policy: P) -> Self {
        Self {
            addr: addr.into(),
            protocol,
            policy,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn protocol(&self) -> &ClientProtocol<C> {
        &self.protocol
    }

    pub fn into_protocol(self) -> ClientProtocol<C> {
        self.protocol
    }

    /// Number of connections established so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Connects and serves connections until the policy halts.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached and the policy does
    /// not retry, or if the protocol hits a fatal error.
    pub async fn run(&mut self) -> Result<(), Error> {
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<Timer>();
        loop {
            let decision = match TcpStream::connect(&self.addr).await {
                Ok(stream) => {
                    let reason = self.serve(stream, &timer_tx, &mut timer_rx).await?;
                    self.policy.on_connection_lost(&reason)
                }
                Err(error) => {
                    warn!("Connecting to {} failed: {error}", self.addr);
                    match self.policy.on_connection_failed(&error) {
                        Reconnect::Halt => bail!("couldn't connect to {}: {error}", self.addr),
                        retry => retry,
                    }
                }
            };
            match decision {
                Reconnect::Retry { after } => {
                    info!("Reconnecting to {} in {after:?}", self.addr);
                    time::sleep(after).await;
                }
                Reconnect::Halt => return Ok(()),
            }
        }
    }

    /// Serves one connection and returns why it ended.
    async fn serve(
        &mut self,
        stream: TcpStream,
        timer_tx: &mpsc::UnboundedSender<Timer>,
        timer_rx: &mut mpsc::UnboundedReceiver<Timer>,
    ) -> Result<String, Error> {
        self.generation += 1;
        let generation = self.generation;
        self.protocol.reset();
        self.protocol.connection_made();

        let (mut reader, mut writer) = stream.into_split();
        let mut buf = vec![0; READ_BUFFER_SIZE];
        let reason = loop {
            let outcome = tokio::select! {
                read = reader.read(&mut buf) => match read {
                    Ok(0) => break "connection closed by peer".to_string(),
                    Ok(n) => self.protocol.data_received(&buf[..n]),
                    Err(error) => break error.to_string(),
                },
                Some((scheduled_on, task)) = timer_rx.recv() => {
                    if scheduled_on != generation {
                        debug!("Discarding {task:?} scheduled on connection {scheduled_on}");
                        continue;
                    }
                    self.protocol.run_deferred(task)
                }
            };
            let outcome = self.absorb(outcome);
            if let Err(error) = self.execute(&mut writer, timer_tx, generation).await {
                break error.to_string();
            }
            if let Err(error) = outcome {
                error!("Fatal protocol error: {error}");
                let _ = writer.shutdown().await;
                self.protocol.connection_lost(&error.to_string());
                return Err(error.into());
            }
        };
        self.protocol.connection_lost(&reason);
        Ok(reason)
    }

    /// Logs non-fatal errors and keeps dispatching whatever is still
    /// buffered, until the buffer is drained or an error is fatal.
    fn absorb(&mut self, mut outcome: Result<(), ProtocolError>) -> Result<(), ProtocolError> {
        loop {
            match outcome {
                Ok(()) => return Ok(()),
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    warn!("{error}");
                    outcome = self.protocol.data_received(&[]);
                }
            }
        }
    }

    async fn execute(
        &mut self,
        writer: &mut OwnedWriteHalf,
        timer_tx: &mpsc::UnboundedSender<Timer>,
        generation: u64,
    ) -> io::Result<()> {
        for action in self.protocol.take_actions() {
            match action {
                ProtocolAction::Send(frame) => writer.write_all(&frame).await?,
                ProtocolAction::Schedule { delay, task } => {
                    let timer_tx = timer_tx.clone();
                    tokio::spawn(async move {
                        time::sleep(delay).await;
                        // The receiver is gone once the client stopped.
                        let _ = timer_tx.send((generation, task));
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconnect_on_loss() {
        let mut policy = ReconnectOnLoss::default();
        assert_eq!(
            policy.on_connection_lost("closed"),
            Reconnect::Retry {
                after: DEFAULT_RECONNECT_DELAY
            }
        );
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(policy.on_connection_failed(&refused), Reconnect::Halt);
    }

    #[test]
    fn test_halt_always() {
        let mut policy = HaltAlways;
        assert_eq!(policy.on_connection_lost("closed"), Reconnect::Halt);
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(policy.on_connection_failed(&refused), Reconnect::Halt);
    }
}
