//! Client side of the PokerTH session protocol.
//!
//! [`ClientProtocol`] turns received bytes into state changes on a
//! [`Session`] and asks the embedder's [`ClientCallbacks`] for decisions.
//! Everything it wants done in the outside world comes back as
//! [`ProtocolAction`]s, so the same state machine runs under the async
//! driver in [`crate::net::client`] and inside plain unit tests.

pub mod callbacks;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod states;

pub use callbacks::ClientCallbacks;
pub use client::ClientProtocol;
pub use config::ClientConfig;
pub use error::ProtocolError;
pub use session::{Deferred, ProtocolAction, Session};
pub use states::ClientState;
