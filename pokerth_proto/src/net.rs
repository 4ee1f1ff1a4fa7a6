//! Networking layer for the PokerTH wire protocol.
//!
//! Frames are a 4-byte big-endian length followed by a bincode-serialized
//! envelope. [`buffer`] reassembles frames from a byte stream, [`utils`]
//! packs and unpacks them, and [`client`] and [`proxy`] drive real sockets
//! with tokio.

/// Incremental frame reassembly.
pub mod buffer;

/// Async TCP driver for the client protocol.
pub mod client;

/// Transport and envelope errors.
pub mod errors;

/// Wire schema: message payloads, type tags and the envelope.
pub mod messages;

/// Protocol versioning for server compatibility checks.
pub mod protocol_version;

/// Logging pass-through proxy.
pub mod proxy;

/// Framing and envelope helpers.
pub mod utils;
