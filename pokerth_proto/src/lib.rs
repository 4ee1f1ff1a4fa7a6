//! # PokerTH protocol
//!
//! Client side of the PokerTH network protocol: length-prefixed,
//! envelope-wrapped binary messages over a persistent TCP connection.
//!
//! ## Core Modules
//!
//! - [`net`]: wire schema, framing, reassembly, the async client driver and
//!   a logging proxy
//! - [`protocol`]: the sans-IO client state machine and the callbacks an
//!   embedder implements to make decisions
//! - [`game`] and [`lobby`]: the client-side state the protocol maintains
//! - [`poker`] and [`player`]: cards, actions, rounds and players
//!
//! ## Example
//!
//! ```
//! use pokerth_proto::{ClientCallbacks, ClientConfig, ClientProtocol, ClientState};
//!
//! struct Spectator;
//!
//! impl ClientCallbacks for Spectator {}
//!
//! let protocol = ClientProtocol::new(ClientConfig::default(), Spectator);
//! assert_eq!(protocol.state(), ClientState::Init);
//! ```

/// Networking components: wire schema, framing, client driver and proxy.
pub mod net;
pub use net::{
    buffer::FrameBuffer,
    client::{Client, ConnectionPolicy, HaltAlways, Reconnect, ReconnectOnLoss},
    errors::{EnvelopeError, TransportError},
    messages::{self, Message, MessageType, PokerthMessage},
    protocol_version::ProtocolVersion,
    proxy::Proxy,
    utils,
};

/// Client protocol state machine.
pub mod protocol;
pub use protocol::{
    ClientCallbacks, ClientConfig, ClientProtocol, ClientState, Deferred, ProtocolAction,
    ProtocolError, Session,
};

/// Per-game ledger of players, rounds and actions.
pub mod game;
pub use game::{ActionInfo, Game, GameError, RoundInfo};

/// Lobby registry of players and advertised games.
pub mod lobby;
pub use lobby::{GameInfo, Lobby, LobbyError};

pub mod player;
pub use player::Player;

/// Cards, actions and betting rounds.
pub mod poker;
pub use poker::{Action, Card, CardError, Rank, Round, Suit, UnknownGameState};
