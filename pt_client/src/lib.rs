//! PokerTH bot client.
//!
//! [`bot::CheckCallBot`] supplies the decisions, [`config::BotConfig`] reads
//! the settings, and `pokerth_proto`'s async driver does the networking.

pub mod bot;
pub mod config;

pub use bot::CheckCallBot;
pub use config::{BotConfig, ConfigError};
