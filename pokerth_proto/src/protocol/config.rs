//! Client protocol configuration.

use std::time::Duration;

use crate::net::utils::{MAX_MESSAGE_SIZE, SIZE_BYTES};

/// Longest nickname the server accepts.
pub const MAX_NICKNAME_LEN: usize = 64;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    /// Nickname sent with the init message
    pub nickname: String,

    /// Build id sent with the init message (0 for Linux builds)
    pub build_id: u32,

    /// Delay between the init acknowledgment and the enter-lobby callback
    pub lobby_delay: Duration,

    /// Delay between the end-of-game notification and its callback, giving
    /// the server time to reset the game
    pub end_of_game_delay: Duration,

    /// Largest frame payload accepted from the server
    pub max_frame_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            nickname: "PokerTH Bot".to_string(),
            build_id: 0,
            lobby_delay: Duration::from_secs(1),
            end_of_game_delay: Duration::from_secs(2),
            max_frame_size: MAX_MESSAGE_SIZE,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_nickname(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.nickname.trim().is_empty() {
            return Err("Nickname must not be empty".to_string());
        }

        if self.nickname.chars().count() > MAX_NICKNAME_LEN {
            return Err(format!(
                "Nickname must be at most {MAX_NICKNAME_LEN} characters"
            ));
        }

        if self.max_frame_size <= SIZE_BYTES || self.max_frame_size > MAX_MESSAGE_SIZE {
            return Err(format!(
                "Max frame size must be between {} and {MAX_MESSAGE_SIZE}",
                SIZE_BYTES + 1
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_nickname_rejected() {
        let config = ClientConfig::with_nickname("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_long_nickname_rejected() {
        let config = ClientConfig::with_nickname("x".repeat(MAX_NICKNAME_LEN + 1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_frame_size_bounds() {
        let mut config = ClientConfig::default();
        config.max_frame_size = 0;
        assert!(config.validate().is_err());
        config.max_frame_size = MAX_MESSAGE_SIZE + 1;
        assert!(config.validate().is_err());
        config.max_frame_size = 1024;
        assert!(config.validate().is_ok());
    }
}
