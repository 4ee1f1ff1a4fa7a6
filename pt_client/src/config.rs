//! Bot configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use pokerth_proto::{ClientConfig, protocol::config::MAX_NICKNAME_LEN};
use rand::Rng;
use std::time::Duration;

/// Default PokerTH server address
pub const DEFAULT_SERVER: &str = "127.0.0.1:7234";

/// Default nickname, a random suffix is appended unless disabled
pub const DEFAULT_NICKNAME: &str = "RustBot";

/// Default name of the game the bot joins or creates
pub const DEFAULT_GAME_NAME: &str = "Bots only";

/// Random nickname suffixes stay below this bound
const NICKNAME_SUFFIX_BOUND: u32 = 1 << 23;

/// Complete bot configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Server address (host:port)
    pub server: String,
    /// Nickname as configured, before any suffix
    pub nickname: String,
    /// Append a random number to the nickname so several bots can share one
    pub random_suffix: bool,
    /// Game to join, created when no game of that name is listed
    pub game_name: String,
    /// Delay before acting in the lobby
    pub lobby_delay: Duration,
    /// Delay before reacting to the end of a game
    pub end_of_game_delay: Duration,
    /// Reconnect when the server drops the connection
    pub reconnect: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        let protocol = ClientConfig::default();
        Self {
            server: DEFAULT_SERVER.to_string(),
            nickname: DEFAULT_NICKNAME.to_string(),
            random_suffix: true,
            game_name: DEFAULT_GAME_NAME.to_string(),
            lobby_delay: protocol.lobby_delay,
            end_of_game_delay: protocol.end_of_game_delay,
            reconnect: true,
        }
    }
}

impl BotConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `server_override` - Optional server address override (from CLI args)
    /// * `nickname_override` - Optional nickname override (from CLI args)
    /// * `game_name_override` - Optional game name override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be used
    pub fn from_env(
        server_override: Option<String>,
        nickname_override: Option<String>,
        game_name_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let server = server_override
            .or_else(|| std::env::var("POKERTH_SERVER").ok())
            .unwrap_or(defaults.server);

        let nickname = nickname_override
            .or_else(|| std::env::var("POKERTH_NICKNAME").ok())
            .unwrap_or(defaults.nickname);

        let game_name = game_name_override
            .or_else(|| std::env::var("POKERTH_GAME_NAME").ok())
            .unwrap_or(defaults.game_name);

        let lobby_delay = parse_millis("POKERTH_LOBBY_DELAY_MS")?.unwrap_or(defaults.lobby_delay);
        let end_of_game_delay =
            parse_millis("POKERTH_END_OF_GAME_DELAY_MS")?.unwrap_or(defaults.end_of_game_delay);

        Ok(Self {
            server,
            nickname,
            random_suffix: parse_env_or("POKERTH_RANDOM_SUFFIX", defaults.random_suffix),
            game_name,
            lobby_delay,
            end_of_game_delay,
            reconnect: parse_env_or("POKERTH_RECONNECT", defaults.reconnect),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                var: "POKERTH_SERVER".to_string(),
                hint: format!("Pass --server or set POKERTH_SERVER, e.g. {DEFAULT_SERVER}"),
            });
        }

        if !self.server.contains(':') {
            return Err(ConfigError::Invalid {
                var: "POKERTH_SERVER".to_string(),
                reason: format!("Expected host:port, got {:?}", self.server),
            });
        }

        if self.game_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "POKERTH_GAME_NAME".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        self.protocol_config()
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "POKERTH_NICKNAME".to_string(),
                reason,
            })
    }

    /// Protocol configuration for one bot, with a fresh nickname suffix
    #[must_use]
    pub fn protocol_config(&self) -> ClientConfig {
        let nickname = if self.random_suffix {
            let suffix = rand::rng().random_range(0..NICKNAME_SUFFIX_BOUND);
            let mut nickname = self.nickname.clone();
            // Leave room for the suffix so validation sees the final length.
            let room = MAX_NICKNAME_LEN.saturating_sub(suffix.to_string().len());
            if nickname.chars().count() > room {
                nickname = nickname.chars().take(room).collect();
            }
            format!("{nickname}{suffix}")
        } else {
            self.nickname.clone()
        };

        ClientConfig {
            nickname,
            lobby_delay: self.lobby_delay,
            end_of_game_delay: self.end_of_game_delay,
            ..ClientConfig::default()
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads a millisecond duration, rejecting values that are set but not numbers
fn parse_millis(key: &str) -> Result<Option<Duration>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Expected milliseconds, got {value:?}"),
            }),
        Err(_) => Ok(None),
    }
}
