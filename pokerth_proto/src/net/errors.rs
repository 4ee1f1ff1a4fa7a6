//! Network error types for framing and envelope operations.

use thiserror::Error;

/// Errors that can occur while framing or (de)serializing an envelope.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to encode an envelope
    #[error("Failed to encode message: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Failed to decode an envelope
    #[error("Failed to decode message: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// The 4-byte length prefix disagrees with the payload that follows it.
    /// The stream is desynchronized and cannot be recovered in place.
    #[error("Frame declares {declared} payload bytes but carries {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// Fewer than 4 bytes were available for the length prefix
    #[error("Frame is shorter than its 4-byte length prefix")]
    TruncatedHeader,

    /// Declared or serialized size exceeded the configured maximum
    #[error("Message size {actual} exceeds maximum {max}")]
    MessageTooLarge { actual: usize, max: usize },

    /// The payload decoded without consuming every byte
    #[error("Payload decoded with {0} trailing bytes")]
    TrailingBytes(usize),
}

impl TransportError {
    /// Decode errors leave the frame boundary intact and only cost the frame.
    #[must_use]
    pub const fn is_framing(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::TruncatedHeader | Self::MessageTooLarge { .. }
        )
    }
}

/// Errors raised when developing an envelope into a concrete message.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum EnvelopeError {
    /// Zero or several payload slots were populated
    #[error("Malformed envelope: {populated} payload slots populated, expected exactly one")]
    Malformed { populated: usize },

    /// The populated slot does not correspond to the message type tag
    #[error("Envelope tag {tag} does not match populated slot {slot}")]
    TagMismatch { tag: u32, slot: &'static str },

    /// The tag is not part of the schema
    #[error("Unknown message type tag {0}")]
    UnknownTag(u32),
}

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_classification() {
        assert!(TransportError::TruncatedHeader.is_framing());
        assert!(TransportError::LengthMismatch { declared: 4, actual: 3 }.is_framing());
        assert!(TransportError::MessageTooLarge { actual: 10, max: 5 }.is_framing());
        assert!(!TransportError::TrailingBytes(2).is_framing());
    }

    #[test]
    fn test_error_messages() {
        let error = TransportError::LengthMismatch { declared: 8, actual: 6 };
        assert_eq!(error.to_string(), "Frame declares 8 payload bytes but carries 6");
        let error = EnvelopeError::Malformed { populated: 0 };
        assert!(error.to_string().contains("0 payload slots"));
    }
}
