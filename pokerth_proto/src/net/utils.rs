//! Framing and envelope helpers.
//!
//! A frame is `u32_be(payload_len) || payload`, where the payload is the
//! bincode serialization of a [`PokerthMessage`] envelope.

use bincode::config;
use bytes::{BufMut, Bytes, BytesMut};

use super::{
    errors::{EnvelopeError, Result, TransportError},
    messages::{Message, MessageType, PokerthMessage},
};

/// Maximum allowed payload size (1MB) to prevent unbounded allocation
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Length of the big-endian size prefix of every frame.
pub const SIZE_BYTES: usize = 4;

#[must_use]
pub const fn make_size_bytes(n: u32) -> [u8; SIZE_BYTES] {
    n.to_be_bytes()
}

/// Reads the big-endian length prefix from the first four bytes of `data`.
pub fn read_size_bytes(data: &[u8]) -> Result<u32> {
    match data.first_chunk::<SIZE_BYTES>() {
        Some(prefix) => Ok(u32::from_be_bytes(*prefix)),
        None => Err(TransportError::TruncatedHeader),
    }
}

/// Serializes an envelope and prepends its length. Deterministic: the same
/// envelope always produces the same bytes.
pub fn pack(envelope: &PokerthMessage) -> Result<Bytes> {
    let payload = bincode::serde::encode_to_vec(envelope, config::standard())?;
    if payload.len() > MAX_MESSAGE_SIZE {
        return Err(TransportError::MessageTooLarge {
            actual: payload.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }

    // Prefix and payload go out as one chunk.
    let mut buf = BytesMut::with_capacity(SIZE_BYTES + payload.len());
    buf.put_u32(payload.len() as u32);
    buf.extend_from_slice(&payload);
    Ok(buf.freeze())
}

/// Parses one complete frame. The declared length must match the payload
/// exactly and the payload must decode without leftovers.
pub fn unpack(data: &[u8]) -> Result<PokerthMessage> {
    let declared = read_size_bytes(data)? as usize;
    let payload = &data[SIZE_BYTES..];
    if declared != payload.len() {
        return Err(TransportError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    let (envelope, consumed): (PokerthMessage, usize) =
        bincode::serde::decode_from_slice(payload, config::standard())?;
    if consumed != payload.len() {
        return Err(TransportError::TrailingBytes(payload.len() - consumed));
    }
    Ok(envelope)
}

/// Wraps a concrete message into an envelope with its type tag set.
pub fn envelop(message: impl Into<Message>) -> PokerthMessage {
    PokerthMessage::wrap(message.into())
}

/// Unwraps the single populated payload of an envelope.
pub fn develop(envelope: PokerthMessage) -> std::result::Result<Message, EnvelopeError> {
    let tag = envelope.message_type;
    let mut populated = envelope.into_populated();
    if populated.len() != 1 {
        return Err(EnvelopeError::Malformed {
            populated: populated.len(),
        });
    }
    let Some(message) = populated.pop() else {
        return Err(EnvelopeError::Malformed { populated: 0 });
    };

    let found = message.message_type();
    match MessageType::try_from(tag)? {
        expected if expected == found => Ok(message),
        _ => Err(EnvelopeError::TagMismatch {
            tag,
            slot: found.slot(),
        }),
    }
}

/// Envelops and packs in one step.
pub fn pack_envelop(message: impl Into<Message>) -> Result<Bytes> {
    pack(&envelop(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::messages::{
        ChatRequestMessage, InitAckMessage, InitMessage, LoginType, ResetTimeoutMessage, Version,
    };

    fn init_ack() -> InitAckMessage {
        InitAckMessage {
            your_session_id: vec![7, 7, 7],
            your_player_id: 42,
            your_avatar_hash: None,
            rejoin_game_id: None,
        }
    }

    // === Size Prefix Tests ===

    #[test]
    fn test_size_bytes_big_endian() {
        assert_eq!(make_size_bytes(1), [0, 0, 0, 1]);
        assert_eq!(make_size_bytes(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(read_size_bytes(&[0, 0, 1, 0, 99]).unwrap(), 256);
    }

    #[test]
    fn test_read_size_bytes_truncated() {
        assert!(matches!(
            read_size_bytes(&[0, 0, 1]),
            Err(TransportError::TruncatedHeader)
        ));
    }

    // === Pack/Unpack Tests ===

    #[test]
    fn test_pack_prefix_matches_payload_length() {
        let frame = pack_envelop(init_ack()).unwrap();
        let declared = read_size_bytes(&frame).unwrap() as usize;
        assert_eq!(declared, frame.len() - SIZE_BYTES);
    }

    #[test]
    fn test_pack_is_deterministic() {
        let envelope = envelop(ChatRequestMessage {
            target_game_id: Some(5),
            target_player_id: Some(6),
            chat_text: "Pooong".to_string(),
        });
        assert_eq!(pack(&envelope).unwrap(), pack(&envelope).unwrap());
    }

    #[test]
    fn test_unpack_restores_envelope() {
        let envelope = envelop(InitMessage {
            requested_version: Version {
                major_version: 5,
                minor_version: 1,
            },
            build_id: 0,
            login: LoginType::Unauthenticated,
            nick_name: Some("Bot".to_string()),
            ..InitMessage::default()
        });
        let frame = pack(&envelope).unwrap();
        assert_eq!(unpack(&frame).unwrap(), envelope);
    }

    #[test]
    fn test_unpack_length_mismatch() {
        let frame = pack_envelop(init_ack()).unwrap();

        let short = &frame[..frame.len() - 1];
        assert!(matches!(
            unpack(short),
            Err(TransportError::LengthMismatch { declared, actual }) if declared == actual + 1
        ));

        let mut long = frame.to_vec();
        long.push(0);
        assert!(matches!(
            unpack(&long),
            Err(TransportError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_unpack_truncated_header() {
        assert!(matches!(unpack(&[0, 0]), Err(TransportError::TruncatedHeader)));
    }

    #[test]
    fn test_unpack_garbage_payload() {
        let mut frame = make_size_bytes(3).to_vec();
        frame.extend_from_slice(&[0xff, 0xff, 0xff]);
        assert!(unpack(&frame).is_err());
    }

    // === Envelope Tests ===

    #[test]
    fn test_develop_envelop() {
        let message: Message = init_ack().into();
        assert_eq!(develop(envelop(message.clone())).unwrap(), message);
    }

    #[test]
    fn test_develop_empty_envelope() {
        assert_eq!(
            develop(PokerthMessage::default()),
            Err(EnvelopeError::Malformed { populated: 0 })
        );
    }

    #[test]
    fn test_develop_two_slots() {
        let mut envelope = envelop(ResetTimeoutMessage {});
        envelope.init_ack_message = Some(init_ack());
        assert_eq!(
            develop(envelope),
            Err(EnvelopeError::Malformed { populated: 2 })
        );
    }

    #[test]
    fn test_develop_tag_mismatch() {
        let mut envelope = envelop(ResetTimeoutMessage {});
        envelope.message_type = MessageType::InitAckMessage as u32;
        assert_eq!(
            develop(envelope),
            Err(EnvelopeError::TagMismatch {
                tag: MessageType::InitAckMessage as u32,
                slot: "reset_timeout_message",
            })
        );
    }

    #[test]
    fn test_develop_unknown_tag() {
        let mut envelope = envelop(ResetTimeoutMessage {});
        envelope.message_type = 999;
        assert_eq!(develop(envelope), Err(EnvelopeError::UnknownTag(999)));
    }
}
