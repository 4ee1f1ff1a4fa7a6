//! Incremental frame reassembly.
//!
//! Bytes arrive in arbitrary chunks. [`FrameBuffer`] keeps whatever has not
//! formed a complete frame yet and hands out complete frames, prefix
//! included, in arrival order. Feeding a byte sequence in one chunk or in
//! many yields the same frames.

use bytes::{Bytes, BytesMut};

use super::{
    errors::{Result, TransportError},
    utils::{MAX_MESSAGE_SIZE, SIZE_BYTES, read_size_bytes},
};

#[derive(Debug)]
pub struct FrameBuffer {
    buf: BytesMut,
    /// Payload length of the frame at the head of the buffer, once its
    /// prefix has arrived.
    pending: Option<usize>,
    max_frame_size: usize,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(MAX_MESSAGE_SIZE)
    }
}

impl FrameBuffer {
    #[must_use]
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            pending: None,
            max_frame_size,
        }
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Splits off the next complete frame, if one is buffered.
    ///
    /// A declared length above the maximum frame size is a framing error;
    /// the buffer is left untouched so the caller can tear the stream down.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>> {
        let len = match self.pending {
            Some(len) => len,
            None => {
                if self.buf.len() < SIZE_BYTES {
                    return Ok(None);
                }
                let len = read_size_bytes(&self.buf)? as usize;
                if len > self.max_frame_size {
                    return Err(TransportError::MessageTooLarge {
                        actual: len,
                        max: self.max_frame_size,
                    });
                }
                self.pending = Some(len);
                len
            }
        };

        if self.buf.len() < SIZE_BYTES + len {
            return Ok(None);
        }
        self.pending = None;
        Ok(Some(self.buf.split_to(SIZE_BYTES + len).freeze()))
    }

    /// Appends a chunk and returns every frame it completed.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Bytes>> {
        self.extend(data);
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        Ok(frames)
    }

    /// Bytes buffered but not yet handed out.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Payload length of the partially received frame, if its prefix is known.
    #[must_use]
    pub const fn pending_len(&self) -> Option<usize> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::utils::make_size_bytes;

    fn frame(payload: &[u8]) -> Vec<u8> {
        let mut frame = make_size_bytes(payload.len() as u32).to_vec();
        frame.extend_from_slice(payload);
        frame
    }

    #[test]
    fn test_single_frame_in_one_chunk() {
        let mut buffer = FrameBuffer::default();
        let frames = buffer.push(&frame(b"hello")).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &frame(b"hello")[..]);
        assert_eq!(buffer.buffered(), 0);
        assert_eq!(buffer.pending_len(), None);
    }

    #[test]
    fn test_multiple_frames_in_one_chunk() {
        let mut buffer = FrameBuffer::default();
        let mut data = frame(b"one");
        data.extend(frame(b"two"));
        data.extend(frame(b""));
        let frames = buffer.push(&data).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(&frames[1][SIZE_BYTES..], b"two");
        assert_eq!(frames[2].len(), SIZE_BYTES);
    }

    #[test]
    fn test_chunk_ends_mid_header() {
        let mut buffer = FrameBuffer::default();
        let data = frame(b"abc");
        assert!(buffer.push(&data[..2]).unwrap().is_empty());
        assert_eq!(buffer.pending_len(), None);
        let frames = buffer.push(&data[2..]).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_chunk_ends_mid_body() {
        let mut buffer = FrameBuffer::default();
        let data = frame(b"abcdef");
        assert!(buffer.push(&data[..6]).unwrap().is_empty());
        assert_eq!(buffer.pending_len(), Some(6));
        assert_eq!(buffer.buffered(), 6);
        let frames = buffer.push(&data[6..]).unwrap();
        assert_eq!(&frames[0][..], &data[..]);
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut buffer = FrameBuffer::default();
        let mut data = frame(b"first");
        data.extend(frame(b"second"));
        let mut frames = Vec::new();
        for byte in &data {
            frames.extend(buffer.push(std::slice::from_ref(byte)).unwrap());
        }
        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0][SIZE_BYTES..], b"first");
        assert_eq!(&frames[1][SIZE_BYTES..], b"second");
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut buffer = FrameBuffer::new(8);
        let result = buffer.push(&make_size_bytes(9));
        assert!(matches!(
            result,
            Err(TransportError::MessageTooLarge { actual: 9, max: 8 })
        ));
    }

    #[test]
    fn test_clear() {
        let mut buffer = FrameBuffer::default();
        buffer.extend(&frame(b"abcdef")[..7]);
        assert!(buffer.next_frame().unwrap().is_none());
        buffer.clear();
        assert_eq!(buffer.buffered(), 0);
        assert_eq!(buffer.pending_len(), None);
    }
}
