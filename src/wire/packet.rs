// src/wire/packet.rs

/// Room for two full captures plus command, timings and tags.
pub const DEFAULT_MAX_PACKET_LEN: usize = 4096 * 2 + 256 + 1024 + 8 + 100;

/// Serialized report, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    bytes: Vec<u8>,
    encoded_len: usize,
}

impl Packet {
    /// Wrap encoder output, cutting it at `max_len`.
    ///
    /// Truncation is lossy and silent apart from [`Packet::truncated`].
    pub fn from_encoded(mut bytes: Vec<u8>, max_len: usize) -> Self {
        let encoded_len = bytes.len();
        bytes.truncate(max_len);
        Self { bytes, encoded_len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length that will actually be sent.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length the encoder produced before the cap was applied.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    pub fn truncated(&self) -> bool {
        self.encoded_len > self.bytes.len()
    }
}
