use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// msgpack `bin 8` tag: 1-byte length.
pub const BIN8: u8 = 0xc4;

/// msgpack `bin 16` tag: 2-byte big-endian length.
pub const BIN16: u8 = 0xc5;

/// msgpack `bin 32` tag: 4-byte big-endian length.
pub const BIN32: u8 = 0xc6;

/// Widest header the codec produces: tag (1) + length (4).
pub const MAX_HEADER_SIZE: usize = 5;

/// Largest payload a header can describe.
pub const MAX_PAYLOAD: usize = u32::MAX as usize;

/// Most buffer space reserved ahead of payload bytes that have not arrived.
///
/// A header may claim up to 4 GiB; the buffer only grows past this as the
/// payload is actually read.
pub const MAX_RESERVE_AHEAD: usize = 64 * 1024;

/// Header variant, selected by payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinFormat {
    /// Payloads of 0..=255 bytes.
    Bin8,
    /// Payloads of 256..=65535 bytes.
    Bin16,
    /// Payloads of 65536..=u32::MAX bytes.
    Bin32,
}

impl BinFormat {
    /// The narrowest variant able to describe `len`.
    pub fn for_len(len: u32) -> Self {
        if len <= u32::from(u8::MAX) {
            BinFormat::Bin8
        } else if len <= u32::from(u16::MAX) {
            BinFormat::Bin16
        } else {
            BinFormat::Bin32
        }
    }

    /// Map a tag byte back to its variant.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            BIN8 => Some(BinFormat::Bin8),
            BIN16 => Some(BinFormat::Bin16),
            BIN32 => Some(BinFormat::Bin32),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            BinFormat::Bin8 => BIN8,
            BinFormat::Bin16 => BIN16,
            BinFormat::Bin32 => BIN32,
        }
    }

    /// Total header width in bytes, tag included.
    pub fn header_len(self) -> usize {
        match self {
            BinFormat::Bin8 => 2,
            BinFormat::Bin16 => 3,
            BinFormat::Bin32 => 5,
        }
    }

    /// Largest payload length this variant can carry.
    pub fn max_len(self) -> u32 {
        match self {
            BinFormat::Bin8 => u32::from(u8::MAX),
            BinFormat::Bin16 => u32::from(u16::MAX),
            BinFormat::Bin32 => u32::MAX,
        }
    }
}

/// A decoded (or about to be encoded) frame header.
///
/// Headers built by [`FrameHeader::new`] always use the minimal variant.
/// Headers returned by [`decode_header`] keep whatever variant was on the
/// wire, so a peer that writes a wider header than needed is still readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    format: BinFormat,
    payload_len: u32,
}

impl FrameHeader {
    /// Minimal header for a payload of `payload_len` bytes.
    pub fn new(payload_len: u32) -> Self {
        Self {
            format: BinFormat::for_len(payload_len),
            payload_len,
        }
    }

    /// Checked conversion from an in-memory buffer length.
    pub fn for_payload_len(len: usize) -> Result<Self> {
        u32::try_from(len)
            .map(Self::new)
            .map_err(|_| FrameError::PayloadTooLarge {
                size: len,
                max: MAX_PAYLOAD,
            })
    }

    pub fn format(&self) -> BinFormat {
        self.format
    }

    /// Width of the header on the wire.
    pub fn header_len(&self) -> usize {
        self.format.header_len()
    }

    /// Number of payload bytes following the header.
    pub fn payload_len(&self) -> usize {
        self.payload_len as usize
    }

    /// Bytes the reader must consume for the whole frame (header + payload).
    pub fn frame_len(&self) -> usize {
        self.header_len().saturating_add(self.payload_len())
    }

    /// True when no narrower variant could carry this payload length.
    pub fn is_minimal(&self) -> bool {
        self.format == BinFormat::for_len(self.payload_len)
    }

    /// Serialize the header.
    pub fn encode(&self) -> EncodedHeader {
        let mut buf = [0u8; MAX_HEADER_SIZE];
        buf[0] = self.format.tag();
        match self.format {
            BinFormat::Bin8 => buf[1] = self.payload_len as u8,
            BinFormat::Bin16 => buf[1..3].copy_from_slice(&(self.payload_len as u16).to_be_bytes()),
            BinFormat::Bin32 => buf[1..5].copy_from_slice(&self.payload_len.to_be_bytes()),
        }
        EncodedHeader {
            buf,
            len: self.format.header_len() as u8,
        }
    }
}

/// Header bytes held on the stack, ready to be written ahead of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedHeader {
    buf: [u8; MAX_HEADER_SIZE],
    len: u8,
}

impl EncodedHeader {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; every header carries at least a tag and one length byte.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for EncodedHeader {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encode the minimal header for a payload length.
///
/// Wire format:
/// ```text
/// ┌──────┬──────────────────────┬────────────┐
/// │ 0xc4 │ len (1B)             │ payload    │  len < 2^8
/// │ 0xc5 │ len (2B BE)          │ payload    │  len < 2^16
/// │ 0xc6 │ len (4B BE)          │ payload    │  len < 2^32
/// └──────┴──────────────────────┴────────────┘
/// ```
pub fn encode_header(payload_len: u32) -> EncodedHeader {
    FrameHeader::new(payload_len).encode()
}

/// Decode the header at the start of `src`.
///
/// Only the header bytes are required; the payload does not need to be
/// present yet.
pub fn decode_header(src: &[u8]) -> Result<FrameHeader> {
    let Some(&tag) = src.first() else {
        return Err(FrameError::TruncatedHeader {
            needed: 1,
            available: 0,
        });
    };

    let format = BinFormat::from_tag(tag).ok_or(FrameError::UnrecognizedTag(tag))?;
    let needed = format.header_len();
    if src.len() < needed {
        return Err(FrameError::TruncatedHeader {
            needed,
            available: src.len(),
        });
    }

    let payload_len = match format {
        BinFormat::Bin8 => u32::from(src[1]),
        BinFormat::Bin16 => u32::from(u16::from_be_bytes([src[1], src[2]])),
        BinFormat::Bin32 => u32::from_be_bytes([src[1], src[2], src[3], src[4]]),
    };

    Ok(FrameHeader {
        format,
        payload_len,
    })
}

/// Append a complete frame (header + payload) to `dst`.
///
/// Nothing is appended when the payload is too large to frame.
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<FrameHeader> {
    let header = FrameHeader::for_payload_len(payload.len())?;
    dst.reserve(header.frame_len());
    dst.put_slice(header.encode().as_bytes());
    dst.put_slice(payload);
    Ok(header)
}

/// Decode one frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes exactly the frame's bytes and returns its payload.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Bytes>> {
    if src.is_empty() {
        return Ok(None);
    }

    let header = match decode_header(src) {
        Ok(header) => header,
        Err(FrameError::TruncatedHeader { .. }) => return Ok(None),
        Err(err) => return Err(err),
    };

    if header.payload_len() > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: header.payload_len(),
            max: max_payload,
        });
    }

    let total = header.frame_len();
    if src.len() < total {
        src.reserve((total - src.len()).min(MAX_RESERVE_AHEAD));
        return Ok(None);
    }

    src.advance(header.header_len());
    Ok(Some(src.split_to(header.payload_len()).freeze()))
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: the format limit, `u32::MAX`.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD,
        }
    }
}
