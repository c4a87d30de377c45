//! Length-prefixed framing compatible with msgpack's `bin` family.
//!
//! Every payload is preceded by the narrowest header able to describe it:
//! - `0xc4` + 1-byte length for payloads under 256 bytes
//! - `0xc5` + 2-byte big-endian length under 64 KiB
//! - `0xc6` + 4-byte big-endian length up to `u32::MAX`
//!
//! Frames are written back to back; the headers are the only delimiters.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_frame, decode_header, encode_frame, encode_header, BinFormat, EncodedHeader,
    FrameConfig, FrameHeader, BIN16, BIN32, BIN8, MAX_HEADER_SIZE, MAX_PAYLOAD,
    MAX_RESERVE_AHEAD,
};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
