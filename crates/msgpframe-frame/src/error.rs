/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The first header byte is not one of the msgpack bin tags.
    #[error("unrecognized frame tag 0x{0:02x} (expected 0xc4, 0xc5 or 0xc6)")]
    UnrecognizedTag(u8),

    /// Fewer bytes are available than the header variant requires.
    #[error("truncated frame header ({available} of {needed} bytes)")]
    TruncatedHeader { needed: usize, available: usize },

    /// The stream ended before the declared payload was complete.
    #[error("truncated frame payload ({available} of {expected} bytes)")]
    TruncatedPayload { expected: usize, available: usize },

    /// The payload exceeds the configured maximum size.
    #[error("record too large to frame ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// True for errors caused by a corrupt or misaligned byte stream.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            FrameError::UnrecognizedTag(_)
                | FrameError::TruncatedHeader { .. }
                | FrameError::TruncatedPayload { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
