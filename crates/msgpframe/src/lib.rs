//! Self-delimiting msgpack framing for newline-delimited JSON.
//!
//! msgpframe converts JSON-lines input into a stream of msgpack `bin`
//! frames, one per record, so that records containing newlines can be read
//! back without ambiguity. The header adds 2 to 5 bytes per record.
//!
//! # Crate Structure
//!
//! - [`frame`]: Minimal-width bin header codec, frame reader and writer
//! - [`pipeline`]: Line-by-line encode and frame-by-frame decode (behind `pipeline` feature)

/// Re-export frame types.
pub mod frame {
    pub use msgpframe_frame::*;
}

/// Re-export pipeline types (requires `pipeline` feature).
#[cfg(feature = "pipeline")]
pub mod pipeline {
    pub use msgpframe_pipeline::*;
}
