use std::path::PathBuf;

use msgpframe_frame::FrameError;

/// Errors raised while validating input/output locations.
///
/// These are reported before any stream is opened.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input path does not exist.
    #[error("input path '{}' does not exist", .0.display())]
    InputMissing(PathBuf),

    /// The input path exists but is not a regular file.
    #[error("input path '{}' is not a file", .0.display())]
    InputNotFile(PathBuf),

    /// The output path already exists and would be overwritten.
    #[error("output path '{}' already exists (delete or move it away first)", .0.display())]
    OutputExists(PathBuf),

    /// Opening or creating a file failed.
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Reading the input stream failed (not end-of-stream).
    #[error("reading input '{input}' failed: {source}")]
    Read {
        input: String,
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid JSON record.
    #[error("at line {line} of input '{input}', JSON decode error: {source}")]
    Json {
        line: u64,
        input: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be encoded as msgpack.
    #[error("at line {line} of input '{input}', msgpack encode error: {source}")]
    Encode {
        line: u64,
        input: String,
        #[source]
        source: rmp_serde::encode::Error,
    },

    /// An encoded record could not be framed or written.
    #[error("at line {line} of input '{input}', writing frame to '{output}' failed: {source}")]
    Frame {
        line: u64,
        input: String,
        output: String,
        #[source]
        source: FrameError,
    },

    /// The framed stream is corrupt or ended mid-frame.
    #[error("at frame {frame} of input '{input}', malformed stream: {source}")]
    Malformed {
        frame: u64,
        input: String,
        #[source]
        source: FrameError,
    },

    /// A frame payload is not valid msgpack.
    #[error("at frame {frame} of input '{input}', msgpack decode error: {source}")]
    Payload {
        frame: u64,
        input: String,
        #[source]
        source: rmp_serde::decode::Error,
    },

    /// Flushing the output at the end of the run failed.
    #[error("flushing output '{output}' failed: {source}")]
    Flush {
        output: String,
        #[source]
        source: FrameError,
    },
}

impl PipelineError {
    /// Lines or frames fully processed before the failing one.
    pub fn completed(&self) -> Option<u64> {
        match self {
            PipelineError::Json { line, .. }
            | PipelineError::Encode { line, .. }
            | PipelineError::Frame { line, .. } => Some(line.saturating_sub(1)),
            PipelineError::Malformed { frame, .. } | PipelineError::Payload { frame, .. } => {
                Some(frame.saturating_sub(1))
            }
            PipelineError::Read { .. } | PipelineError::Flush { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
