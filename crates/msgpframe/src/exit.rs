use std::fmt;
use std::io;

use msgpframe_frame::FrameError;
use msgpframe_pipeline::{ConfigError, PipelineError};

// Process exit codes. `2` is kept for input read failures; bad records and
// malformed frames share DATA_INVALID.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const INPUT_READ_ERROR: i32 = 2;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = io_code(&err);
    CliError::new(code, format!("{context}: {err}"))
}

fn io_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::BrokenPipe | io::ErrorKind::WriteZero => FAILURE,
        _ => INTERNAL,
    }
}

fn frame_code(err: &FrameError) -> i32 {
    match err {
        FrameError::Io(source) => io_code(source),
        _ => DATA_INVALID,
    }
}

pub fn config_error(err: ConfigError) -> CliError {
    match err {
        ConfigError::Open { path, source } => {
            io_error(&format!("cannot open '{}'", path.display()), source)
        }
        other => CliError::new(USAGE, other.to_string()),
    }
}

pub fn pipeline_error(context: &str, err: PipelineError) -> CliError {
    let code = match &err {
        PipelineError::Read { .. } => INPUT_READ_ERROR,
        PipelineError::Json { .. }
        | PipelineError::Encode { .. }
        | PipelineError::Malformed { .. }
        | PipelineError::Payload { .. } => DATA_INVALID,
        PipelineError::Frame { source, .. } | PipelineError::Flush { source, .. } => {
            frame_code(source)
        }
    };

    let message = match err.completed() {
        Some(done) => format!("{context}: {err} ({done} records completed)"),
        None => format!("{context}: {err}"),
    };
    CliError::new(code, message)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn read_errors_exit_with_two() {
        let err = PipelineError::Read {
            input: "(stdin)".to_string(),
            source: io::Error::from(io::ErrorKind::InvalidData),
        };
        assert_eq!(pipeline_error("encode failed", err).code, INPUT_READ_ERROR);
    }

    #[test]
    fn oversize_is_data_invalid() {
        let err = PipelineError::Frame {
            line: 4,
            input: "in".to_string(),
            output: "out".to_string(),
            source: FrameError::PayloadTooLarge { size: 10, max: 4 },
        };
        let cli = pipeline_error("encode failed", err);
        assert_eq!(cli.code, DATA_INVALID);
        assert!(cli.message.contains("3 records completed"));
    }

    #[test]
    fn write_failure_uses_io_kind() {
        let err = PipelineError::Flush {
            output: "out".to_string(),
            source: FrameError::Io(io::Error::from(io::ErrorKind::PermissionDenied)),
        };
        assert_eq!(pipeline_error("encode failed", err).code, PERMISSION_DENIED);
    }

    #[test]
    fn malformed_stream_reports_progress() {
        let err = PipelineError::Malformed {
            frame: 8,
            input: "in".to_string(),
            source: FrameError::UnrecognizedTag(0x7b),
        };
        let cli = pipeline_error("decode failed", err);
        assert_eq!(cli.code, DATA_INVALID);
        assert!(cli.message.contains("frame 8"));
        assert!(cli.message.contains("7 records completed"));
    }

    #[test]
    fn config_errors_are_usage() {
        let err = ConfigError::OutputExists(PathBuf::from("/tmp/out.msgpf"));
        let cli = config_error(err);
        assert_eq!(cli.code, USAGE);
        assert!(cli.message.contains("already exists"));
    }
}
