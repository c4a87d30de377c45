//! Streaming conversion between newline-delimited JSON and msgpack bin frames.
//!
//! The encode direction reads one JSON record per line and writes each as a
//! msgpack payload behind a minimal bin header. The decode direction reads
//! the frames back and decodes every payload, for validation and benchmarks.
//!
//! Both directions are single-threaded and pull-based: one record is fully
//! handled before the next is read.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod io;
pub mod lines;
pub mod record;
pub mod scan;

pub use config::PipelineConfig;
pub use decode::{decode_stream, DecodeSummary, StreamDecoder};
pub use encode::{encode_stream, EncodeSummary, StreamEncoder};
pub use error::{ConfigError, PipelineError, Result};
pub use io::{Input, Output, StreamPaths};
pub use lines::LineReader;
pub use scan::{parse_json_lines, ScanSummary};
