use std::io::{BufRead, Write};

use msgpframe_frame::FrameWriter;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::lines::LineReader;
use crate::record;

/// Counters reported at the end of an encode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EncodeSummary {
    /// Frames written, one per record.
    pub records: u64,
    /// Blank lines skipped (only with `skip_blank_lines`).
    pub skipped: u64,
    /// Bytes consumed from the input.
    pub bytes_in: u64,
    /// Bytes written to the output, headers included.
    pub bytes_out: u64,
}

/// Converts newline-delimited JSON into a stream of msgpack bin frames.
///
/// Each line is parsed, encoded to msgpack and written as one frame. The
/// first failing line aborts the run.
pub struct StreamEncoder<R, W> {
    lines: LineReader<R>,
    writer: FrameWriter<W>,
    payload: Vec<u8>,
    config: PipelineConfig,
    input_name: String,
    output_name: String,
    skipped: u64,
}

impl<R: BufRead, W: Write> StreamEncoder<R, W> {
    pub fn new(input: R, output: W, config: PipelineConfig) -> Self {
        Self {
            lines: LineReader::with_capacity(input, config.line_buffer_capacity),
            writer: FrameWriter::with_config(output, config.frame.clone()),
            payload: Vec::with_capacity(config.payload_buffer_capacity),
            config,
            input_name: crate::io::STDIN_NAME.to_string(),
            output_name: crate::io::STDOUT_NAME.to_string(),
            skipped: 0,
        }
    }

    /// Names used in error messages.
    pub fn with_names(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.input_name = input.into();
        self.output_name = output.into();
        self
    }

    /// Encode every remaining line, then flush the output.
    pub fn run(&mut self) -> Result<EncodeSummary> {
        tracing::debug!(input = %self.input_name, output = %self.output_name, "encode started");
        while self.encode_next()? {}

        self.writer.flush().map_err(|source| PipelineError::Flush {
            output: self.output_name.clone(),
            source,
        })?;

        let summary = self.summary();
        tracing::debug!(
            records = summary.records,
            bytes_in = summary.bytes_in,
            bytes_out = summary.bytes_out,
            "encode finished"
        );
        Ok(summary)
    }

    /// Encode the next line. Returns `false` once the input is exhausted.
    pub fn encode_next(&mut self) -> Result<bool> {
        let next = self
            .lines
            .next_line()
            .map_err(|source| PipelineError::Read {
                input: self.input_name.clone(),
                source,
            })?;
        let Some((line_no, line)) = next else {
            return Ok(false);
        };

        if self.config.skip_blank_lines && record::is_blank(line) {
            self.skipped += 1;
            tracing::warn!(line = line_no, input = %self.input_name, "skipping blank line");
            return Ok(true);
        }

        let value = record::parse_json(line).map_err(|source| PipelineError::Json {
            line: line_no,
            input: self.input_name.clone(),
            source,
        })?;

        self.payload.clear();
        record::encode_msgpack(&value, &mut self.payload).map_err(|source| {
            PipelineError::Encode {
                line: line_no,
                input: self.input_name.clone(),
                source,
            }
        })?;

        self.writer
            .write_payload(&self.payload)
            .map_err(|source| PipelineError::Frame {
                line: line_no,
                input: self.input_name.clone(),
                output: self.output_name.clone(),
                source,
            })?;

        Ok(true)
    }

    /// Counters so far.
    pub fn summary(&self) -> EncodeSummary {
        EncodeSummary {
            records: self.writer.frames_written(),
            skipped: self.skipped,
            bytes_in: self.lines.bytes_read(),
            bytes_out: self.writer.bytes_written(),
        }
    }

    /// Consume the encoder and return the output stream.
    pub fn into_output(self) -> W {
        self.writer.into_inner()
    }
}

/// Encode a whole stream with default names.
pub fn encode_stream<R: BufRead, W: Write>(
    input: R,
    output: W,
    config: PipelineConfig,
) -> Result<EncodeSummary> {
    StreamEncoder::new(input, output, config).run()
}
