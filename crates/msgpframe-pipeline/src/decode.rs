use std::io::Read;

use bytes::Bytes;
use msgpframe_frame::{FrameError, FrameReader};
use serde::Serialize;
use serde_json::Value;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::record;

/// Counters reported at the end of a decode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodeSummary {
    /// Frames read. A frame whose payload fails to decode is still counted.
    pub frames: u64,
    /// Payload bytes decoded, headers excluded.
    pub payload_bytes: u64,
}

/// Reads msgpack bin frames and decodes each payload into a value.
pub struct StreamDecoder<R> {
    reader: FrameReader<R>,
    input_name: String,
    frames: u64,
    payload_bytes: u64,
}

impl<R: Read> StreamDecoder<R> {
    pub fn new(input: R, config: &PipelineConfig) -> Self {
        Self {
            reader: FrameReader::with_config(input, config.frame.clone()),
            input_name: crate::io::STDIN_NAME.to_string(),
            frames: 0,
            payload_bytes: 0,
        }
    }

    /// Name used in error messages.
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    /// Next raw payload, or `None` at a clean end-of-stream.
    pub fn next_payload(&mut self) -> Result<Option<Bytes>> {
        match self.reader.read_frame() {
            Ok(Some(payload)) => {
                self.frames += 1;
                self.payload_bytes += payload.len() as u64;
                Ok(Some(payload))
            }
            Ok(None) => Ok(None),
            Err(FrameError::Io(source)) => Err(PipelineError::Read {
                input: self.input_name.clone(),
                source,
            }),
            Err(source) => Err(PipelineError::Malformed {
                frame: self.frames + 1,
                input: self.input_name.clone(),
                source,
            }),
        }
    }

    /// Next decoded record, or `None` at a clean end-of-stream.
    pub fn next_record(&mut self) -> Result<Option<Value>> {
        let Some(payload) = self.next_payload()? else {
            return Ok(None);
        };

        record::decode_msgpack(&payload)
            .map(Some)
            .map_err(|source| PipelineError::Payload {
                frame: self.frames,
                input: self.input_name.clone(),
                source,
            })
    }

    /// Decode every remaining frame.
    pub fn run(&mut self) -> Result<DecodeSummary> {
        tracing::debug!(input = %self.input_name, "decode started");
        while self.next_record()?.is_some() {}

        let summary = self.summary();
        tracing::debug!(
            frames = summary.frames,
            payload_bytes = summary.payload_bytes,
            "decode finished"
        );
        Ok(summary)
    }

    /// Counters so far.
    pub fn summary(&self) -> DecodeSummary {
        DecodeSummary {
            frames: self.frames,
            payload_bytes: self.payload_bytes,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read> Iterator for StreamDecoder<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Decode a whole stream with default names.
pub fn decode_stream<R: Read>(input: R, config: &PipelineConfig) -> Result<DecodeSummary> {
    StreamDecoder::new(input, config).run()
}
