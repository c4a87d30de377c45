use std::io::BufRead;

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::lines::LineReader;
use crate::record;

/// Counters reported after parsing a JSON-lines stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Lines parsed as JSON.
    pub records: u64,
    /// Blank lines skipped (only with `skip_blank_lines`).
    pub skipped: u64,
    /// Bytes consumed from the input.
    pub bytes_in: u64,
}

/// Parse every line of `input` as JSON without producing output.
///
/// Used to measure JSON ingest on its own, with the same line contract and
/// error reporting as the encoder.
pub fn parse_json_lines<R: BufRead>(
    input: R,
    input_name: &str,
    config: &PipelineConfig,
) -> Result<ScanSummary> {
    let mut lines = LineReader::with_capacity(input, config.line_buffer_capacity);
    let mut summary = ScanSummary::default();

    loop {
        let next = lines.next_line().map_err(|source| PipelineError::Read {
            input: input_name.to_string(),
            source,
        })?;
        let Some((line_no, line)) = next else {
            break;
        };

        if config.skip_blank_lines && record::is_blank(line) {
            summary.skipped += 1;
            continue;
        }

        record::parse_json(line).map_err(|source| PipelineError::Json {
            line: line_no,
            input: input_name.to_string(),
            source,
        })?;
        summary.records += 1;
    }

    summary.bytes_in = lines.bytes_read();
    tracing::debug!(records = summary.records, input = %input_name, "json scan finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn counts_lines() {
        let input = Cursor::new(b"{\"a\":1}\n[1,2]\n\"x\"".to_vec());
        let summary = parse_json_lines(input, "in.jsonl", &PipelineConfig::default()).unwrap();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.bytes_in, 17);
    }

    #[test]
    fn stops_at_first_bad_line() {
        let input = Cursor::new(b"1\n2\nnope\n4\n".to_vec());
        let err = parse_json_lines(input, "in.jsonl", &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Json { line: 3, .. }));
    }

    #[test]
    fn skips_blank_lines_when_configured() {
        let config = PipelineConfig {
            skip_blank_lines: true,
            ..PipelineConfig::default()
        };
        let input = Cursor::new(b"\n1\n\n".to_vec());
        let summary = parse_json_lines(input, "in.jsonl", &config).unwrap();
        assert_eq!(summary.records, 1);
        assert_eq!(summary.skipped, 2);
    }
}
