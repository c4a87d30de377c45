use std::time::Instant;

use msgpframe_pipeline::{StreamDecoder, StreamPaths};

use super::{pipeline_config, DecodeArgs};
use crate::exit::{config_error, pipeline_error, CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat, RunReport};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = pipeline_config(args.max_payload_size, false);
    let input = StreamPaths::new(args.input, None)
        .open_input()
        .map_err(config_error)?;
    let input_name = input.name().to_string();

    let started = Instant::now();
    let mut decoder = StreamDecoder::new(input, &config).with_input_name(&input_name);
    let summary = decoder
        .run()
        .map_err(|err| pipeline_error("decode failed", err))?;
    let elapsed = started.elapsed();

    tracing::debug!(frames = summary.frames, payload_bytes = summary.payload_bytes, "decode complete");
    print_report(
        &RunReport {
            command: "decode",
            input: &input_name,
            unit: "msgpack frames",
            records: summary.frames,
            bytes: summary.payload_bytes,
            elapsed,
        },
        format,
    );
    Ok(SUCCESS)
}
