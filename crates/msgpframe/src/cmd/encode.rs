use std::time::Instant;

use msgpframe_pipeline::{StreamEncoder, StreamPaths};

use super::{pipeline_config, EncodeArgs};
use crate::exit::{config_error, pipeline_error, CliResult, SUCCESS};

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let config = pipeline_config(args.max_payload_size, args.skip_blank_lines);
    let paths = StreamPaths::new(args.input, args.output);
    let (input, output) = paths.open().map_err(config_error)?;
    let (input_name, output_name) = (input.name().to_string(), output.name().to_string());

    let started = Instant::now();
    let mut encoder =
        StreamEncoder::new(input, output, config).with_names(&input_name, &output_name);
    let summary = encoder
        .run()
        .map_err(|err| pipeline_error("encode failed", err))?;

    // stdout may be carrying frames, so the summary only goes to the log
    tracing::info!(
        input = %input_name,
        output = %output_name,
        records = summary.records,
        skipped = summary.skipped,
        bytes_in = summary.bytes_in,
        bytes_out = summary.bytes_out,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "encode complete"
    );
    Ok(SUCCESS)
}
