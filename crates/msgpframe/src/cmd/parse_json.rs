use std::time::Instant;

use msgpframe_pipeline::{parse_json_lines, StreamPaths};

use super::{pipeline_config, ParseJsonArgs};
use crate::exit::{config_error, pipeline_error, CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat, RunReport};

pub fn run(args: ParseJsonArgs, format: OutputFormat) -> CliResult<i32> {
    let config = pipeline_config(None, args.skip_blank_lines);
    let input = StreamPaths::new(args.input, None)
        .open_input()
        .map_err(config_error)?;
    let input_name = input.name().to_string();

    let started = Instant::now();
    let summary = parse_json_lines(input, &input_name, &config)
        .map_err(|err| pipeline_error("parse-json failed", err))?;
    let elapsed = started.elapsed();

    if summary.skipped > 0 {
        tracing::info!(skipped = summary.skipped, "blank lines skipped");
    }
    print_report(
        &RunReport {
            command: "parse-json",
            input: &input_name,
            unit: "json lines",
            records: summary.records,
            bytes: summary.bytes_in,
            elapsed,
        },
        format,
    );
    Ok(SUCCESS)
}
