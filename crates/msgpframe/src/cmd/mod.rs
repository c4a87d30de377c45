use clap::Args;
use clap::Subcommand;
use std::path::PathBuf;

use msgpframe_frame::FrameConfig;
use msgpframe_pipeline::PipelineConfig;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod parse_json;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Frame newline-delimited JSON as msgpack bin records.
    Encode(EncodeArgs),
    /// Read a framed stream back and decode every payload.
    Decode(DecodeArgs),
    /// Parse newline-delimited JSON without producing output.
    ParseJson(ParseJsonArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::ParseJson(args) => parse_json::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON-lines file to read. Default: standard input.
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,
    /// File to create for the frames. Must not exist. Default: standard output.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Largest payload to frame, in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_payload_size: Option<u32>,
    /// Skip empty or whitespace-only lines instead of failing on them.
    #[arg(long)]
    pub skip_blank_lines: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Framed file to read. Default: standard input.
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,
    /// Largest payload to accept, in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_payload_size: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ParseJsonArgs {
    /// JSON-lines file to read. Default: standard input.
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,
    /// Skip empty or whitespace-only lines instead of failing on them.
    #[arg(long)]
    pub skip_blank_lines: bool,
}

pub(crate) fn pipeline_config(max_payload_size: Option<u32>, skip_blank_lines: bool) -> PipelineConfig {
    let mut config = PipelineConfig {
        skip_blank_lines,
        ..PipelineConfig::default()
    };
    if let Some(max) = max_payload_size {
        config.frame = FrameConfig {
            max_payload_size: max as usize,
        };
    }
    config
}
