mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "msgpframe",
    version,
    about = "Frame newline-delimited JSON as msgpack bin records"
)]
struct Cli {
    /// Report format for decode and parse-json.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr). Default: RUST_LOG, else info.
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from([
            "msgpframe",
            "encode",
            "--input",
            "/tmp/in.jsonl",
            "-o",
            "/tmp/out.msgpf",
            "--skip-blank-lines",
        ])
        .expect("encode args should parse");

        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        assert_eq!(args.input.as_deref(), Some(std::path::Path::new("/tmp/in.jsonl")));
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("/tmp/out.msgpf")));
        assert!(args.skip_blank_lines);
    }

    #[test]
    fn encode_defaults_to_standard_streams() {
        let cli = Cli::try_parse_from(["msgpframe", "encode"]).expect("bare encode should parse");
        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert!(!args.skip_blank_lines);
    }

    #[test]
    fn decode_rejects_output_flag() {
        let err = Cli::try_parse_from(["msgpframe", "decode", "--output", "/tmp/x"])
            .expect_err("decode has no output");
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn parses_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["msgpframe", "parse-json", "--format", "pretty"])
            .expect("parse-json args should parse");
        assert!(matches!(cli.command, Command::ParseJson(_)));
        assert!(matches!(cli.format, Some(OutputFormat::Pretty)));
    }

    #[test]
    fn rejects_payload_limit_above_format_maximum() {
        let err = Cli::try_parse_from(["msgpframe", "encode", "--max-payload-size", "4294967296"])
            .expect_err("limit must fit in u32");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
