//! Frame a small JSON-lines file and read it back.
//!
//! Run with:
//!   cargo run --example frame-file

use std::fs;

use msgpframe::frame::decode_header;
use msgpframe::pipeline::{PipelineConfig, StreamDecoder, StreamEncoder, StreamPaths};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join(format!("msgpframe-example-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let input = dir.join("records.jsonl");
    let output = dir.join("records.msgpf");
    let _ = fs::remove_file(&output);

    fs::write(
        &input,
        "{\"id\":1,\"note\":\"first\"}\n{\"id\":2,\"note\":\"spans\\ntwo lines\"}\n",
    )?;

    let (reader, writer) = StreamPaths::new(Some(input), Some(output.clone())).open()?;
    let summary = StreamEncoder::new(reader, writer, PipelineConfig::default()).run()?;
    eprintln!(
        "Framed {} records: {} bytes in, {} bytes out",
        summary.records, summary.bytes_in, summary.bytes_out
    );

    let bytes = fs::read(&output)?;
    let mut offset = 0;
    while offset < bytes.len() {
        let header = decode_header(&bytes[offset..])?;
        eprintln!(
            "offset {offset}: {:?} header, {} byte payload",
            header.format(),
            header.payload_len()
        );
        offset += header.frame_len();
    }

    let framed = StreamPaths::new(Some(output), None).open_input()?;
    for value in StreamDecoder::new(framed, &PipelineConfig::default()) {
        println!("{}", value?);
    }

    fs::remove_dir_all(&dir)?;
    Ok(())
}
