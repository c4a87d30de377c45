#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/msgpframe-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn msgpframe(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_msgpframe"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("msgpframe should start");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin)
        .expect("stdin should accept input");
    child.wait_with_output().expect("msgpframe should exit")
}

#[test]
fn encode_stdin_to_stdout_writes_minimal_frames() {
    let out = msgpframe(&["encode"], b"{\"a\":1}\n[1,2,3]");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        out.stdout,
        vec![0xc4, 0x04, 0x81, 0xa1, b'a', 0x01, 0xc4, 0x04, 0x93, 0x01, 0x02, 0x03]
    );
}

#[test]
fn encode_then_decode_through_files() {
    let dir = unique_temp_dir("files");
    let input = dir.join("records.jsonl");
    let output = dir.join("records.msgpf");
    std::fs::write(&input, b"{\"id\":1}\n{\"id\":2,\"text\":\"a\\nb\"}\n")
        .expect("input should be writable");

    let encoded = msgpframe(
        &[
            "encode",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ],
        b"",
    );
    assert!(encoded.status.success());
    assert!(encoded.stdout.is_empty());

    let decoded = msgpframe(
        &["decode", "--input", output.to_str().unwrap(), "--format", "json"],
        b"",
    );
    assert!(decoded.status.success());
    let report: Value = serde_json::from_slice(&decoded.stdout).expect("report should be json");
    assert_eq!(report["command"], "decode");
    assert_eq!(report["records"], 2);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn existing_output_is_left_untouched() {
    let dir = unique_temp_dir("exists");
    let input = dir.join("in.jsonl");
    let output = dir.join("out.msgpf");
    std::fs::write(&input, b"1\n").unwrap();
    std::fs::write(&output, b"precious").unwrap();

    let out = msgpframe(
        &[
            "encode",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ],
        b"",
    );

    assert_eq!(out.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    assert_eq!(std::fs::read(&output).unwrap(), b"precious");
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn missing_input_is_a_usage_error() {
    let dir = unique_temp_dir("missing");
    let out = msgpframe(
        &["encode", "--input", dir.join("nope.jsonl").to_str().unwrap()],
        b"",
    );
    assert_eq!(out.status.code(), Some(64));
    assert!(out.stdout.is_empty());
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn invalid_json_names_the_line() {
    let out = msgpframe(&["encode"], b"{\"ok\":true}\n{broken\n{\"never\":1}\n");

    assert_eq!(out.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
    // the first record was already framed
    assert_eq!(out.stdout, vec![0xc4, 0x05, 0x81, 0xa2, b'o', b'k', 0xc3]);
}

#[test]
fn decode_rejects_truncated_stream() {
    let out = msgpframe(&["decode", "--format", "pretty"], &[0xc4, 0x01, 0x01, 0xc4, 0x05, 0x01]);

    assert_eq!(out.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("frame 2"), "stderr: {stderr}");
}

#[test]
fn decode_rejects_unknown_tag() {
    let out = msgpframe(&["decode"], b"{\"a\":1}\n");
    assert_eq!(out.status.code(), Some(60));
}

#[test]
fn decode_rejects_leftover_payload_bytes() {
    let out = msgpframe(&["decode"], &[0xc4, 0x01, 0xc0, 0xc4, 0x03, 0x01, 0xff, 0xff]);

    assert_eq!(out.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("frame 2"), "stderr: {stderr}");
    assert!(stderr.contains("trailing bytes"), "stderr: {stderr}");
}

#[test]
fn parse_json_counts_lines() {
    let out = msgpframe(&["parse-json", "--format", "pretty"], b"1\n\"two\"\n[3]\n");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("parsed a total of 3 json lines"), "stdout: {stdout}");
}

#[test]
fn blank_lines_fail_unless_skipped() {
    let strict = msgpframe(&["encode"], b"1\n\n2\n");
    assert_eq!(strict.status.code(), Some(60));

    let lenient = msgpframe(&["encode", "--skip-blank-lines"], b"1\n\n2\n");
    assert!(lenient.status.success());
    assert_eq!(lenient.stdout, vec![0xc4, 0x01, 0x01, 0xc4, 0x01, 0x02]);
}

#[test]
fn payload_limit_stops_encoding() {
    let out = msgpframe(
        &["encode", "--max-payload-size", "4"],
        b"[1]\n\"longer than four\"\n",
    );
    assert_eq!(out.status.code(), Some(60));
    assert_eq!(out.stdout, vec![0xc4, 0x02, 0x91, 0x01]);
}
