//! Conversions between JSON text, structured values and msgpack payloads.

use std::io::Cursor;

use serde_json::Value;

/// Parse one line of JSON text into a value.
///
/// Surrounding whitespace, including the line terminator, is ignored.
pub fn parse_json(line: &[u8]) -> serde_json::Result<Value> {
    serde_json::from_slice(line)
}

/// Encode a value as msgpack, appending to `dst`.
///
/// Maps are written with string keys in the value's own key order.
pub fn encode_msgpack(value: &Value, dst: &mut Vec<u8>) -> Result<(), rmp_serde::encode::Error> {
    rmp_serde::encode::write_named(dst, value)
}

/// Decode a msgpack payload back into a value.
///
/// The payload must hold exactly one value; leftover bytes are an error.
pub fn decode_msgpack(payload: &[u8]) -> Result<Value, rmp_serde::decode::Error> {
    let mut cursor = Cursor::new(payload);
    let value = rmp_serde::from_read(&mut cursor)?;

    let consumed = cursor.position() as usize;
    if consumed < payload.len() {
        return Err(rmp_serde::decode::Error::Syntax(format!(
            "{} trailing bytes after msgpack value",
            payload.len() - consumed
        )));
    }
    Ok(value)
}

/// True if the line holds nothing but ASCII whitespace.
pub fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_line_to_msgpack_and_back() {
        let value = parse_json(b"{\"b\":[1,2,3],\"s\":\"x\",\"f\":1.5,\"n\":null,\"neg\":-7}\n")
            .unwrap();

        let mut payload = Vec::new();
        encode_msgpack(&value, &mut payload).unwrap();

        assert_eq!(decode_msgpack(&payload).unwrap(), value);
    }

    #[test]
    fn small_map_encodes_as_fixmap() {
        let mut payload = Vec::new();
        encode_msgpack(&json!({"a": 1}), &mut payload).unwrap();
        assert_eq!(payload, vec![0x81, 0xa1, b'a', 0x01]);
    }

    #[test]
    fn encode_appends_to_existing_bytes() {
        let mut payload = vec![0xff];
        encode_msgpack(&json!(true), &mut payload).unwrap();
        assert_eq!(payload, vec![0xff, 0xc3]);
    }

    #[test]
    fn crlf_terminated_line_parses() {
        assert_eq!(parse_json(b"[1]\r\n").unwrap(), json!([1]));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(parse_json(b"{\"a\":").is_err());
        assert!(parse_json(b"{\"a\":1} {\"b\":2}\n").is_err());
        assert!(parse_json(b"\n").is_err());
    }

    #[test]
    fn malformed_msgpack_rejected() {
        assert!(decode_msgpack(&[0x92, 0x01]).is_err());
        assert!(decode_msgpack(&[]).is_err());
    }

    #[test]
    fn leftover_payload_bytes_rejected() {
        let err = decode_msgpack(&[0x01, 0xff, 0xff]).unwrap_err();
        assert!(err.to_string().contains("2 trailing bytes"));
        assert_eq!(decode_msgpack(&[0x01]).unwrap(), json!(1));
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(b""));
        assert!(is_blank(b" \t\r\n"));
        assert!(!is_blank(b" 1\n"));
    }
}
