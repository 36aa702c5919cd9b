//! Shared helpers for integration tests

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

/// A JSON array with two valid records and one record whose Avg is zero
pub const MIXED_ARRAY: &str = r#"[
    {"Test": "bench1", "Avg": "123.456", "Unit": "sec"},
    {"Test": "bench2", "Avg": "0", "Unit": "sec"},
    {"Test": "bench3", "Avg": 12, "Unit": "ns"}
]"#;

/// JSON Lines input where every record is valid
pub const CLEAN_LINES: &str = concat!(
    "{\"Test\":\"a\",\"Avg\":1.25,\"Unit\":\"ms\"}\n",
    "{\"Test\":\"b\",\"Avg\":\"0.000001\",\"Unit\":\"us\"}\n",
);

/// Write `content` to a temporary file kept alive by the returned handle
pub fn write_fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write fixture");
    file
}

/// Build one JSON object line from raw JSON fragments for each field
pub fn record_json(test: &str, avg: &str, unit: &str) -> String {
    format!(r#"{{"Test":{test},"Avg":{avg},"Unit":{unit}}}"#)
}
