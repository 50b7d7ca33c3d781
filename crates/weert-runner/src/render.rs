//! Prettification of captured command output.
//!
//! Output lines whose first character is `{` or `[` are treated as JSON and
//! re-serialized with sorted keys and 4-space indentation, so the curl
//! examples in the documentation read well. Everything else passes through
//! unchanged.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::warn;

/// Prettify captured command output, line by line. Line terminators are
/// preserved exactly, so output without a final newline stays that way.
pub fn prettify(output: &str) -> String {
    let mut result = String::new();
    for piece in output.split_inclusive('\n') {
        let (line, terminator) = match piece.strip_suffix('\n') {
            Some(stripped) => (stripped, "\n"),
            None => (piece, ""),
        };
        if line.starts_with('{') || line.starts_with('[') {
            match prettify_json(line) {
                Ok(pretty) => result.push_str(&pretty),
                Err(err) => {
                    warn!(%err, "output line looked like JSON but failed to parse");
                    result.push_str(line);
                }
            }
        } else {
            result.push_str(line);
        }
        result.push_str(terminator);
    }
    result
}

/// Re-serialize one JSON line with sorted keys and 4-space indentation.
///
/// `serde_json::Value` keeps object keys in a sorted map, so parsing and
/// re-serializing sorts them.
fn prettify_json(line: &str) -> serde_json::Result<String> {
    let value: Value = serde_json::from_str(line)?;
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
