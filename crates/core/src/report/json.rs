use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::model::MatchMap;

/// Serialize the match mapping as JSON indented with four spaces.
pub fn render_json(matches: &MatchMap) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    matches.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
