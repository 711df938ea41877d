//! Canonical JSON formatting.
//!
//! Deterministic output: object keys sorted, four-space indent, UTF-8 left
//! unescaped, trailing newline. Annotation files are committed to version
//! control after every editing session, so two saves of the same data must
//! be byte-identical.

use mathanno_model::DataError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>, DataError> {
    // Round-tripping through Value sorts object keys: serde_json's default
    // map representation is ordered by key.
    let value = serde_json::to_value(value)
        .map_err(|err| DataError::MalformedInput(err.to_string()))?;

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| DataError::MalformedInput(err.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}
