//! Field accessors shared by the document validators.

use cfv_core::{ArtifactError, ArtifactResult};
use serde_json::Value;

/// The template token an author is expected to replace, e.g. `{name}`.
pub(crate) fn placeholder(field: &str) -> String {
    format!("{{{field}}}")
}

/// A field that is present and not null.
pub(crate) fn present<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    doc.get(field).filter(|v| !v.is_null())
}

/// A field that is present, non-null, and not its own placeholder token.
pub(crate) fn filled_in<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    let token = placeholder(field);
    present(doc, field).filter(|v| v.as_str() != Some(token.as_str()))
}

/// A required, filled-in string field.
///
/// Missing, null, or placeholder values fail with `<field> not found in
/// <file>`; non-string values fail with `<field> in <file> needs replacement
/// from {<field>}`.
pub(crate) fn required_string<'a>(
    doc: &'a Value,
    field: &str,
    file: &str,
) -> ArtifactResult<&'a str> {
    let value = filled_in(doc, field)
        .ok_or_else(|| ArtifactError::invalid(format!("{field} not found in {file}")))?;
    value.as_str().ok_or_else(|| {
        ArtifactError::invalid(format!(
            "{field} in {file} needs replacement from {}",
            placeholder(field)
        ))
    })
}

/// An optional sequence field: absent or null reads as empty.
///
/// A present value that is not an array is returned as `Err(value)` so the
/// caller can report it with its own message.
pub(crate) fn optional_array<'a>(doc: &'a Value, field: &str) -> Result<&'a [Value], &'a Value> {
    match present(doc, field) {
        None => Ok(&[] as &[Value]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(other),
    }
}
