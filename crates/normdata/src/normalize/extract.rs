//! Total extraction of display values from arbitrarily shaped JSON fields.
//!
//! Upstream sources disagree on how they store field values: plain scalars,
//! arrays of scalars, wrapped `{"value": ...}` objects, arrays of wrapped
//! objects, and combinations nested several levels deep. Extraction collapses
//! any of these into a plain string without ever failing, so no field can
//! surface as an opaque blob to the caller.

use serde_json::Value;

/// Upper bound on unwrap recursion. Legitimate data nests two or three
/// levels; anything deeper serializes verbatim rather than recursing forever.
const MAX_UNWRAP_DEPTH: usize = 32;

/// Sentinel some sources emit for "no value".
pub const MISSING_VALUE_MARKER: &str = "-";

/// The closed set of value shapes the upstream sources produce.
enum Shape<'a> {
    /// Null, `false`, zero, the empty string, or the missing-value marker.
    Missing,
    /// A string, number, or `true`.
    Scalar(&'a Value),
    /// An array of further values.
    Sequence(&'a [Value]),
    /// An object whose payload lives under its `value` key.
    Wrapped(&'a Value),
    /// Any other object; has no unwrap path.
    Opaque(&'a Value),
}

fn classify(value: &Value) -> Shape<'_> {
    match value {
        Value::Null | Value::Bool(false) => Shape::Missing,
        Value::String(s) if s.is_empty() || s == MISSING_VALUE_MARKER => Shape::Missing,
        Value::Number(n) if n.as_f64() == Some(0.0) => Shape::Missing,
        Value::String(_) | Value::Number(_) | Value::Bool(true) => Shape::Scalar(value),
        Value::Array(items) => Shape::Sequence(items),
        Value::Object(map) => map
            .get("value")
            .map_or(Shape::Opaque(value), Shape::Wrapped),
    }
}

/// Extract a single display value: sequences contribute their first element
/// only. Use for scalar-style fields such as name, type, and description.
pub fn extract_single(value: &Value) -> String {
    extract(value, Mode::Single, MAX_UNWRAP_DEPTH)
}

/// Extract a list display value: all sequence elements are extracted and
/// joined with `", "`. Use for table display of array-valued attributes.
pub fn extract_list(value: &Value) -> String {
    extract(value, Mode::List, MAX_UNWRAP_DEPTH)
}

#[derive(Clone, Copy)]
enum Mode {
    Single,
    List,
}

fn extract(value: &Value, mode: Mode, depth: usize) -> String {
    if depth == 0 {
        return serialize_verbatim(value);
    }
    match classify(value) {
        Shape::Missing => String::new(),
        Shape::Scalar(scalar) => scalar_text(scalar),
        Shape::Sequence(items) => match mode {
            Mode::Single => items
                .first()
                .map(|item| extract(item, mode, depth - 1))
                .unwrap_or_default(),
            Mode::List => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| extract(item, mode, depth - 1))
                    .filter(|part| !part.is_empty())
                    .collect();
                parts.join(", ")
            }
        },
        Shape::Wrapped(inner) => extract(inner, mode, depth - 1),
        Shape::Opaque(object) => serialize_verbatim(object),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        other => other.to_string(),
    }
}

/// Last resort for shapes with no unwrap path; keeps extraction total.
fn serialize_verbatim(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
