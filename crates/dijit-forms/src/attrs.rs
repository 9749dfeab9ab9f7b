//! Widget attribute bags and the primitives the attribute mixer is built on.
//!
//! A widget's render-time attributes form a JSON object (the [`AttrBag`]):
//! scalar attributes at the top level, with dot-separated attribute names
//! ("constraints.min") mapping to nested objects the client toolkit reads as
//! structured widget properties. Bags are built fresh on every render call
//! and never cached.

use dijit_forms_model::Value;
use serde_json::Value as JsonValue;

/// A widget attribute bag: attribute name to (possibly nested) value.
pub type AttrBag = serde_json::Map<String, JsonValue>;

/// How a widget interprets temporal values when they are stamped into its
/// attributes (the client toolkit's `dojo.date.stamp` conventions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalStyle {
    /// Dates only: `YYYY-MM-DD`.
    DateOnly,
    /// Times only: a leading literal `T` plus `HH:MM:SS`.
    TimeOnly,
    /// Combined: `YYYY-MM-DDTHH:MM:SS`.
    DateTime,
}

/// Merges `value` into `attrs` at the given dot-separated path.
///
/// Non-terminal path segments become nested objects, created if absent. The
/// terminal segment receives the value only if nothing already occupies that
/// exact leaf (first writer wins). An existing non-object intermediate stops
/// the merge silently.
pub fn mixin_attr(attrs: &mut AttrBag, path: &str, value: JsonValue) {
    let mut segments = path.split('.').peekable();
    let mut current = attrs;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            let occupied = current.get(segment).is_some_and(|v| !v.is_null());
            if !occupied {
                current.insert(segment.to_string(), value);
            }
            return;
        }
        if current.get(segment).is_none() {
            current.insert(segment.to_string(), JsonValue::Object(AttrBag::new()));
        }
        match current.get_mut(segment) {
            Some(JsonValue::Object(inner)) => current = inner,
            _ => return,
        }
    }
}

/// Serializes a field value into the JSON form stored in an attribute bag.
///
/// Temporal values follow the client toolkit's date-stamp convention, keyed
/// by the target widget's [`TemporalStyle`]: a combined date-time collapses
/// to its date for date-only widgets and to `THH:MM:SS` for time-only
/// widgets. Booleans stay booleans here; [`encode_bool_attrs`] tokenizes
/// them in the final pass.
pub fn stamp_value(value: &Value, style: TemporalStyle) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::from(*i),
        Value::Float(f) => JsonValue::from(*f),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::DateTime(dt) => {
            let stamped = match style {
                TemporalStyle::DateOnly => dt.format("%Y-%m-%d").to_string(),
                TemporalStyle::TimeOnly => dt.format("T%H:%M:%S").to_string(),
                TemporalStyle::DateTime => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            };
            JsonValue::String(stamped)
        }
        Value::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
        Value::Time(t) => JsonValue::String(format!("T{}", t.format("%H:%M:%S"))),
        Value::Uuid(u) => JsonValue::String(u.to_string()),
        Value::Json(j) => j.clone(),
        Value::List(items) => {
            JsonValue::Array(items.iter().map(|v| stamp_value(v, style)).collect())
        }
    }
}

/// Final normalization pass: every boolean anywhere in the bag becomes the
/// lowercase token the client toolkit expects (`"true"` / `"false"`).
pub fn encode_bool_attrs(attrs: &mut AttrBag) {
    for (_, value) in attrs.iter_mut() {
        encode_bool_value(value);
    }
}

fn encode_bool_value(value: &mut JsonValue) {
    match value {
        JsonValue::Bool(b) => {
            let token = if *b { "true" } else { "false" };
            *value = JsonValue::String(token.to_string());
        }
        JsonValue::Object(inner) => {
            for (_, v) in inner.iter_mut() {
                encode_bool_value(v);
            }
        }
        JsonValue::Array(items) => {
            for v in items.iter_mut() {
                encode_bool_value(v);
            }
        }
        _ => {}
    }
}

/// Formats an attribute bag into an HTML attribute string like
/// ` name="value" constraints='{"min":5}'`.
///
/// Nested objects and arrays are JSON-encoded inside single-quoted
/// attributes; scalars render double-quoted. Output is sorted for
/// deterministic markup.
pub fn flatatt(attrs: &AttrBag) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let mut parts: Vec<String> = attrs
        .iter()
        .map(|(k, v)| match v {
            JsonValue::String(s) => format!(r#" {k}="{s}""#),
            JsonValue::Object(_) | JsonValue::Array(_) => {
                format!(" {k}='{}'", serde_json::to_string(v).unwrap_or_default())
            }
            other => format!(r#" {k}="{other}""#),
        })
        .collect();
    parts.sort();
    parts.join("")
}
