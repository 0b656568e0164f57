use serde_json::Value;

use super::list_literal::{looks_bracketed, parse_string_list};

/// Shape of a raw list-ish document field before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawList<'a> {
    /// Field absent or null.
    Missing,
    /// Field stored as text: a list literal, a single value, or empty.
    Text(&'a str),
    /// Field stored as a native array.
    List(&'a [Value]),
    /// Number, bool or object; nothing usable.
    Other,
}

impl<'a> RawList<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawList::Missing,
            Some(Value::String(s)) => RawList::Text(s),
            Some(Value::Array(items)) => RawList::List(items),
            Some(_) => RawList::Other,
        }
    }

    /// Canonical list form. Never fails: unusable input yields an empty list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            RawList::Text(s) if looks_bracketed(s) => {
                parse_string_list(s).unwrap_or_else(|| vec![s.to_string()])
            }
            RawList::Text(s) if !s.is_empty() => vec![s.to_string()],
            RawList::List(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            RawList::Text(_) | RawList::Missing | RawList::Other => Vec::new(),
        }
    }
}

/// Normalize a genre/country/cast field of unknown shape into a list of strings.
pub fn normalize_list(value: Option<&Value>) -> Vec<String> {
    RawList::classify(value).into_list()
}

/// Numeric coercion with missing-on-failure semantics (never zero).
pub fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Year coercion: numeric and integral, otherwise missing.
pub fn coerce_year(value: Option<&Value>) -> Option<i32> {
    let raw = coerce_f64(value)?;
    if raw.fract() != 0.0 || raw < i32::MIN as f64 || raw > i32::MAX as f64 {
        return None;
    }
    Some(raw as i32)
}

/// Opaque display text: strings verbatim, numbers and bools via their JSON text.
pub fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
