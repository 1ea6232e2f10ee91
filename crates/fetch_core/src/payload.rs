//! Payload extraction, repair and validation.
//!
//! The query text is free-form (typically a request snippet), so the payload
//! literal is located by scanning for the `json=` marker and matching
//! delimiters outside of string literals.
use serde_json::Value;

/// Key that introduces the embedded payload literal.
pub const PAYLOAD_MARKER: &str = "json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("payload not found")]
    NotFound,
    #[error("malformed payload syntax: {diagnostic}")]
    Malformed { diagnostic: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing query")]
    MissingQuery,
    #[error("missing output")]
    MissingOutput,
    #[error("max_answers must be a number")]
    MaxAnswersNotNumber,
}

/// Failure while turning query text into a payload that may go on the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A payload that passed [`validate_payload`]. Only constructed by validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload(Value);

impl ValidatedPayload {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Locate the payload literal, repair trailing separators and parse it.
pub fn extract_payload(raw: &str) -> Result<Value, ExtractionError> {
    let literal = find_payload_literal(raw).ok_or(ExtractionError::NotFound)?;
    let repaired = strip_trailing_separators(literal);
    serde_json::from_str(&repaired).map_err(|err| ExtractionError::Malformed {
        diagnostic: err.to_string(),
    })
}

/// Check the fields the extraction service requires. The value is returned
/// untouched on success.
pub fn validate_payload(candidate: Value) -> Result<ValidatedPayload, ValidationError> {
    if !candidate.get("query").is_some_and(is_truthy) {
        return Err(ValidationError::MissingQuery);
    }
    if !candidate.get("output").is_some_and(is_truthy) {
        return Err(ValidationError::MissingOutput);
    }
    if !candidate.get("max_answers").is_some_and(Value::is_number) {
        return Err(ValidationError::MaxAnswersNotNumber);
    }
    Ok(ValidatedPayload(candidate))
}

/// Extract then validate.
pub fn prepare_payload(raw: &str) -> Result<ValidatedPayload, PayloadError> {
    let candidate = extract_payload(raw)?;
    Ok(validate_payload(candidate)?)
}

/// Returns the `{ ... }` literal following the first `json=` marker whose
/// braces balance, or `None`.
pub fn find_payload_literal(raw: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = raw[search_from..].find(PAYLOAD_MARKER) {
        let marker_at = search_from + offset;
        search_from = marker_at + PAYLOAD_MARKER.len();

        if !is_word_start(raw, marker_at) {
            continue;
        }
        let Some(open_at) = literal_start_after_marker(raw, search_from) else {
            continue;
        };
        if let Some(close_at) = matching_close(raw, open_at) {
            return Some(&raw[open_at..=close_at]);
        }
    }
    None
}

fn is_word_start(raw: &str, at: usize) -> bool {
    raw[..at]
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
}

/// Accepts `json=`, `json = ` etc. and returns the byte index of the `{`.
fn literal_start_after_marker(raw: &str, after_marker: usize) -> Option<usize> {
    let rest = &raw[after_marker..];
    let trimmed = rest.trim_start();
    let after_eq = trimmed.strip_prefix('=')?;
    let literal = after_eq.trim_start();
    if !literal.starts_with('{') {
        return None;
    }
    Some(raw.len() - literal.len())
}

/// Byte index of the delimiter closing the one at `open_at`. Brackets inside
/// string literals are ignored.
fn matching_close(raw: &str, open_at: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in raw[open_at..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open_at + idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Drops every `,` that is followed (after whitespace) by `}` or `]`.
/// String contents are copied verbatim.
pub fn strip_trailing_separators(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in literal.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            out.push(c);
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' if closes_next(&literal[idx + 1..]) => {}
            _ => out.push(c),
        }
    }
    out
}

fn closes_next(rest: &str) -> bool {
    matches!(rest.trim_start().chars().next(), Some('}' | ']'))
}

/// Loose truthiness: `null`, `false`, `0` and `""` are falsy; everything else,
/// including empty objects and arrays, is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
