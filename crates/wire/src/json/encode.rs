//! JSON encoding for payload documents
//!
//! Encodes a Value to canonical JSON text. Objects encode in stored entry
//! order so an untouched payload re-encodes byte-identically; non-finite
//! floats are an error rather than a wrapper.

use docket_core::{Object, Value};
use thiserror::Error;

/// Encode error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// NaN or infinity has no JSON representation
    #[error("non-finite float has no JSON representation")]
    NonFiniteFloat,
}

/// Encode a Value to canonical JSON text
pub fn encode_document(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => encode_float(*f),
        Value::String(s) => Ok(encode_string(s)),
        Value::Array(arr) => encode_array(arr),
        Value::Object(obj) => encode_object(obj),
    }
}

/// Encode a finite float, refusing NaN and the infinities
fn encode_float(f: f64) -> Result<String, EncodeError> {
    if !f.is_finite() {
        return Err(EncodeError::NonFiniteFloat);
    }
    Ok(format_float(f))
}

/// Format a finite float, ensuring it has a decimal point
fn format_float(f: f64) -> String {
    let s = f.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Encode a string with proper JSON escaping
pub fn encode_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Encode an array
fn encode_array(arr: &[Value]) -> Result<String, EncodeError> {
    let elements: Vec<String> = arr
        .iter()
        .map(encode_document)
        .collect::<Result<_, _>>()?;
    Ok(format!("[{}]", elements.join(",")))
}

/// Encode an object in stored entry order
fn encode_object(obj: &Object) -> Result<String, EncodeError> {
    let pairs: Vec<String> = obj
        .iter()
        .map(|(k, v)| Ok(format!("{}:{}", encode_string(k), encode_document(v)?)))
        .collect::<Result<_, EncodeError>>()?;
    Ok(format!("{{{}}}", pairs.join(",")))
}
