//! JSON decoding for payload documents
//!
//! Implements decoding of JSON text to Value. Object entries are kept in
//! document order; duplicate keys keep the first position with the last
//! value winning, matching the in-memory insert semantics.

use docket_core::{Object, Value};
use thiserror::Error;

/// Decode error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Invalid JSON syntax
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Invalid number format
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    /// Unexpected character
    #[error("Unexpected character: {0}")]
    UnexpectedChar(char),

    /// Input continues past the end of the document
    #[error("Trailing characters after document")]
    TrailingCharacters,
}

/// Decode JSON text to a Value
///
/// The whole input must be one document; trailing non-whitespace is an
/// error.
pub fn decode_document(json: &str) -> Result<Value, DecodeError> {
    let trimmed = json.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::UnexpectedEnd);
    }

    let mut parser = JsonParser::new(trimmed);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.peek().is_some() {
        return Err(DecodeError::TrailingCharacters);
    }
    Ok(value)
}

/// Simple JSON parser
struct JsonParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> JsonParser<'a> {
    fn new(input: &'a str) -> Self {
        JsonParser { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        self.skip_whitespace();

        match self.peek() {
            None => Err(DecodeError::UnexpectedEnd),
            Some('n') => self.parse_null(),
            Some('t') => self.parse_true(),
            Some('f') => self.parse_false(),
            Some('"') => self.parse_string().map(Value::String),
            Some('[') => self.parse_array(),
            Some('{') => self.parse_object(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) => Err(DecodeError::UnexpectedChar(c)),
        }
    }

    fn parse_null(&mut self) -> Result<Value, DecodeError> {
        if self.input[self.pos..].starts_with("null") {
            self.pos += 4;
            Ok(Value::Null)
        } else {
            Err(DecodeError::InvalidJson("Expected 'null'".to_string()))
        }
    }

    fn parse_true(&mut self) -> Result<Value, DecodeError> {
        if self.input[self.pos..].starts_with("true") {
            self.pos += 4;
            Ok(Value::Bool(true))
        } else {
            Err(DecodeError::InvalidJson("Expected 'true'".to_string()))
        }
    }

    fn parse_false(&mut self) -> Result<Value, DecodeError> {
        if self.input[self.pos..].starts_with("false") {
            self.pos += 5;
            Ok(Value::Bool(false))
        } else {
            Err(DecodeError::InvalidJson("Expected 'false'".to_string()))
        }
    }

    fn parse_string(&mut self) -> Result<String, DecodeError> {
        self.advance(); // consume opening quote
        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(DecodeError::UnexpectedEnd),
                Some('"') => {
                    self.advance();
                    return Ok(result);
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('"') => {
                            result.push('"');
                            self.advance();
                        }
                        Some('\\') => {
                            result.push('\\');
                            self.advance();
                        }
                        Some('/') => {
                            result.push('/');
                            self.advance();
                        }
                        Some('n') => {
                            result.push('\n');
                            self.advance();
                        }
                        Some('r') => {
                            result.push('\r');
                            self.advance();
                        }
                        Some('t') => {
                            result.push('\t');
                            self.advance();
                        }
                        Some('b') => {
                            result.push('\x08');
                            self.advance();
                        }
                        Some('f') => {
                            result.push('\x0c');
                            self.advance();
                        }
                        Some('u') => {
                            self.advance();
                            let code = self.parse_hex4()?;
                            // High surrogate must pair with a following \uXXXX
                            // low surrogate to form one scalar
                            if (0xD800..=0xDBFF).contains(&code) {
                                if self.peek() != Some('\\') {
                                    return Err(DecodeError::InvalidJson(
                                        "Unpaired surrogate".to_string(),
                                    ));
                                }
                                self.advance();
                                if self.peek() != Some('u') {
                                    return Err(DecodeError::InvalidJson(
                                        "Unpaired surrogate".to_string(),
                                    ));
                                }
                                self.advance();
                                let low = self.parse_hex4()?;
                                if !(0xDC00..=0xDFFF).contains(&low) {
                                    return Err(DecodeError::InvalidJson(
                                        "Unpaired surrogate".to_string(),
                                    ));
                                }
                                let combined =
                                    0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                                match char::from_u32(combined) {
                                    Some(c) => result.push(c),
                                    None => {
                                        return Err(DecodeError::InvalidJson(
                                            "Invalid unicode codepoint".to_string(),
                                        ))
                                    }
                                }
                            } else {
                                match char::from_u32(code) {
                                    Some(c) => result.push(c),
                                    None => {
                                        return Err(DecodeError::InvalidJson(
                                            "Invalid unicode codepoint".to_string(),
                                        ))
                                    }
                                }
                            }
                        }
                        Some(c) => {
                            return Err(DecodeError::InvalidJson(format!(
                                "Invalid escape: \\{}",
                                c
                            )))
                        }
                        None => return Err(DecodeError::UnexpectedEnd),
                    }
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }
    }

    fn parse_hex4(&mut self) -> Result<u32, DecodeError> {
        let hex: String = (0..4)
            .filter_map(|_| {
                let c = self.peek()?;
                self.advance();
                Some(c)
            })
            .collect();
        if hex.len() != 4 {
            return Err(DecodeError::InvalidJson(
                "Invalid unicode escape".to_string(),
            ));
        }
        u32::from_str_radix(&hex, 16)
            .map_err(|_| DecodeError::InvalidJson("Invalid unicode escape".to_string()))
    }

    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;

        // Handle negative sign
        if self.peek() == Some('-') {
            self.advance();
        }

        // Parse integer part
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let mut is_float = false;

        // Parse decimal part
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // Parse exponent
        if let Some('e' | 'E') = self.peek() {
            is_float = true;
            self.advance();
            if let Some('+' | '-') = self.peek() {
                self.advance();
            }
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let num_str = &self.input[start..self.pos];

        if is_float {
            num_str
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| DecodeError::InvalidNumber(num_str.to_string()))
        } else {
            // Try parsing as i64 first
            if let Ok(i) = num_str.parse::<i64>() {
                Ok(Value::Int(i))
            } else {
                // Fall back to f64 for large numbers
                num_str
                    .parse::<f64>()
                    .map(Value::Float)
                    .map_err(|_| DecodeError::InvalidNumber(num_str.to_string()))
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, DecodeError> {
        self.advance(); // consume '['
        self.skip_whitespace();

        let mut arr = Vec::new();

        if self.peek() == Some(']') {
            self.advance();
            return Ok(Value::Array(arr));
        }

        loop {
            arr.push(self.parse_value()?);
            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.advance();
                    self.skip_whitespace();
                }
                Some(']') => {
                    self.advance();
                    return Ok(Value::Array(arr));
                }
                Some(c) => return Err(DecodeError::UnexpectedChar(c)),
                None => return Err(DecodeError::UnexpectedEnd),
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value, DecodeError> {
        self.advance(); // consume '{'
        self.skip_whitespace();

        let mut object = Object::new();

        if self.peek() == Some('}') {
            self.advance();
            return Ok(Value::Object(object));
        }

        loop {
            self.skip_whitespace();

            // Parse key
            if self.peek() != Some('"') {
                return Err(DecodeError::InvalidJson("Expected string key".to_string()));
            }
            let key = self.parse_string()?;

            self.skip_whitespace();

            // Expect colon
            if self.peek() != Some(':') {
                return Err(DecodeError::InvalidJson("Expected ':'".to_string()));
            }
            self.advance();

            // Parse value
            let value = self.parse_value()?;
            object.insert(key, value);

            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some('}') => {
                    self.advance();
                    return Ok(Value::Object(object));
                }
                Some(c) => return Err(DecodeError::UnexpectedChar(c)),
                None => return Err(DecodeError::UnexpectedEnd),
            }
        }
    }
}
