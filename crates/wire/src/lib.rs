//! Wire encoding for Docket
//!
//! This crate implements the canonical JSON text form of payload documents.
//! Payloads are plain JSON; there are no typed wrappers. The two properties
//! the migration engine depends on:
//!
//! - **Order fidelity**: objects encode in stored entry order and decode
//!   preserving document order. An untouched payload re-encodes
//!   byte-identically.
//! - **Finite floats only**: NaN and the infinities are refused at encode
//!   time; they have no JSON representation and must never reach a log.
//!
//! ## Encoding Rules
//!
//! | Value Type | JSON Encoding |
//! |------------|--------------|
//! | Null | `null` |
//! | Bool | `true`/`false` |
//! | Int | number |
//! | Float (finite) | number, whole values with `.0` |
//! | Float (non-finite) | `EncodeError::NonFiniteFloat` |
//! | String | `"..."` |
//! | Array | `[...]` |
//! | Object | `{...}` in stored order |
//!
//! ## Examples
//!
//! ```
//! use docket_wire::{decode_document, encode_document};
//!
//! let text = r#"{"zebra":1,"apple":2}"#;
//! let value = decode_document(text).unwrap();
//! // Stored order survives the round trip
//! assert_eq!(encode_document(&value).unwrap(), text);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

// Re-export main types
pub use json::{decode_document, encode_document, encode_string, DecodeError, EncodeError};
