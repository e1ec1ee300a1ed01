//! JSON document codec
//!
//! This module implements JSON encoding and decoding for payload documents.
//! Plain JSON only: object entry order is preserved in both directions, and
//! non-finite floats are refused at encode time.

mod decode;
mod encode;

pub use decode::{decode_document, DecodeError};
pub use encode::{encode_document, encode_string, EncodeError};
