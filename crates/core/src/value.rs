//! Payload value types for Docket
//!
//! This module defines the canonical Value type for event payload documents.
//! Payloads travel as JSON text, so the enum carries exactly the seven
//! JSON-native variants.
//!
//! ## Ordering Contract
//!
//! Objects preserve insertion order. Migrating one subtree of a payload must
//! leave every sibling key in its original position, and an untouched payload
//! must re-encode byte-identically. `Object` is therefore backed by an
//! order-preserving entry list rather than a hash map.
//!
//! ## Equality Rules
//!
//! - Different types are NEVER equal (no type coercion)
//! - `Int(1)` != `Float(1.0)`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - Objects compare entry-by-entry in stored order; the same entries in a
//!   different order are NOT equal

use crate::path::NodePath;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical payload value type
///
/// This is the ONLY payload model. Every transformer, classifier and log
/// interface operates on this type.
///
/// ## The Seven Types
///
/// 1. `Null` - JSON null / absence of value
/// 2. `Bool` - Boolean true or false
/// 3. `Int` - 64-bit signed integer
/// 4. `Float` - 64-bit IEEE-754 floating point
/// 5. `String` - UTF-8 encoded string
/// 6. `Array` - Ordered sequence of values
/// 7. `Object` - Order-preserving string-keyed map of values
#[derive(Debug, Clone)]
pub enum Value {
    /// JSON null / absence of value
    Null,

    /// Boolean true or false
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit IEEE-754 floating point
    /// NaN and the infinities are representable in memory but rejected at
    /// the log boundary; payloads on the wire carry finite floats only.
    Float(f64),

    /// UTF-8 encoded string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Order-preserving string-keyed map of values
    Object(Object),
}

impl Value {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a container (array or object)
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object reference
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Try to get as mutable object reference
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Check that every float reachable from this value is finite
    ///
    /// Returns the path of the first non-finite float found, or `None` when
    /// the whole tree is wire-safe.
    pub fn first_non_finite_float(&self) -> Option<NodePath> {
        fn walk(value: &Value, path: &mut NodePath) -> Option<NodePath> {
            match value {
                Value::Float(f) if !f.is_finite() => Some(path.clone()),
                Value::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        path.push_index(i);
                        if let Some(hit) = walk(item, path) {
                            return Some(hit);
                        }
                        path.pop();
                    }
                    None
                }
                Value::Object(obj) => {
                    for (key, item) in obj.iter() {
                        path.push_key(key);
                        if let Some(hit) = walk(item, path) {
                            return Some(hit);
                        }
                        path.pop();
                    }
                    None
                }
                _ => None,
            }
        }
        walk(self, &mut NodePath::root())
    }
}

// ============================================================================
// Object: order-preserving string-keyed map
// ============================================================================

/// Order-preserving string-keyed map of values
///
/// Entries keep insertion order. `insert` on an existing key replaces the
/// value IN PLACE, so updating a field never moves it; new keys append at
/// the end. Lookups are linear scans, which is the right trade for payload
/// objects (tens of keys, read once per migration pass).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    /// Create an empty object
    pub fn new() -> Self {
        Object {
            entries: Vec::new(),
        }
    }

    /// Create an empty object with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Object {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the object has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Get a mutable reference to the value for a key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// True when a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert a key-value pair
    ///
    /// Replaces in place when the key exists (position preserved), appends
    /// otherwise. Returns the previous value for an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, returning its value
    ///
    /// Later entries shift up; relative order of the survivors is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate entries in stored order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in stored order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in stored order
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Custom PartialEq Implementation (IEEE-754 semantics, no type coercion)
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Same types
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                // IEEE-754 equality: NaN != NaN, but -0.0 == 0.0
                a == b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,

            // Different types: NEVER equal (NO TYPE COERCION)
            _ => false,
        }
    }
}

// Note: We intentionally implement Eq even though Float doesn't satisfy reflexivity.
// This is because our Value type follows IEEE-754 semantics where NaN != NaN.
// Users comparing Values with NaN should be aware of this behavior.
impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Discriminant first for type distinction
        std::mem::discriminant(self).hash(state);

        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => {
                // Hash the bits for consistency
                // -0.0 and 0.0 have different bits but equal values; normalize
                // to 0.0 bits so hashing stays consistent with equality
                if *f == 0.0 {
                    0u64.hash(state);
                } else {
                    f.to_bits().hash(state);
                }
            }
            Value::String(s) => s.hash(state),
            Value::Array(a) => {
                a.len().hash(state);
                for v in a {
                    v.hash(state);
                }
            }
            Value::Object(o) => {
                // Stored order is significant for equality, so hashing in
                // stored order stays consistent with it
                o.len().hash(state);
                for (k, v) in o.iter() {
                    k.hash(state);
                    v.hash(state);
                }
            }
        }
    }
}

// ============================================================================
// Serde (order-preserving)
// ============================================================================

// Hand-written so objects round-trip through serde_json (and any other
// self-describing format) without losing entry order.

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (key, value) in obj.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        // i64 first, f64 fallback for the range the log never produces
        if v <= i64::MAX as u64 {
            Ok(Value::Int(v as i64))
        } else {
            Ok(Value::Float(v as f64))
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(item) = access.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut object = Object::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// ============================================================================
// Tests
// ============================================================================
