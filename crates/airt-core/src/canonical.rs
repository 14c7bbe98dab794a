//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that are hashed anywhere in the workspace: structured artifacts, the
//! config snapshot, the `inputs_hash` preimage, and the manifest itself.
//!
//! ## Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only ways to
//! construct it are `CanonicalBytes::new()` and `CanonicalBytes::from_value()`,
//! both of which apply the float-rejection pipeline before JCS serialization.
//! Two semantically equal values always produce byte-identical output,
//! regardless of the order in which their maps were built.
//!
//! ## Rules
//!
//! 1. **Reject floats.** Scores, counts, and sizes are integers. Floats have
//!    non-deterministic rendering edge cases, and NaN/infinity have no JSON
//!    form at all. `serde_json` silently maps non-finite floats to `null`, so
//!    the value is checked *before* it reaches `serde_json` and any float,
//!    finite or not, is rejected.
//! 2. **Sorted keys.** Object keys are emitted in lexicographic order.
//! 3. **Compact separators.** `,` and `:` with no whitespace.
//! 4. **UTF-8.** Non-ASCII characters pass through unescaped.
//! 5. **Lists keep their order.** Order is significant for arrays.
//!
//! Serialization uses `serde_jcs` for RFC 8785 output. For float-free values
//! this is byte-identical to
//! `json.dumps(obj, sort_keys=True, separators=(",", ":"), ensure_ascii=False)`.

use serde::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use serde_json::Value;

use crate::error::SerializationError;

/// Bytes produced exclusively by canonical serialization.
///
/// # Invariants
///
/// - The only constructors are `CanonicalBytes::new()` and `CanonicalBytes::from_value()`.
/// - No float values appear anywhere in the tree.
/// - Object keys are sorted; separators are compact; encoding is UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError::FloatRejected` or `NonFiniteFloat` if the
    /// value contains a float, and `SerializationError::Json` if the value
    /// cannot be represented as JSON (e.g. a map with non-string keys).
    pub fn new(obj: &impl Serialize) -> Result<Self, SerializationError> {
        obj.serialize(FloatGuard)?;
        let value = serde_json::to_value(obj)?;
        Self::from_value(value)
    }

    /// Construct canonical bytes from an already-built JSON tree.
    ///
    /// Used when re-canonicalizing content read back from an archive.
    pub fn from_value(value: Value) -> Result<Self, SerializationError> {
        let coerced = coerce_json_value(value)?;
        let bytes = serialize_canonical(&coerced)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the wrapper, yielding the canonical bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject float numbers in a JSON tree.
///
/// Values built through `serde_json` can only hold finite floats; those are
/// rejected here so `from_value()` upholds the same invariant as `new()`.
fn coerce_json_value(value: Value) -> Result<Value, SerializationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(SerializationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
    }
}

/// Serialize a JSON value in JCS-canonical form (RFC 8785).
fn serialize_canonical(value: &Value) -> Result<Vec<u8>, SerializationError> {
    let s = serde_jcs::to_string(value)?;
    Ok(s.into_bytes())
}

// ---------------------------------------------------------------------------
// Float guard
// ---------------------------------------------------------------------------

/// A serializer that walks a value and fails on the first float it meets.
///
/// Produces no output. Runs before `serde_json::to_value()` because that
/// conversion turns NaN and infinities into `null` without reporting them.
#[derive(Clone, Copy)]
struct FloatGuard;

type GuardResult = Result<(), SerializationError>;

fn reject_float(v: f64) -> GuardResult {
    if v.is_finite() {
        Err(SerializationError::FloatRejected(v))
    } else {
        Err(SerializationError::NonFiniteFloat(v))
    }
}

impl Serializer for FloatGuard {
    type Ok = ();
    type Error = SerializationError;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> GuardResult {
        Ok(())
    }
    fn serialize_i8(self, _v: i8) -> GuardResult {
        Ok(())
    }
    fn serialize_i16(self, _v: i16) -> GuardResult {
        Ok(())
    }
    fn serialize_i32(self, _v: i32) -> GuardResult {
        Ok(())
    }
    fn serialize_i64(self, _v: i64) -> GuardResult {
        Ok(())
    }
    fn serialize_i128(self, _v: i128) -> GuardResult {
        Ok(())
    }
    fn serialize_u8(self, _v: u8) -> GuardResult {
        Ok(())
    }
    fn serialize_u16(self, _v: u16) -> GuardResult {
        Ok(())
    }
    fn serialize_u32(self, _v: u32) -> GuardResult {
        Ok(())
    }
    fn serialize_u64(self, _v: u64) -> GuardResult {
        Ok(())
    }
    fn serialize_u128(self, _v: u128) -> GuardResult {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> GuardResult {
        reject_float(f64::from(v))
    }
    fn serialize_f64(self, v: f64) -> GuardResult {
        reject_float(v)
    }
    fn serialize_char(self, _v: char) -> GuardResult {
        Ok(())
    }
    fn serialize_str(self, _v: &str) -> GuardResult {
        Ok(())
    }
    fn serialize_bytes(self, _v: &[u8]) -> GuardResult {
        Ok(())
    }
    fn serialize_none(self) -> GuardResult {
        Ok(())
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> GuardResult {
        value.serialize(self)
    }
    fn serialize_unit(self) -> GuardResult {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> GuardResult {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> GuardResult {
        Ok(())
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> GuardResult {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> GuardResult {
        value.serialize(self)
    }
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, SerializationError> {
        Ok(self)
    }
    fn serialize_tuple(self, _len: usize) -> Result<Self, SerializationError> {
        Ok(self)
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, SerializationError> {
        Ok(self)
    }
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, SerializationError> {
        Ok(self)
    }
    fn serialize_map(self, _len: Option<usize>) -> Result<Self, SerializationError> {
        Ok(self)
    }
    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, SerializationError> {
        Ok(self)
    }
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, SerializationError> {
        Ok(self)
    }
}

impl SerializeSeq for FloatGuard {
    type Ok = ();
    type Error = SerializationError;
    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> GuardResult {
        value.serialize(FloatGuard)
    }
    fn end(self) -> GuardResult {
        Ok(())
    }
}

impl SerializeTuple for FloatGuard {
    type Ok = ();
    type Error = SerializationError;
    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> GuardResult {
        value.serialize(FloatGuard)
    }
    fn end(self) -> GuardResult {
        Ok(())
    }
}

impl SerializeTupleStruct for FloatGuard {
    type Ok = ();
    type Error = SerializationError;
    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> GuardResult {
        value.serialize(FloatGuard)
    }
    fn end(self) -> GuardResult {
        Ok(())
    }
}

impl SerializeTupleVariant for FloatGuard {
    type Ok = ();
    type Error = SerializationError;
    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> GuardResult {
        value.serialize(FloatGuard)
    }
    fn end(self) -> GuardResult {
        Ok(())
    }
}

impl SerializeMap for FloatGuard {
    type Ok = ();
    type Error = SerializationError;
    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> GuardResult {
        key.serialize(FloatGuard)
    }
    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> GuardResult {
        value.serialize(FloatGuard)
    }
    fn end(self) -> GuardResult {
        Ok(())
    }
}

impl SerializeStruct for FloatGuard {
    type Ok = ();
    type Error = SerializationError;
    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> GuardResult {
        value.serialize(FloatGuard)
    }
    fn end(self) -> GuardResult {
        Ok(())
    }
}

impl SerializeStructVariant for FloatGuard {
    type Ok = ();
    type Error = SerializationError;
    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> GuardResult {
        value.serialize(FloatGuard)
    }
    fn end(self) -> GuardResult {
        Ok(())
    }
}
