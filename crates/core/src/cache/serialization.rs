//! Pure functions for encoding values to cache payloads and decoding them back.
//!
//! The type tag picks the encoding: JSON text, XML markup (see
//! [`markup`](super::markup)), or raw scalar bytes stored as-is.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::markup::{decode_xml, encode_xml};
use super::{CacheError, Result, TypeTag, Value};

/// Encodes a value into the payload stored for `tag`.
pub fn encode(tag: TypeTag, value: &Value) -> Result<Vec<u8>> {
    match tag {
        TypeTag::Json => encode_json(value),
        TypeTag::Xml => encode_xml(value),
        TypeTag::Raw => encode_raw(value),
    }
}

/// Decodes a stored payload according to `tag`.
pub fn decode(tag: TypeTag, payload: &[u8]) -> Result<Value> {
    match tag {
        TypeTag::Json => decode_json(payload),
        TypeTag::Xml => decode_xml(payload),
        TypeTag::Raw => Ok(decode_raw(payload)),
    }
}

/// Serializes a value to JSON bytes.
///
/// Bytes are written as a base64 string. Non-finite floats have no JSON
/// representation and are rejected.
pub fn encode_json(value: &Value) -> Result<Vec<u8>> {
    let encoded = match value {
        Value::Text(text) => serde_json::to_vec(text),
        Value::Integer(n) => serde_json::to_vec(n),
        Value::Float(f) if !f.is_finite() => {
            return Err(CacheError::Serialization(format!(
                "cannot encode non-finite float {f} as JSON"
            )));
        }
        Value::Float(f) => serde_json::to_vec(f),
        Value::Bytes(bytes) => serde_json::to_vec(&STANDARD.encode(bytes)),
        Value::Structured(value) => serde_json::to_vec(value),
    };
    encoded.map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes JSON bytes into a generic structured value.
pub fn decode_json(payload: &[u8]) -> Result<Value> {
    serde_json::from_slice(payload)
        .map(Value::Structured)
        .map_err(|e| CacheError::Deserialization(e.to_string()))
}

/// Converts a scalar to the bytes the store keeps for it.
///
/// Numbers are written as decimal text, the same form the store itself uses.
pub fn encode_raw(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::Text(text) => Ok(text.as_bytes().to_vec()),
        Value::Integer(n) => Ok(n.to_string().into_bytes()),
        Value::Float(f) => Ok(f.to_string().into_bytes()),
        Value::Bytes(bytes) => Ok(bytes.clone()),
        Value::Structured(_) => Err(CacheError::Serialization(
            "raw values must be text, a number or bytes, got structured".to_string(),
        )),
    }
}

/// Returns a raw payload unchanged: `Text` when it is valid UTF-8, `Bytes`
/// otherwise.
pub fn decode_raw(payload: &[u8]) -> Value {
    match String::from_utf8(payload.to_vec()) {
        Ok(text) => Value::Text(text),
        Err(e) => Value::Bytes(e.into_bytes()),
    }
}
