//! Opaque (Relay global) id handling
//!
//! Ids arrive base64-encoded as `TypeName:primary_key`. The backend filters
//! on the primary key only.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Decode an opaque id to its primary key
///
/// Returns `None` if the input is not base64 of `Type:key`.
pub fn decode_id(opaque: &str) -> Option<String> {
    let bytes = BASE64.decode(opaque.trim()).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    let (_, key) = text.split_once(':')?;
    if key.is_empty() {
        return None;
    }
    Some(key.to_string())
}

/// Build an opaque id from a type name and primary key
pub fn encode_id(type_name: &str, key: &str) -> String {
    BASE64.encode(format!("{}:{}", type_name, key))
}
