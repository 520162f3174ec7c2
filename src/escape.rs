//! The escaping rule shared by the encoder and the decoder.
//!
//! Plain JSON cannot tell a byte buffer apart from a string, so jsonbuf
//! reserves the marker character `:` at the start of string leaves:
//!
//! | Leaf value | Text in the JSON document |
//! |------------|---------------------------|
//! | bytes `[1, 2, 3]` | `":base64:AQID"` |
//! | string `":foo"` | `"::foo"` |
//! | string `"foo"` | `"foo"` |
//!
//! Encoding doubles a leading marker; decoding checks for the binary prefix
//! first and otherwise strips exactly one leading marker. A string that
//! literally reads `":base64:AQID"` therefore travels as `"::base64:AQID"` and
//! never collides with a binary payload.
//!
//! ```rust
//! use serde_jsonbuf::escape::{escape_str, unescape_str};
//! use serde_jsonbuf::Value;
//!
//! assert_eq!(escape_str(":foo"), "::foo");
//! assert_eq!(escape_str("foo"), "foo");
//! assert_eq!(unescape_str("::foo").unwrap(), Value::from(":foo"));
//! assert_eq!(unescape_str(":base64:AQID").unwrap(), Value::Bytes(vec![1, 2, 3]));
//! ```

use crate::{Error, Result, Value};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use std::borrow::Cow;

/// The reserved character that flags escaped string content.
pub const MARKER: char = ':';

/// Prefix of a string leaf that carries a base64 binary payload.
pub const BINARY_PREFIX: &str = ":base64:";

const MARKER_BYTE: u8 = b':';

// Second byte of BINARY_PREFIX, checked before the full prefix comparison.
const BINARY_TAG_BYTE: u8 = b'b';

/// Standard alphabet. Output is padded; input padding and trailing bits are
/// accepted either way.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Returns `true` if `s` starts with the marker character.
#[inline]
#[must_use]
pub fn is_marked(s: &str) -> bool {
    s.as_bytes().first() == Some(&MARKER_BYTE)
}

/// Escapes a string leaf by doubling a leading marker.
///
/// Strings that do not start with the marker are borrowed unchanged.
#[must_use]
pub fn escape_str(s: &str) -> Cow<'_, str> {
    if is_marked(s) {
        let mut escaped = String::with_capacity(s.len() + 1);
        escaped.push(MARKER);
        escaped.push_str(s);
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(s)
    }
}

/// Builds the string leaf that represents a binary payload.
///
/// ```rust
/// use serde_jsonbuf::escape::binary_text;
///
/// assert_eq!(binary_text(b"hi"), ":base64:aGk=");
/// assert_eq!(binary_text(b""), ":base64:");
/// ```
#[must_use]
pub fn binary_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(BINARY_PREFIX.len() + (bytes.len() + 2) / 3 * 4);
    text.push_str(BINARY_PREFIX);
    BASE64.encode_string(bytes, &mut text);
    text
}

/// Reverses the escaping rule for a decoded string leaf.
///
/// Returns [`Value::Bytes`] for a binary payload and [`Value::String`]
/// otherwise.
///
/// # Errors
///
/// Returns [`Error::Parse`] (without position) if the text after the binary
/// prefix is not valid base64.
pub fn unescape_str(s: &str) -> Result<Value> {
    unescape_leaf(s).map_err(|e| Error::parse(0, 0, &format!("invalid binary payload: {}", e)))
}

pub(crate) fn unescape_leaf(s: &str) -> std::result::Result<Value, base64::DecodeError> {
    let bytes = s.as_bytes();
    if bytes.len() >= BINARY_PREFIX.len()
        && bytes[0] == MARKER_BYTE
        && bytes[1] == BINARY_TAG_BYTE
        && s.starts_with(BINARY_PREFIX)
    {
        return BASE64
            .decode(&bytes[BINARY_PREFIX.len()..])
            .map(Value::Bytes);
    }

    if is_marked(s) {
        return Ok(Value::String(s[1..].to_string()));
    }

    Ok(Value::String(s.to_string()))
}

/// Reverses key escaping in place. Keys never carry binary payloads, so this
/// only strips a single leading marker.
pub fn unescape_key(key: &mut String) {
    if is_marked(key) {
        key.remove(0);
    }
}
