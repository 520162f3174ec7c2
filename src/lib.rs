//! # serde_jsonbuf
//!
//! A JSON codec extension that carries binary payloads through ordinary JSON
//! text.
//!
//! ## What is jsonbuf?
//!
//! Plain JSON has no byte-string type. jsonbuf reserves the character `:` at
//! the start of string values and uses it for two things:
//!
//! - A binary payload is written as the string `":base64:<data>"`, using the
//!   standard base64 alphabet with padding.
//! - A string that genuinely starts with `:` is written with the marker
//!   doubled, so `":foo"` travels as `"::foo"`.
//!
//! Everything else is standard JSON, and any JSON parser can read the output.
//! Only a jsonbuf decoder turns the tagged strings back into bytes.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_jsonbuf = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Dynamic values
//!
//! ```rust
//! use serde_jsonbuf::{decode, encode, jsonbuf, Value};
//!
//! let value = jsonbuf!({
//!     "name": ":admin",
//!     "key": (Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]))
//! });
//!
//! let text = encode(&value).unwrap().unwrap();
//! assert_eq!(text, r#"{"name":"::admin","key":":base64:3q2+7w=="}"#);
//!
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! ### Typed data
//!
//! Fields marked with `serde_bytes` are serialized as bytes and come back as
//! bytes:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_jsonbuf::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Upload {
//!     name: String,
//!     #[serde(with = "serde_bytes")]
//!     data: Vec<u8>,
//! }
//!
//! let upload = Upload { name: "a.bin".to_string(), data: vec![1, 2, 3] };
//! let text = to_string(&upload).unwrap();
//! assert_eq!(text, r#"{"name":"a.bin","data":":base64:AQID"}"#);
//!
//! let back: Upload = from_str(&text).unwrap();
//! assert_eq!(back, upload);
//! ```
//!
//! ## Absent values
//!
//! [`Value::Undefined`] and [`Value::Opaque`] have no text form. They are
//! omitted from objects, written as `null` inside arrays, and at the top
//! level [`encode`] returns `Ok(None)`.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Malformed input and failing [`ToEncodable`] hooks surface as [`Error`]
//!   values, never panics
//!
//! See the [`format`] module for the complete wire format.

pub mod de;
pub mod error;
pub mod escape;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::Map;
pub use options::CodecOptions;
pub use ser::{Encoder, ValueSerializer};
pub use value::{Number, ToEncodable, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Encode a [`Value`] to jsonbuf text.
///
/// Returns `Ok(None)` when the value has no text form: [`Value::Undefined`],
/// [`Value::Opaque`], or a hook that resolves to one of them.
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::{encode, Value};
///
/// assert_eq!(encode(&Value::from(":x")).unwrap().as_deref(), Some(r#""::x""#));
/// assert_eq!(encode(&Value::Null).unwrap().as_deref(), Some("null"));
/// assert_eq!(encode(&Value::Undefined).unwrap(), None);
/// ```
///
/// # Errors
///
/// Returns the error of a failing [`ToEncodable`] hook unchanged.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &Value) -> Result<Option<String>> {
    encode_with_options(value, &CodecOptions::default())
}

/// Encode a [`Value`] to jsonbuf text with custom options.
///
/// # Errors
///
/// Returns the error of a failing [`ToEncodable`] hook, or
/// [`Error::DepthLimit`] when nesting exceeds [`CodecOptions::max_depth`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(value: &Value, options: &CodecOptions) -> Result<Option<String>> {
    let mut encoder = Encoder::new(options.clone());
    if encoder.encode(value)? {
        Ok(Some(encoder.into_inner()))
    } else {
        Ok(None)
    }
}

/// Decode jsonbuf text into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::{decode, Value};
///
/// assert_eq!(decode(r#"":base64:aGk=""#).unwrap(), Value::Bytes(b"hi".to_vec()));
/// assert_eq!(decode(r#""::hi""#).unwrap(), Value::from(":hi"));
/// assert!(decode("{not valid").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text is not valid JSON, has trailing
/// characters, or contains a binary payload that is not valid base64.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(text: &str) -> Result<Value> {
    de::decode_str(text, &CodecOptions::default())
}

/// Decode jsonbuf text into a [`Value`] with custom options.
///
/// # Errors
///
/// As [`decode`]; exceeding [`CodecOptions::max_depth`] is also reported as
/// [`Error::Parse`] with the position where the limit was hit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(text: &str, options: &CodecOptions) -> Result<Value> {
    de::decode_str(text, options)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value's `Serialize` implementation fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Convert a [`Value`] into any `T: DeserializeOwned`.
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::{from_value, jsonbuf};
///
/// let numbers: Vec<i32> = from_value(jsonbuf!([1, 2, 3])).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the value does not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to a jsonbuf string.
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::to_string;
///
/// let text = to_string(&vec![":a", "b"]).unwrap();
/// assert_eq!(text, r#"["::a","b"]"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &CodecOptions::default())
}

/// Serialize any `T: Serialize` to a jsonbuf string with custom options.
///
/// # Errors
///
/// As [`to_string`], plus [`Error::DepthLimit`] when nesting exceeds
/// [`CodecOptions::max_depth`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &CodecOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    encode_with_options(&value, options)?
        .ok_or_else(|| Error::unsupported_type("value has no jsonbuf text form"))
}

/// Serialize any `T: Serialize` to jsonbuf bytes.
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Serialize any `T: Serialize` to a writer as jsonbuf text.
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &serde_bytes::Bytes::new(b"hi")).unwrap();
/// assert_eq!(buffer, br#"":base64:aGk=""#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from jsonbuf text.
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Tag { label: String }
///
/// let tag: Tag = from_str(r#"{"label":"::pinned"}"#).unwrap();
/// assert_eq!(tag, Tag { label: ":pinned".to_string() });
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid jsonbuf or cannot be
/// deserialized to type `T`. Parse errors include line and column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &CodecOptions::default())
}

/// Deserialize an instance of type `T` from jsonbuf text with custom options.
///
/// # Errors
///
/// As [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &CodecOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode_with_options(s, options)?)
}

/// Deserialize an instance of type `T` from bytes of jsonbuf text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid jsonbuf, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of jsonbuf text.
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::from_reader;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(br#"[1,2]"#);
/// let numbers: Vec<u8> = from_reader(cursor).unwrap();
/// assert_eq!(numbers, vec![1, 2]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid jsonbuf, or the
/// data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}
