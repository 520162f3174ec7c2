//! jsonbuf encoding.
//!
//! This module provides two serializers:
//!
//! - [`Encoder`] walks a [`Value`] depth-first and writes JSON text, applying
//!   the escaping rule to string leaves and binary payloads. Leaf quoting and
//!   number formatting are delegated to `serde_json`.
//! - [`ValueSerializer`] converts any `T: Serialize` into a [`Value`]. Byte
//!   slices passed to `serialize_bytes` (for example fields using
//!   `#[serde(with = "serde_bytes")]`) become [`Value::Bytes`].
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_jsonbuf::{encode, jsonbuf, Value};
//!
//! let value = jsonbuf!({"id": 7, "note": ":colon first"});
//! assert_eq!(
//!     encode(&value).unwrap().as_deref(),
//!     Some(r#"{"id":7,"note":"::colon first"}"#)
//! );
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use serde_jsonbuf::{CodecOptions, Encoder, Value};
//!
//! let mut encoder = Encoder::new(CodecOptions::new());
//! let wrote = encoder.encode(&Value::Bytes(vec![1, 2, 3])).unwrap();
//! assert!(wrote);
//! assert_eq!(encoder.into_inner(), r#"":base64:AQID""#);
//! ```

use crate::escape::{binary_text, escape_str};
use crate::{CodecOptions, Error, Map, Number, Result, Value};
use serde::{ser, Serialize};
use std::borrow::Cow;

/// The jsonbuf text encoder.
///
/// Created via [`Encoder::new`]; call [`Encoder::encode`] once and take the
/// text with [`Encoder::into_inner`].
pub struct Encoder {
    output: String,
    options: CodecOptions,
    depth: usize,
}

impl Encoder {
    pub fn new(options: CodecOptions) -> Self {
        Encoder {
            output: String::with_capacity(256),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `value` to the output.
    ///
    /// Returns `Ok(false)` without writing anything when the value has no
    /// text form ([`Value::Undefined`], [`Value::Opaque`], or a hook that
    /// resolves to one of them).
    ///
    /// # Errors
    ///
    /// Propagates [`ToEncodable`](crate::ToEncodable) failures unchanged and
    /// returns [`Error::DepthLimit`] when nesting exceeds
    /// [`CodecOptions::max_depth`].
    pub fn encode(&mut self, value: &Value) -> Result<bool> {
        let resolved = self.resolve(value)?;
        self.write_value(&resolved)
    }

    /// Follows `Custom` substitutions until a plain value is reached.
    fn resolve<'v>(&self, value: &'v Value) -> Result<Cow<'v, Value>> {
        let mut current = Cow::Borrowed(value);
        let mut hops = 0;
        while let Value::Custom(hook) = &*current {
            hops += 1;
            if !self.options.allows_depth(hops) {
                return Err(self.depth_error());
            }
            let replacement = hook.to_encodable().map_err(|e| {
                log::debug!("encoding hook {:?} failed: {}", hook, e);
                e
            })?;
            current = Cow::Owned(replacement);
        }
        Ok(current)
    }

    fn write_value(&mut self, value: &Value) -> Result<bool> {
        match value {
            Value::Undefined | Value::Opaque => return Ok(false),
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.write_number(n)?,
            Value::String(s) => self.write_str(&escape_str(s))?,
            Value::Bytes(b) => self.write_str(&binary_text(b))?,
            Value::Array(items) => self.write_array(items)?,
            Value::Object(map) => self.write_object(map)?,
            Value::Custom(_) => return self.encode(value),
        }
        Ok(true)
    }

    #[inline]
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.output.push_str(&serde_json::to_string(s)?);
        Ok(())
    }

    fn write_number(&mut self, n: &Number) -> Result<()> {
        match n {
            Number::Integer(i) => self.output.push_str(&i.to_string()),
            // serde_json writes non-finite floats as null.
            Number::Float(f) => self.output.push_str(&serde_json::to_string(f)?),
            Number::Infinity | Number::NegativeInfinity | Number::NaN => {
                self.output.push_str("null")
            }
        }
        Ok(())
    }

    fn write_array(&mut self, items: &[Value]) -> Result<()> {
        self.enter()?;
        self.output.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            // Array slots cannot be omitted.
            if !self.encode(item)? {
                self.output.push_str("null");
            }
        }
        self.output.push(']');
        self.depth -= 1;
        Ok(())
    }

    fn write_object(&mut self, map: &Map) -> Result<()> {
        self.enter()?;
        self.output.push('{');
        let mut first = true;
        for (key, value) in map.iter() {
            let value = self.resolve(value)?;
            if value.is_absent() {
                continue;
            }
            if !first {
                self.output.push(',');
            }
            first = false;

            if self.options.escape_keys {
                self.write_str(&escape_str(key))?;
            } else {
                self.write_str(key)?;
            }
            self.output.push(':');
            self.write_value(&value)?;
        }
        self.output.push('}');
        self.depth -= 1;
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.options.allows_depth(self.depth) {
            Ok(())
        } else {
            Err(self.depth_error())
        }
    }

    fn depth_error(&self) -> Error {
        let limit = self.options.max_depth.unwrap_or_default();
        log::debug!("encoding aborted: nesting exceeds {}", limit);
        Error::depth_limit(limit)
    }
}

/// Serializer that builds a [`Value`] from any `T: Serialize`.
///
/// Enums use external tagging: unit variants become strings, other variants
/// become single-member objects keyed by the variant name.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: &'static str,
    map: Map,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::with_capacity(1);
        map.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: Map::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: Map::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::with_capacity(1);
        map.insert(self.name.to_string(), Value::Array(self.vec));
        Ok(Value::Object(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_value(key)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(Error::unsupported_type(&format!(
                    "map key of type {}",
                    other.kind()
                )))
            }
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut outer = Map::with_capacity(1);
        outer.insert(self.name.to_string(), Value::Object(self.map));
        Ok(Value::Object(outer))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToEncodable;

    fn encode_str(value: &Value) -> Option<String> {
        let mut encoder = Encoder::new(CodecOptions::new());
        if encoder.encode(value).unwrap() {
            Some(encoder.into_inner())
        } else {
            None
        }
    }

    #[derive(Debug)]
    struct Nothing;

    impl ToEncodable for Nothing {
        fn to_encodable(&self) -> Result<Value> {
            Ok(Value::Undefined)
        }
    }

    #[derive(Debug)]
    struct Forever;

    impl ToEncodable for Forever {
        fn to_encodable(&self) -> Result<Value> {
            Ok(Value::custom(Forever))
        }
    }

    #[test]
    fn test_primitives() {
        assert_eq!(encode_str(&Value::Null).as_deref(), Some("null"));
        assert_eq!(encode_str(&Value::from(true)).as_deref(), Some("true"));
        assert_eq!(encode_str(&Value::from(-12)).as_deref(), Some("-12"));
        assert_eq!(encode_str(&Value::from(1.5)).as_deref(), Some("1.5"));
        assert_eq!(encode_str(&Value::from(f64::NAN)).as_deref(), Some("null"));
    }

    #[test]
    fn test_absent_top_level() {
        assert_eq!(encode_str(&Value::Undefined), None);
        assert_eq!(encode_str(&Value::Opaque), None);
        assert_eq!(encode_str(&Value::custom(Nothing)), None);
    }

    #[test]
    fn test_string_quoting_after_escape() {
        assert_eq!(
            encode_str(&Value::from(":a\"b\n")).as_deref(),
            Some(r#""::a\"b\n""#)
        );
    }

    #[test]
    fn test_hook_resolving_to_undefined_omits_member() {
        let mut map = Map::new();
        map.insert("gone".to_string(), Value::custom(Nothing));
        map.insert("kept".to_string(), Value::from(1));
        assert_eq!(
            encode_str(&Value::Object(map)).as_deref(),
            Some(r#"{"kept":1}"#)
        );

        let arr = Value::Array(vec![Value::custom(Nothing)]);
        assert_eq!(encode_str(&arr).as_deref(), Some("[null]"));
    }

    #[test]
    fn test_depth_limit() {
        let options = CodecOptions::new().with_max_depth(1);
        let nested = Value::Array(vec![Value::Array(vec![])]);

        let mut encoder = Encoder::new(options.clone());
        assert!(matches!(
            encoder.encode(&nested),
            Err(Error::DepthLimit { limit: 1 })
        ));

        let mut encoder = Encoder::new(options);
        assert!(encoder.encode(&Value::Array(vec![Value::from(1)])).unwrap());
    }

    #[test]
    fn test_endless_hook_chain_hits_depth_limit() {
        let mut encoder = Encoder::new(CodecOptions::new().with_max_depth(8));
        assert!(matches!(
            encoder.encode(&Value::custom(Forever)),
            Err(Error::DepthLimit { limit: 8 })
        ));
    }

    #[test]
    fn test_unescaped_keys() {
        let mut map = Map::new();
        map.insert(":k".to_string(), Value::from(":v"));
        let mut encoder = Encoder::new(CodecOptions::new().with_escape_keys(false));
        encoder.encode(&Value::Object(map)).unwrap();
        assert_eq!(encoder.into_inner(), r#"{":k":"::v"}"#);
    }

    #[test]
    fn test_value_serializer_bytes_and_enums() {
        #[derive(Serialize)]
        enum Shape {
            Dot,
            Circle(f64),
            Rect { w: u32, h: u32 },
        }

        assert_eq!(
            serde_bytes::Bytes::new(&[1, 2]).serialize(ValueSerializer).unwrap(),
            Value::Bytes(vec![1, 2])
        );
        assert_eq!(to_value(&Shape::Dot).unwrap(), Value::from("Dot"));

        let circle = to_value(&Shape::Circle(2.0)).unwrap();
        assert_eq!(
            circle.as_object().and_then(|m| m.get("Circle")),
            Some(&Value::from(2.0))
        );

        let rect = to_value(&Shape::Rect { w: 3, h: 4 }).unwrap();
        let inner = rect.as_object().and_then(|m| m.get("Rect")).unwrap();
        assert_eq!(inner.as_object().and_then(|m| m.get("h")), Some(&Value::from(4)));
    }

    #[test]
    fn test_value_serializer_stringifies_numeric_keys() {
        let mut source = std::collections::BTreeMap::new();
        source.insert(1u32, "one");
        let value = to_value(&source).unwrap();
        assert_eq!(
            value.as_object().and_then(|m| m.get("1")),
            Some(&Value::from("one"))
        );
    }
}
