//! jsonbuf decoding.
//!
//! Parsing is delegated to `serde_json`. The codec plugs in through a Serde
//! [`DeserializeSeed`](serde::de::DeserializeSeed): `serde_json` calls the
//! seed's visitor once per node, children before parents, and the visitor
//! applies the inverse escaping rule to every string it sees. Objects and
//! arrays are therefore fully rebuilt by the time their parent is visited.
//!
//! The module also provides [`ValueDeserializer`], which feeds a decoded
//! [`Value`] into any `T: Deserialize`. [`Value::Bytes`] is handed to
//! visitors through `visit_byte_buf`.
//!
//! ## Usage
//!
//! ```rust
//! use serde_jsonbuf::{decode, Value};
//!
//! let value = decode(r#"{"blob":":base64:AQID","text":"::x"}"#).unwrap();
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.get("blob"), Some(&Value::Bytes(vec![1, 2, 3])));
//! assert_eq!(obj.get("text"), Some(&Value::from(":x")));
//! ```

use crate::escape::{unescape_key, unescape_leaf};
use crate::{CodecOptions, Error, Map, Number, Result, Value};
use serde::de::{self, DeserializeSeed, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use std::fmt;

/// Decodes jsonbuf text into a [`Value`].
///
/// Trailing non-whitespace after the document is rejected.
pub(crate) fn decode_str(text: &str, options: &CodecOptions) -> Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let value = EscapedSeed::root(options)
        .deserialize(&mut deserializer)
        .and_then(|value| deserializer.end().map(|()| value))
        .map_err(|e| {
            log::trace!("jsonbuf decode failed: {}", e);
            Error::from(e)
        })?;
    Ok(value)
}

/// Seed and visitor that rebuild a [`Value`] while reversing the escaping
/// rule on string leaves and object keys.
#[derive(Clone, Copy)]
struct EscapedSeed<'o> {
    options: &'o CodecOptions,
    depth: usize,
}

impl<'o> EscapedSeed<'o> {
    fn root(options: &'o CodecOptions) -> Self {
        EscapedSeed { options, depth: 0 }
    }

    fn descend<E: de::Error>(self) -> std::result::Result<Self, E> {
        let depth = self.depth + 1;
        if self.options.allows_depth(depth) {
            Ok(EscapedSeed { depth, ..self })
        } else {
            Err(E::custom(Error::depth_limit(
                self.options.max_depth.unwrap_or_default(),
            )))
        }
    }
}

impl<'de> DeserializeSeed<'de> for EscapedSeed<'_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for EscapedSeed<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::Integer(value)))
    }

    fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(value)))
    }

    fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::Float(value)))
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        unescape_leaf(value).map_err(|e| E::custom(format!("invalid binary payload: {}", e)))
    }

    fn visit_unit<E>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let child = self.descend()?;
        let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(elem) = seq.next_element_seed(child)? {
            vec.push(elem);
        }
        Ok(Value::Array(vec))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let child = self.descend()?;
        let mut values = Map::new();
        while let Some(mut key) = map.next_key::<String>()? {
            if self.options.escape_keys {
                unescape_key(&mut key);
            }
            let value = map.next_value_seed(child)?;
            values.insert(key, value);
        }
        Ok(Value::Object(values))
    }
}

/// Deserializer over an owned [`Value`], used by [`from_value`](crate::from_value).
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Undefined | Value::Null | Value::Opaque => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::Number(Number::Infinity) => visitor.visit_f64(f64::INFINITY),
            Value::Number(Number::NegativeInfinity) => visitor.visit_f64(f64::NEG_INFINITY),
            Value::Number(Number::NaN) => visitor.visit_f64(f64::NAN),
            Value::String(s) => visitor.visit_string(s),
            Value::Bytes(b) => visitor.visit_byte_buf(b),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            Value::Custom(hook) => {
                ValueDeserializer::new(hook.to_encodable()?).deserialize_any(visitor)
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Undefined | Value::Null | Value::Opaque => visitor.visit_none(),
            value => visitor.visit_some(ValueDeserializer::new(value)),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Bytes(b) => visitor.visit_byte_buf(b),
            // Plain strings are accepted as their UTF-8 bytes.
            Value::String(s) => visitor.visit_byte_buf(s.into_bytes()),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => Err(Error::type_mismatch("bytes", other.kind())),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) => {
                let mut iter = obj.into_iter();
                match (iter.next(), iter.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom(
                        "expected an object with exactly one member for enum",
                    )),
                }
            }
            other => Err(Error::type_mismatch("enum", other.kind())),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        unit unit_struct seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null | Value::Undefined => Ok(()),
            other => Err(Error::type_mismatch("unit variant", other.kind())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => Err(Error::type_mismatch("tuple variant", other.kind())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            other => Err(Error::type_mismatch("struct variant", other.kind())),
        }
    }
}
