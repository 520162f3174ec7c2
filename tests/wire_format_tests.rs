//! Wire format conformance: encoder output and decoder input for the marker
//! escaping rule and the handling of values without a text form.

use serde_jsonbuf::escape::{binary_text, escape_str, unescape_str, BINARY_PREFIX, MARKER};
use serde_jsonbuf::{
    decode, decode_with_options, encode, encode_with_options, jsonbuf, CodecOptions, Error, Map,
    Number, Result, ToEncodable, Value,
};

fn enc(value: &Value) -> String {
    encode(value).unwrap().expect("value has a text form")
}

fn round_trip(value: &Value) -> Value {
    decode(&enc(value)).unwrap()
}

#[derive(Debug)]
struct Token(&'static str);

impl ToEncodable for Token {
    fn to_encodable(&self) -> Result<Value> {
        Ok(Value::from(self.0))
    }
}

#[derive(Debug)]
struct Gone;

impl ToEncodable for Gone {
    fn to_encodable(&self) -> Result<Value> {
        Ok(Value::Undefined)
    }
}

#[derive(Debug)]
struct Broken;

impl ToEncodable for Broken {
    fn to_encodable(&self) -> Result<Value> {
        Err(Error::hook("connection handle cannot be encoded"))
    }
}

#[test]
fn test_constants() {
    assert_eq!(MARKER, ':');
    assert_eq!(BINARY_PREFIX, ":base64:");
}

#[test]
fn test_marker_strings_round_trip() {
    assert_eq!(enc(&Value::from(":foo")), r#""::foo""#);
    assert_eq!(round_trip(&Value::from(":foo")), Value::from(":foo"));
    assert_eq!(enc(&Value::from("foo")), r#""foo""#);
    assert_eq!(round_trip(&Value::from("foo")), Value::from("foo"));
    assert_eq!(round_trip(&Value::from(":")), Value::from(":"));
    assert_eq!(round_trip(&Value::from("")), Value::from(""));
}

#[test]
fn test_binary_payloads() {
    assert_eq!(enc(&Value::Bytes(vec![1, 2, 3])), r#"":base64:AQID""#);
    assert_eq!(enc(&Value::Bytes(b"hello".to_vec())), r#"":base64:aGVsbG8=""#);
    assert_eq!(enc(&Value::Bytes(vec![])), r#"":base64:""#);

    assert_eq!(round_trip(&Value::Bytes(vec![])), Value::Bytes(vec![]));
    let every_byte: Vec<u8> = (0..=255).collect();
    assert_eq!(
        round_trip(&Value::Bytes(every_byte.clone())),
        Value::Bytes(every_byte)
    );
}

#[test]
fn test_binary_prefix_string_does_not_collide() {
    let text = Value::from(":base64:AQID");
    assert_eq!(enc(&text), r#""::base64:AQID""#);
    assert_eq!(round_trip(&text), text);
}

#[test]
fn test_decoder_accepts_unpadded_and_single_marker() {
    assert_eq!(decode(r#"":base64:aGVsbG8""#).unwrap(), Value::Bytes(b"hello".to_vec()));
    // Never produced by the encoder, but accepted.
    assert_eq!(decode(r#"":foo""#).unwrap(), Value::from("foo"));
}

#[test]
fn test_invalid_base64_is_parse_error() {
    let err = decode(r#"{"a":":base64:!!!!"}"#).unwrap_err();
    assert!(err.is_parse());
    assert!(unescape_str(":base64:!!!!").unwrap_err().is_parse());
}

#[test]
fn test_escape_helpers_on_standalone_strings() {
    assert_eq!(escape_str(":x"), "::x");
    assert_eq!(escape_str("x:"), "x:");
    assert_eq!(binary_text(&[0xff]), ":base64:/w==");
    assert_eq!(unescape_str("::x").unwrap(), Value::from(":x"));
    assert_eq!(unescape_str(":base64:/w==").unwrap(), Value::Bytes(vec![0xff]));
}

#[test]
fn test_scalars() {
    assert_eq!(enc(&Value::Null), "null");
    assert_eq!(enc(&Value::from(42)), "42");
    assert_eq!(enc(&Value::from(true)), "true");
    assert_eq!(enc(&Value::from(-0.5)), "-0.5");
    assert_eq!(enc(&Value::Number(Number::Infinity)), "null");
    assert_eq!(enc(&Value::Number(Number::NegativeInfinity)), "null");
}

#[test]
fn test_absent_values_in_arrays() {
    let value = Value::Array(vec![Value::Undefined, Value::from(1), Value::Opaque]);
    assert_eq!(enc(&value), "[null,1,null]");
    assert_eq!(round_trip(&value), jsonbuf!([null, 1, null]));
}

#[test]
fn test_absent_values_in_objects() {
    let mut map = Map::new();
    map.insert("a".to_string(), Value::Undefined);
    map.insert("b".to_string(), Value::from(1));
    map.insert("c".to_string(), Value::Opaque);
    let value = Value::Object(map);

    assert_eq!(enc(&value), r#"{"b":1}"#);
    assert_eq!(round_trip(&value), jsonbuf!({"b": 1}));
}

#[test]
fn test_absent_values_at_top_level() {
    assert_eq!(encode(&Value::Undefined).unwrap(), None);
    assert_eq!(encode(&Value::Opaque).unwrap(), None);
    assert_eq!(encode(&Value::custom(Gone)).unwrap(), None);
}

#[test]
fn test_marker_keys_round_trip() {
    let mut map = Map::new();
    map.insert(":id".to_string(), Value::from(1));
    map.insert(":base64:AQID".to_string(), Value::from(2));
    map.insert("plain".to_string(), Value::from(3));
    let value = Value::Object(map);

    assert_eq!(
        enc(&value),
        r#"{"::id":1,"::base64:AQID":2,"plain":3}"#
    );
    assert_eq!(round_trip(&value), value);
}

#[test]
fn test_hooks_replace_values() {
    let value = jsonbuf!({
        "user": (Value::custom(Token(":root"))),
        "gone": (Value::custom(Gone)),
        "list": [(Value::custom(Gone)), (Value::custom(Token("x")))]
    });

    assert_eq!(enc(&value), r#"{"user":"::root","list":[null,"x"]}"#);
    assert_eq!(
        round_trip(&value),
        jsonbuf!({"user": ":root", "list": [null, "x"]})
    );
}

#[test]
fn test_hook_errors_propagate() {
    let value = Value::Array(vec![Value::from(1), Value::custom(Broken)]);
    match encode(&value) {
        Err(Error::Hook(msg)) => assert!(msg.contains("connection handle")),
        other => panic!("Expected hook error, got {:?}", other),
    }
}

#[test]
fn test_malformed_text() {
    assert!(matches!(decode("{not valid"), Err(Error::Parse { .. })));
    assert!(decode("").unwrap_err().is_parse());
    assert!(decode("[1,]").unwrap_err().is_parse());
    assert!(decode("null x").unwrap_err().is_parse());
}

#[test]
fn test_depth_limit_both_directions() {
    let options = CodecOptions::new().with_max_depth(3);
    let ok = jsonbuf!({"a": {"b": [1]}});
    let deep = jsonbuf!({"a": {"b": [[1]]}});

    assert!(encode_with_options(&ok, &options).unwrap().is_some());
    assert!(matches!(
        encode_with_options(&deep, &options),
        Err(Error::DepthLimit { limit: 3 })
    ));

    assert!(decode_with_options(r#"{"a":{"b":[1]}}"#, &options).is_ok());
    assert!(decode_with_options(r#"{"a":{"b":[[1]]}}"#, &options)
        .unwrap_err()
        .is_parse());
}

#[test]
fn test_default_decoder_recursion_limit() {
    let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
    assert!(decode(&deep).unwrap_err().is_parse());
}

#[test]
fn test_output_is_plain_json() {
    let value = jsonbuf!({
        "blob": (Value::Bytes(vec![1, 2, 3])),
        "text": ":x",
        "n": [1, 2.5, null, true]
    });
    let text = enc(&value);

    let plain: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(plain["blob"], ":base64:AQID");
    assert_eq!(plain["text"], "::x");
}
