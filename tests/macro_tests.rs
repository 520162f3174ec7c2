use serde_jsonbuf::{encode, jsonbuf, Map, Number, Result, ToEncodable, Value};

#[test]
fn test_jsonbuf_macro_scalars() {
    assert_eq!(jsonbuf!(null), Value::Null);
    assert_eq!(jsonbuf!(true), Value::Bool(true));
    assert_eq!(jsonbuf!(false), Value::Bool(false));
    assert_eq!(jsonbuf!(42), Value::Number(Number::Integer(42)));
    assert_eq!(jsonbuf!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(jsonbuf!(-123), Value::Number(Number::Integer(-123)));
    assert_eq!(jsonbuf!(""), Value::String(String::new()));
}

#[test]
fn test_jsonbuf_macro_arrays() {
    assert_eq!(jsonbuf!([]), Value::Array(vec![]));

    let mixed = jsonbuf!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        Value::Array(vec![
            Value::Number(Number::Integer(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn test_jsonbuf_macro_nested() {
    let nested = jsonbuf!({
        "user": {
            "id": 123,
            "name": ":bob"
        },
        "tags": ["admin", "developer"],
        "avatar": (vec![0x47_u8, 0x49, 0x46])
    });

    match nested {
        Value::Object(ref obj) => {
            assert_eq!(obj.len(), 3);

            if let Some(Value::Object(user)) = obj.get("user") {
                assert_eq!(user.get("id"), Some(&Value::Number(Number::Integer(123))));
                assert_eq!(user.get("name"), Some(&Value::String(":bob".to_string())));
            } else {
                panic!("Expected user to be an object");
            }

            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 2);
            } else {
                panic!("Expected tags to be an array");
            }

            assert_eq!(obj.get("avatar"), Some(&Value::Bytes(vec![0x47, 0x49, 0x46])));
        }
        _ => panic!("Expected object"),
    }

    assert_eq!(
        encode(&nested).unwrap().as_deref(),
        Some(concat!(
            r#"{"user":{"id":123,"name":"::bob"},"#,
            r#""tags":["admin","developer"],"avatar":":base64:R0lG"}"#
        ))
    );
}

#[test]
fn test_jsonbuf_macro_keeps_hooks() {
    #[derive(Debug)]
    struct Version;

    impl ToEncodable for Version {
        fn to_encodable(&self) -> Result<Value> {
            Ok(Value::from("1.2.0"))
        }
    }

    let value = jsonbuf!({"version": (Value::custom(Version))});
    let hook = value.as_object().and_then(|m| m.get("version")).unwrap();
    assert!(matches!(hook, Value::Custom(_)));
    assert_eq!(
        encode(&value).unwrap().as_deref(),
        Some(r#"{"version":"1.2.0"}"#)
    );
}

#[test]
fn test_jsonbuf_macro_serializes_other_expressions() {
    #[derive(serde::Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    let point = Point { x: 1, y: 2 };
    let value = jsonbuf!({"at": point});
    let mut expected = Map::new();
    expected.insert("x".to_string(), Value::from(1));
    expected.insert("y".to_string(), Value::from(2));
    assert_eq!(
        value.as_object().and_then(|m| m.get("at")),
        Some(&Value::Object(expected))
    );
}

#[test]
fn test_value_methods() {
    let null_val = jsonbuf!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_bytes());
    assert!(!null_val.is_array());
    assert!(!null_val.is_object());
    assert!(!null_val.is_absent());

    let bool_val = jsonbuf!(true);
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = jsonbuf!("hello");
    assert_eq!(str_val.as_str(), Some("hello"));

    let bytes_val = jsonbuf!((vec![1_u8]));
    assert_eq!(bytes_val.as_bytes(), Some(&[1_u8][..]));

    let array_val = jsonbuf!([1, 2, 3]);
    assert_eq!(array_val.as_array().map(Vec::len), Some(3));

    let obj_val = jsonbuf!({"key": "value"});
    assert_eq!(obj_val.as_object().map(Map::len), Some(1));

    assert!(Value::Undefined.is_absent());
    assert!(Value::Opaque.is_absent());
}
