/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys must be string literals. A parenthesized expression is
/// converted with `Value::from`, so existing values (including
/// [`Value::Custom`](crate::Value::Custom) hooks) are kept as they are. Any
/// other token tree goes through [`to_value`](crate::to_value).
///
/// ```rust
/// use serde_jsonbuf::{jsonbuf, Value};
///
/// let value = jsonbuf!({
///     "id": 7,
///     "tags": ["a", ":b"],
///     "blob": (Value::Bytes(vec![1, 2]))
/// });
/// assert!(value.is_object());
/// ```
#[macro_export]
macro_rules! jsonbuf {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::jsonbuf!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::jsonbuf!($value));
        )*
        $crate::Value::Object(object)
    }};

    (( $e:expr )) => {
        $crate::Value::from($e)
    };

    // Fallback for any other expression.
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}
