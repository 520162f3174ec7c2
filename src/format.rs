//! jsonbuf Wire Format
//!
//! This module documents the text format produced by [`encode`](crate::encode)
//! and accepted by [`decode`](crate::decode). It contains no code.
//!
//! # Overview
//!
//! A jsonbuf document is a JSON document. Every structural element (objects,
//! arrays, numbers, booleans, `null`, string quoting and escapes) follows
//! RFC 8259 unchanged. The only extension lives inside string values: the
//! first character `:` is reserved as a marker.
//!
//! # String Leaves
//!
//! | In memory | On the wire |
//! |-----------|-------------|
//! | `Value::Bytes([1, 2, 3])` | `":base64:AQID"` |
//! | `Value::Bytes([])` | `":base64:"` |
//! | `Value::String(":foo")` | `"::foo"` |
//! | `Value::String(":base64:AQID")` | `"::base64:AQID"` |
//! | `Value::String("foo")` | `"foo"` |
//!
//! **Encoding rules**:
//! - Bytes are written as `:base64:` followed by standard base64 (alphabet
//!   `A-Z a-z 0-9 + /`) with `=` padding.
//! - A string whose first character is `:` gets one extra `:` in front.
//! - Any other string is written unchanged.
//!
//! **Decoding rules**, checked in order:
//! 1. A string starting with `:base64:` is binary. The remainder is decoded as
//!    base64; padding is optional. An empty remainder is an empty buffer.
//!    Invalid base64 is a parse error.
//! 2. A string starting with `:` loses exactly one leading `:`.
//! 3. Any other string is kept as is.
//!
//! A string with a single leading `:` that is not a binary payload, such as
//! `":foo"`, is never produced by the encoder. The decoder still accepts it
//! and yields `"foo"`.
//!
//! # Object Keys
//!
//! Keys follow the string rule without the binary case: a leading `:` is
//! doubled on encode and one is stripped on decode. Keys never decode to
//! bytes, so `{":base64:":1}` decodes to the key `"base64:"`.
//!
//! Key escaping can be turned off with
//! [`CodecOptions::with_escape_keys`](crate::CodecOptions::with_escape_keys);
//! both peers must use the same setting.
//!
//! # Values Without Text
//!
//! | Value | Top level | Array element | Object member |
//! |-------|-----------|---------------|---------------|
//! | `Undefined` | no output (`None`) | `null` | omitted |
//! | `Opaque` | no output (`None`) | `null` | omitted |
//! | `Number` NaN / ±Infinity | `null` | `null` | `null` |
//!
//! A [`Value::Custom`](crate::Value::Custom) is replaced by its hook result
//! before any of these rules apply, so a hook that returns `Undefined` makes
//! its object member disappear.
//!
//! # Numbers
//!
//! Integers that fit in `i64` decode as `Number::Integer`. Larger integers
//! and anything with a fraction or exponent decode as `Number::Float`.
//!
//! # Example
//!
//! ```text
//! {"id":7,"name":"::root","key":":base64:3q2+7w==","tags":[null,"x"]}
//! ```
//!
//! decodes to an object with `id = 7`, `name = ":root"`,
//! `key = [0xde, 0xad, 0xbe, 0xef]` and `tags = [null, "x"]`.
