//! Configuration options for jsonbuf encoding and decoding.
//!
//! The defaults match the plain codec: no depth limit beyond what
//! `serde_json` enforces while parsing, and object keys escaped the same way
//! as string values.
//!
//! ## Examples
//!
//! ```rust
//! use serde_jsonbuf::{decode_with_options, encode_with_options, jsonbuf, CodecOptions};
//!
//! let options = CodecOptions::new().with_max_depth(2);
//!
//! let shallow = jsonbuf!({"a": [1, 2]});
//! assert!(encode_with_options(&shallow, &options).is_ok());
//!
//! let deep = jsonbuf!({"a": [[1]]});
//! assert!(encode_with_options(&deep, &options).is_err());
//! assert!(decode_with_options(r#"{"a":[[1]]}"#, &options).is_err());
//! ```

/// Configuration options for the codec.
///
/// # Examples
///
/// ```rust
/// use serde_jsonbuf::CodecOptions;
///
/// let options = CodecOptions::new();
/// assert_eq!(options.max_depth, None);
/// assert!(options.escape_keys);
///
/// let options = CodecOptions::new()
///     .with_max_depth(32)
///     .with_escape_keys(false);
/// assert_eq!(options.max_depth, Some(32));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    /// Maximum number of nested arrays/objects. `None` means unbounded on
    /// encode and `serde_json`'s built-in limit on decode.
    pub max_depth: Option<usize>,
    /// Whether object keys go through the marker escaping rule.
    pub escape_keys: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            max_depth: None,
            escape_keys: true,
        }
    }
}

impl CodecOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how deeply arrays and objects may nest.
    ///
    /// A top-level scalar has depth 0, `[1]` has depth 1, `[[1]]` depth 2.
    /// Chains of [`ToEncodable`](crate::ToEncodable) substitutions are also
    /// capped at this many hops.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Enables or disables marker escaping for object keys.
    ///
    /// With escaping disabled, keys are written and read back verbatim; both
    /// sides of a connection must agree on this setting.
    #[must_use]
    pub fn with_escape_keys(mut self, escape_keys: bool) -> Self {
        self.escape_keys = escape_keys;
        self
    }

    /// Returns `true` if `depth` is within the configured limit.
    #[inline]
    pub(crate) fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |limit| depth <= limit)
    }
}
