//! Error types for jsonbuf encoding and decoding.
//!
//! The codec itself has very few failure modes:
//!
//! - **Parse errors**: the input is not well-formed JSON, has trailing
//!   characters, or carries a `:base64:` payload that is not valid base64
//! - **Hook errors**: a [`ToEncodable`](crate::ToEncodable) hook failed while
//!   encoding; the hook's error is returned as-is
//! - **Depth limits**: nesting exceeded [`CodecOptions::max_depth`](crate::CodecOptions)
//! - **Type mismatches**: a decoded [`Value`](crate::Value) does not have the
//!   shape the target Rust type expects
//!
//! ## Examples
//!
//! ```rust
//! use serde_jsonbuf::{decode, Error};
//!
//! let err = decode("{not valid").unwrap_err();
//! assert!(err.is_parse());
//!
//! if let Error::Parse { line, col, .. } = err {
//!     assert_eq!(line, 1);
//!     assert!(col > 0);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during jsonbuf encoding/decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The input text is not well-formed
    #[error("Parse error at line {line}, column {col}: {msg}")]
    Parse { line: usize, col: usize, msg: String },

    /// A custom encoding hook reported a failure
    #[error("Encoding hook failed: {0}")]
    Hook(String),

    /// Nesting went deeper than the configured limit
    #[error("Nesting depth exceeds the limit of {limit}")]
    DepthLimit { limit: usize },

    /// Type mismatch while converting a decoded value
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonbuf::Error;
    ///
    /// let err = Error::parse(3, 7, "expected `:`");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn parse(line: usize, col: usize, msg: &str) -> Self {
        Error::Parse {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a failed [`ToEncodable`](crate::ToEncodable) hook.
    pub fn hook<T: fmt::Display>(msg: T) -> Self {
        Error::Hook(msg.to_string())
    }

    /// Creates a depth limit error.
    pub fn depth_limit(limit: usize) -> Self {
        Error::DepthLimit { limit }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonbuf::Error;
    ///
    /// let err = Error::type_mismatch("bytes", "string");
    /// assert!(err.to_string().contains("expected bytes"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if the input text could not be parsed.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Error::Io(err.to_string());
        }
        // serde_json appends " at line L column C" to its message; keep the
        // position in the dedicated fields instead.
        let full = err.to_string();
        let msg = match full.rsplit_once(" at line ") {
            Some((msg, _)) if err.line() > 0 => msg.to_string(),
            _ => full,
        };
        Error::Parse {
            line: err.line(),
            col: err.column(),
            msg,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
