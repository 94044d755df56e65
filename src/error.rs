//! Error types for MessagePack navigation and decoding.
//!
//! This module contains the [`Error`] type which represents all possible errors
//! that can occur when reading values out of a MessagePack buffer.
//!
//! # Example
//!
//! ```
//! use msgpack_view::{Error, Msgpack, Result};
//!
//! fn name_of(data: &[u8]) -> Result<Option<&str>> {
//!     match Msgpack::new(data).as_string("name") {
//!         Err(Error::Truncated { offset, .. }) => {
//!             println!("buffer ends early at {offset}");
//!             Ok(None)
//!         }
//!         other => other,
//!     }
//! }
//! # assert_eq!(name_of(&[0x81, 0xa4, b'n', b'a', b'm', b'e', 0xa2, b'h', b'i']).unwrap(), Some("hi"));
//! ```

use std::fmt::{self, Display};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when reading a
/// MessagePack buffer.
///
/// # Variants
///
/// - [`Truncated`](Error::Truncated) - A header or payload runs past the end of the buffer
/// - [`InvalidFormat`](Error::InvalidFormat) - The reserved tag byte `0xc1` was found
/// - [`TypeMismatch`](Error::TypeMismatch) - The value is not of the requested kind
/// - [`KeyNotFound`](Error::KeyNotFound) / [`IndexOutOfRange`](Error::IndexOutOfRange) -
///   strict lookups that found nothing
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Message(String),

    /// The input ended before a declared header or payload.
    ///
    /// `offset` is where the read started, `needed` the number of bytes it
    /// required and `len` the total buffer length.
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// A tag byte that the format reserves and never assigns (`0xc1`).
    InvalidFormat(u8),

    /// Expected one kind of value but found another.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Strict key lookup on a map found no matching top-level key.
    KeyNotFound,

    /// Strict index lookup past the end of an array.
    IndexOutOfRange { index: usize, len: usize },

    /// A string value does not hold valid UTF-8.
    InvalidUtf8 { offset: usize },

    /// Extra bytes remain after the root value.
    ///
    /// Only reported by [`from_slice`](crate::from_slice), which requires the
    /// buffer to hold exactly one value.
    TrailingData(usize),

    /// Arrays, maps or enum payloads are nested deeper than
    /// [`de::MAX_DEPTH`](crate::de::MAX_DEPTH).
    ///
    /// Only reported by the serde deserializer; navigation and skipping do not
    /// recurse.
    DepthLimitExceeded,
}

#[cfg(feature = "serde")]
impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::Truncated {
                offset,
                needed,
                len,
            } => write!(
                formatter,
                "unexpected end of input: {needed} bytes needed at offset {offset} (len={len})"
            ),
            Error::InvalidFormat(tag) => write!(formatter, "invalid MessagePack tag: {tag:#04x}"),
            Error::TypeMismatch { expected, found } => {
                write!(formatter, "expected {expected}, found {found}")
            }
            Error::KeyNotFound => formatter.write_str("key not found"),
            Error::IndexOutOfRange { index, len } => {
                write!(formatter, "index {index} out of range (len={len})")
            }
            Error::InvalidUtf8 { offset } => {
                write!(formatter, "invalid UTF-8 in string at offset {offset}")
            }
            Error::TrailingData(remaining_bytes) => write!(
                formatter,
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            ),
            Error::DepthLimitExceeded => formatter.write_str("recursion limit exceeded"),
        }
    }
}

impl std::error::Error for Error {}
