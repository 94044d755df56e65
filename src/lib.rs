//! Zero-copy, read-only access into MessagePack buffers.
//!
//! A [`Msgpack`] view borrows a buffer holding one encoded value and answers
//! lookups by map key or array index without decoding the rest of the buffer.
//! Strings, binaries, extensions and containers come back as views into the
//! caller's bytes; only scalars are copied.
//!
//! # Example
//!
//! ```
//! use msgpack_view::{Msgpack, Value};
//!
//! // {"id": 7, "pos": [1.5, -2]}
//! let data = [
//!     0x82, 0xa2, b'i', b'd', 0x07, 0xa3, b'p', b'o', b's', 0x92,
//!     0xcb, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0, 0xfe,
//! ];
//! let doc = Msgpack::new(&data);
//!
//! assert_eq!(doc.get("id").unwrap(), Some(Value::UInt(7)));
//! let pos = doc.child("pos").unwrap().unwrap();
//! assert_eq!(pos.as_float(0).unwrap(), Some(1.5));
//! assert_eq!(pos.as_int(1).unwrap(), Some(-2));
//! ```
//!
//! The lower layers are public too: [`Format::from_byte`] classifies a tag,
//! [`decode_value`] decodes one value, [`skip_value`] measures one, and
//! [`find_map_entry`] / [`find_array_element`] locate entries in a container.

mod decode;
mod error;
mod format;
mod index;
mod msgpack;
mod navigate;
mod skip;
mod util;
mod value;

#[cfg(feature = "serde")]
pub mod de;
#[cfg(feature = "shared")]
mod shared;

pub use decode::*;
pub use error::*;
pub use format::*;
pub use index::*;
pub use msgpack::*;
pub use navigate::*;
pub use skip::skip_value;
pub(crate) use util::cold_path;
pub use value::*;

#[cfg(feature = "serde")]
pub use de::{from_slice, from_value};
#[cfg(feature = "shared")]
pub use shared::*;
