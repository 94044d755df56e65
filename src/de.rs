//! Serde deserializer for MessagePack views.
//!
//! [`Value`] implements [`serde::Deserializer`], so any decoded value, nested
//! or not, can be turned into a Rust type. Strings and binaries are handed to
//! the visitor borrowed from the buffer, so `&str` and `&[u8]` fields
//! deserialize without copying.
//!
//! # Quick Start
//!
//! ```
//! use serde::Deserialize;
//! use msgpack_view::{Msgpack, from_slice};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Sensor<'a> {
//!     name: &'a str,
//!     hits: u32,
//! }
//!
//! // {"name": "p1", "hits": 3}
//! let data = [0x82, 0xa4, b'n', b'a', b'm', b'e', 0xa2, b'p', b'1', 0xa4, b'h', b'i', b't', b's', 0x03];
//! let sensor: Sensor = from_slice(&data).unwrap();
//! assert_eq!(sensor, Sensor { name: "p1", hits: 3 });
//!
//! // Or only a nested part of a larger buffer.
//! let hits: u32 = Msgpack::new(&data).child("hits").unwrap().unwrap().deserialize().unwrap();
//! assert_eq!(hits, 3);
//! ```
//!
//! # MessagePack to Rust Type Mapping
//!
//! | MessagePack | Rust Types |
//! |-------------|------------|
//! | nil | `()`, `Option::None`, unit structs |
//! | bool | `bool` |
//! | int / uint | any integer type that holds the value |
//! | float32 / float64 | `f32`, `f64` |
//! | str | `&str`, `String`, `char`, unit enum variants |
//! | bin | `&[u8]`/`Vec<u8>` (with `serde_bytes`) |
//! | array | `Vec<T>`, tuples, `[T; N]`, tuple structs |
//! | map | structs, `HashMap<K, V>`, `{variant: payload}` enums |
//! | ext | `(i8, &[u8])` |
//!
//! # Error Handling
//!
//! - [`Error::Truncated`] / [`Error::InvalidFormat`] - malformed input
//! - [`Error::TrailingData`] - extra bytes after the root value ([`from_slice`] only)
//! - [`Error::DepthLimitExceeded`] - containers nested deeper than [`MAX_DEPTH`]
//! - [`Error::Message`] - the visitor rejected the value (wrong type, out of range, ...)

use serde::{
    Deserialize,
    de::{
        self, DeserializeSeed, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
        value::{BorrowedBytesDeserializer, BorrowedStrDeserializer, I8Deserializer},
    },
};

use crate::{ArrayIter, Error, ExtView, MapIter, Msgpack, Result, Value, cold_path, decode_value};

/// Deserialize a value from a buffer that holds exactly one MessagePack value.
///
/// # Errors
///
/// Returns an error if:
/// - The data is malformed ([`Error::Truncated`], [`Error::InvalidFormat`])
/// - There are extra bytes after the root value ([`Error::TrailingData`])
/// - The value does not fit `T` ([`Error::Message`])
pub fn from_slice<'de, T>(input: &'de [u8]) -> Result<T>
where
    T: Deserialize<'de>,
{
    let (consumed, value) = decode_value(input, 0)?;
    if consumed < input.len() {
        cold_path();
        return Err(Error::TrailingData(input.len() - consumed));
    }
    T::deserialize(value)
}

/// Deserialize a `T` from an already decoded value.
#[inline]
pub fn from_value<'de, T>(value: Value<'de>) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(value)
}

impl<'a> Msgpack<'a> {
    /// Deserializes the value this view is positioned at.
    ///
    /// Unlike [`from_slice`], bytes after the value are ignored.
    #[inline]
    pub fn deserialize<T: Deserialize<'a>>(&self) -> Result<T> {
        T::deserialize(self.value()?)
    }
}

/// How many arrays, maps and enum payloads may nest before deserialization
/// fails with [`Error::DepthLimitExceeded`].
pub const MAX_DEPTH: usize = 128;

impl<'de> de::Deserializer<'de> for Value<'de> {
    type Error = Error;

    #[inline]
    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Nested::root(self).deserialize_any(visitor)
    }

    #[inline]
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Nested::root(self).deserialize_option(visitor)
    }

    #[inline]
    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Nested::root(self).deserialize_newtype_struct(name, visitor)
    }

    #[inline]
    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Nested::root(self).deserialize_enum(name, variants, visitor)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

// A value together with the number of container levels it may still open.
struct Nested<'de> {
    value: Value<'de>,
    depth: usize,
}

impl<'de> Nested<'de> {
    #[inline]
    fn root(value: Value<'de>) -> Self {
        Nested {
            value,
            depth: MAX_DEPTH,
        }
    }

    /// Depth left to the children of a container at this level.
    #[inline]
    fn enter(&self) -> Result<usize> {
        match self.depth.checked_sub(1) {
            Some(depth) => Ok(depth),
            None => {
                cold_path();
                Err(Error::DepthLimitExceeded)
            }
        }
    }
}

impl<'de> de::Deserializer<'de> for Nested<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Nil => visitor.visit_unit(),
            Value::Bool(value) => visitor.visit_bool(value),
            Value::UInt(value) => visitor.visit_u64(value),
            Value::Int(value) => visitor.visit_i64(value),
            Value::Float(value) => visitor.visit_f64(value),
            Value::Str(value) => visitor.visit_borrowed_str(value.to_str()?),
            Value::Bin(value) => visitor.visit_borrowed_bytes(value.as_bytes()),
            Value::Array(array) => visitor.visit_seq(ArrayAccess {
                iter: array.iter(),
                depth: self.enter()?,
            }),
            Value::Map(map) => visitor.visit_map(MapEntries {
                iter: map.iter(),
                value: None,
                depth: self.enter()?,
            }),
            Value::Ext(ext) => visitor.visit_seq(ExtAccess { ext, index: 0 }),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Nil => visitor.visit_none(),
            _ => visitor.visit_some(self),
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
            // Unit variant: the variant name alone
            Value::Str(name) => visitor.visit_enum(BorrowedStrDeserializer::new(name.to_str()?)),
            // Any other variant: a single-pair map {variant: payload}
            Value::Map(map) if map.len() == 1 => {
                let depth = self.enter()?;
                let mut iter = map.iter();
                match iter.next() {
                    Some(pair) => {
                        let (variant, payload) = pair?;
                        visitor.visit_enum(VariantEntry {
                            variant,
                            payload,
                            depth,
                        })
                    }
                    None => {
                        cold_path();
                        Err(de::Error::invalid_length(0, &"map with a single key"))
                    }
                }
            }
            other => {
                cold_path();
                Err(Error::TypeMismatch {
                    expected: "str or single-pair map",
                    found: other.family().name(),
                })
            }
        }
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct ArrayAccess<'de> {
    iter: ArrayIter<'de>,
    depth: usize,
}

impl<'de> SeqAccess<'de> for ArrayAccess<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(Nested {
                    value: value?,
                    depth: self.depth,
                })
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapEntries<'de> {
    iter: MapIter<'de>,
    value: Option<Value<'de>>,
    depth: usize,
}

impl<'de> MapAccess<'de> for MapEntries<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(pair) => {
                let (key, value) = pair?;
                self.value = Some(value);
                seed.deserialize(Nested {
                    value: key,
                    depth: self.depth,
                })
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
            Some(value) => seed.deserialize(Nested {
                value,
                depth: self.depth,
            }),
            None => {
                cold_path();
                Err(de::Error::custom("map value requested before its key"))
            }
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

// Ext values are exposed as the two-element sequence (type_code, payload).
struct ExtAccess<'de> {
    ext: ExtView<'de>,
    index: u8,
}

impl<'de> SeqAccess<'de> for ExtAccess<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        self.index = self.index.saturating_add(1);
        match self.index {
            1 => seed
                .deserialize(I8Deserializer::<Error>::new(self.ext.type_code()))
                .map(Some),
            2 => seed
                .deserialize(BorrowedBytesDeserializer::<Error>::new(self.ext.as_bytes()))
                .map(Some),
            _ => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(2usize.saturating_sub(self.index as usize))
    }
}

struct VariantEntry<'de> {
    variant: Value<'de>,
    payload: Value<'de>,
    depth: usize,
}

impl<'de> EnumAccess<'de> for VariantEntry<'de> {
    type Error = Error;
    type Variant = Nested<'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Nested {
            value: self.variant,
            depth: self.depth,
        })?;
        let payload = Nested {
            value: self.payload,
            depth: self.depth,
        };
        Ok((variant, payload))
    }
}

impl<'de> VariantAccess<'de> for Nested<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Nil => Ok(()),
            other => {
                cold_path();
                Err(Error::TypeMismatch {
                    expected: "nil",
                    found: other.family().name(),
                })
            }
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(self)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_map(self, visitor)
    }
}
