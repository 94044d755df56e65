use crate::{
    Error, Family, Result, cold_path, decode_value, find_array_element, find_map_entry,
};

/// A decoded MessagePack value.
///
/// Scalars are copied out of the buffer. Strings, binaries, extensions and
/// containers are views that borrow the caller's buffer and never copy it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    Nil,
    Bool(bool),
    /// Positive fixint and uint8/16/32/64.
    UInt(u64),
    /// Negative fixint and int8/16/32/64.
    Int(i64),
    /// float32 (widened) and float64.
    Float(f64),
    Str(StrView<'a>),
    Bin(BinView<'a>),
    Array(ArrayView<'a>),
    Map(MapView<'a>),
    Ext(ExtView<'a>),
}

impl<'a> Value<'a> {
    /// Get the family of this value.
    #[inline]
    pub fn family(&self) -> Family {
        match self {
            Value::Nil => Family::Nil,
            Value::Bool(_) => Family::Bool,
            Value::UInt(_) => Family::UInt,
            Value::Int(_) => Family::Int,
            Value::Float(_) => Family::Float,
            Value::Str(_) => Family::Str,
            Value::Bin(_) => Family::Bin,
            Value::Array(_) => Family::Array,
            Value::Map(_) => Family::Map,
            Value::Ext(_) => Family::Ext,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is an integer that fits.
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(value) => Some(*value),
            Value::Int(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            Value::UInt(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str_view(&self) -> Option<StrView<'a>> {
        match self {
            Value::Str(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string if this is a `Str` holding valid UTF-8.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_str_view().and_then(|value| value.to_str().ok())
    }

    #[inline]
    pub fn as_bin(&self) -> Option<&'a [u8]> {
        match self {
            Value::Bin(value) => Some(value.as_bytes()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<ArrayView<'a>> {
        match self {
            Value::Array(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<MapView<'a>> {
        match self {
            Value::Map(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_ext(&self) -> Option<ExtView<'a>> {
        match self {
            Value::Ext(value) => Some(*value),
            _ => None,
        }
    }

    pub(crate) fn mismatch(&self, expected: Family) -> Error {
        cold_path();
        Error::TypeMismatch {
            expected: expected.name(),
            found: self.family().name(),
        }
    }
}

/// A string payload inside the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrView<'a> {
    pub(crate) buf: &'a [u8],
    pub(crate) offset: usize,
    pub(crate) len: usize,
}

impl<'a> StrView<'a> {
    /// Offset of the first data byte.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The raw bytes, without UTF-8 validation.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.offset..self.offset + self.len]
    }

    /// Validates the payload as UTF-8.
    pub fn to_str(&self) -> Result<&'a str> {
        std::str::from_utf8(self.as_bytes()).map_err(|_| {
            cold_path();
            Error::InvalidUtf8 {
                offset: self.offset,
            }
        })
    }
}

/// A binary payload inside the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinView<'a> {
    pub(crate) buf: &'a [u8],
    pub(crate) offset: usize,
    pub(crate) len: usize,
}

impl<'a> BinView<'a> {
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.offset..self.offset + self.len]
    }
}

/// An extension value: an application type code and its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtView<'a> {
    pub(crate) buf: &'a [u8],
    pub(crate) type_code: i8,
    pub(crate) offset: usize,
    pub(crate) len: usize,
}

impl<'a> ExtView<'a> {
    #[inline]
    pub fn type_code(&self) -> i8 {
        self.type_code
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.offset..self.offset + self.len]
    }
}

/// An array inside the buffer.
///
/// Holds the element count and the byte length of the body; elements are
/// decoded on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayView<'a> {
    pub(crate) buf: &'a [u8],
    pub(crate) offset: usize,
    pub(crate) count: usize,
    pub(crate) body_len: usize,
}

impl<'a> ArrayView<'a> {
    /// Returns the number of elements in this array.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if this array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Offset of the first element.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte length of all elements together, excluding the header.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body_len
    }

    /// The buffer this view points into.
    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Returns the element at the given index, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Result<Option<Value<'a>>> {
        match find_array_element(self, index)? {
            Some(offset) => Ok(Some(decode_value(self.buf, offset)?.1)),
            None => Ok(None),
        }
    }

    /// Returns an iterator over the elements of this array.
    #[inline]
    pub fn iter(&self) -> ArrayIter<'a> {
        ArrayIter {
            buf: self.buf,
            offset: self.offset,
            remaining: self.count,
        }
    }
}

impl<'a> IntoIterator for ArrayView<'a> {
    type Item = Result<Value<'a>>;
    type IntoIter = ArrayIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of an [`ArrayView`].
///
/// Stops after the first error.
#[derive(Clone, Debug)]
pub struct ArrayIter<'a> {
    buf: &'a [u8],
    offset: usize,
    remaining: usize,
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = Result<Value<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        match decode_value(self.buf, self.offset) {
            Ok((consumed, value)) => {
                self.offset += consumed;
                Some(Ok(value))
            }
            Err(e) => {
                cold_path();
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}

/// A map inside the buffer.
///
/// `len` counts key/value pairs, not individual keys and values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapView<'a> {
    pub(crate) buf: &'a [u8],
    pub(crate) offset: usize,
    pub(crate) count: usize,
    pub(crate) body_len: usize,
}

impl<'a> MapView<'a> {
    /// Returns the number of key/value pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Offset of the first key.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte length of all keys and values together, excluding the header.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body_len
    }

    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Returns the value stored under the first top-level string key equal to
    /// `key`, or `None` if there is none.
    pub fn get(&self, key: &str) -> Result<Option<Value<'a>>> {
        match find_map_entry(self, key.as_bytes())? {
            Some(offset) => Ok(Some(decode_value(self.buf, offset)?.1)),
            None => Ok(None),
        }
    }

    /// Returns an iterator over the key/value pairs, in encoding order.
    #[inline]
    pub fn iter(&self) -> MapIter<'a> {
        MapIter {
            buf: self.buf,
            offset: self.offset,
            remaining: self.count,
        }
    }
}

impl<'a> IntoIterator for MapView<'a> {
    type Item = Result<(Value<'a>, Value<'a>)>;
    type IntoIter = MapIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key/value pairs of a [`MapView`].
///
/// Stops after the first error.
#[derive(Clone, Debug)]
pub struct MapIter<'a> {
    buf: &'a [u8],
    offset: usize,
    remaining: usize,
}

impl<'a> MapIter<'a> {
    fn next_pair(&mut self) -> Result<(Value<'a>, Value<'a>)> {
        let (key_len, key) = decode_value(self.buf, self.offset)?;
        let (value_len, value) = decode_value(self.buf, self.offset + key_len)?;
        self.offset += key_len + value_len;
        Ok((key, value))
    }
}

impl<'a> Iterator for MapIter<'a> {
    type Item = Result<(Value<'a>, Value<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let pair = self.next_pair();
        if pair.is_err() {
            cold_path();
            self.remaining = 0;
        }
        Some(pair)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MapIter<'_> {}
