use zerocopy::IntoBytes;

use crate::{
    ArrayView, Error, ExtView, Family, Index, MapView, Result, Value, decode_value,
    find_array_element, find_map_entry, skip_value, util::slice_at,
};

/// A read-only view over a MessagePack buffer, positioned at one value.
///
/// `Msgpack` never copies or owns the bytes. Every lookup decodes just enough
/// of the buffer to reach the requested entry, so no document tree is ever
/// built. Lookups on the root are the common case; [`child`](Self::child)
/// repositions the view on a nested value so lookups can be chained.
///
/// # Example
///
/// ```
/// use msgpack_view::Msgpack;
///
/// // {"name": "relay", "tags": ["a", "b"], "hits": 3}
/// let data = [
///     0x83,
///     0xa4, b'n', b'a', b'm', b'e', 0xa5, b'r', b'e', b'l', b'a', b'y',
///     0xa4, b't', b'a', b'g', b's', 0x92, 0xa1, b'a', 0xa1, b'b',
///     0xa4, b'h', b'i', b't', b's', 0x03,
/// ];
/// let doc = Msgpack::new(&data);
///
/// assert_eq!(doc.as_string("name").unwrap(), Some("relay"));
/// assert_eq!(doc.as_int("hits").unwrap(), Some(3));
/// assert_eq!(doc.as_int("missing").unwrap(), None);
///
/// let tags = doc.child("tags").unwrap().unwrap();
/// assert_eq!(tags.as_string(1).unwrap(), Some("b"));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Msgpack<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Msgpack<'a> {
    /// Creates a view over any contiguous byte container. The buffer must
    /// start with one complete encoded value.
    #[inline]
    pub fn new<T: AsRef<[u8]> + ?Sized>(source: &'a T) -> Self {
        Self {
            buf: source.as_ref(),
            offset: 0,
        }
    }

    /// Creates a view over a buffer of signed bytes.
    #[inline]
    pub fn from_signed(source: &'a [i8]) -> Self {
        Self {
            buf: source.as_bytes(),
            offset: 0,
        }
    }

    /// Creates a view from a raw pointer and length.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` bytes for the whole lifetime
    /// `'a`, and the memory must not be mutated during that time. See
    /// [`std::slice::from_raw_parts`].
    #[inline]
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        Self {
            buf: unsafe { std::slice::from_raw_parts(ptr, len) },
            offset: 0,
        }
    }

    #[inline]
    pub(crate) fn at_offset(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, offset }
    }

    /// The whole underlying buffer.
    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Offset of the value this view is positioned at.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Decodes the value this view is positioned at.
    #[inline]
    pub fn value(&self) -> Result<Value<'a>> {
        Ok(decode_value(self.buf, self.offset)?.1)
    }

    /// Number of bytes the current value occupies, including nested values.
    #[inline]
    pub fn encoded_len(&self) -> Result<usize> {
        skip_value(self.buf, self.offset)
    }

    /// The encoded bytes of the current value.
    pub fn as_encoded(&self) -> Result<&'a [u8]> {
        let len = self.encoded_len()?;
        slice_at(self.buf, self.offset, len)
    }

    /// Finds the offset of the entry for `index`. The inner `Err` carries the
    /// error a strict lookup reports when the entry is absent.
    fn locate<I: Index>(&self, index: &I) -> Result<std::result::Result<usize, Error>> {
        let value = self.value()?;
        index.index_dispatch(
            |i| -> Result<std::result::Result<usize, Error>> {
                let array = value.as_array().ok_or_else(|| value.mismatch(Family::Array))?;
                Ok(find_array_element(&array, i)?.ok_or(Error::IndexOutOfRange {
                    index: i,
                    len: array.len(),
                }))
            },
            |key| -> Result<std::result::Result<usize, Error>> {
                let map = value.as_map().ok_or_else(|| value.mismatch(Family::Map))?;
                Ok(find_map_entry(&map, key.as_bytes())?.ok_or(Error::KeyNotFound))
            },
        )
    }

    /// Looks up a key (current value must be a map) or an index (current value
    /// must be an array).
    ///
    /// Returns `Ok(None)` when the key or index is absent.
    ///
    /// # Errors
    ///
    /// - [`Error::TypeMismatch`] if the current value is not the right container
    /// - [`Error::Truncated`] / [`Error::InvalidFormat`] on malformed input
    pub fn get<I: Index>(&self, index: I) -> Result<Option<Value<'a>>> {
        match self.locate(&index)? {
            Ok(offset) => Ok(Some(decode_value(self.buf, offset)?.1)),
            Err(_) => Ok(None),
        }
    }

    /// Strict lookup: like [`get`](Self::get), but absence is an error.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`get`](Self::get):
    /// - [`Error::KeyNotFound`] if the map has no such top-level key
    /// - [`Error::IndexOutOfRange`] if the index is not less than the array length
    pub fn at<I: Index>(&self, index: I) -> Result<Value<'a>> {
        let offset = self.locate(&index)??;
        Ok(decode_value(self.buf, offset)?.1)
    }

    /// Returns a view positioned at the entry for `index`, for chained lookups.
    pub fn child<I: Index>(&self, index: I) -> Result<Option<Msgpack<'a>>> {
        Ok(self
            .locate(&index)?
            .ok()
            .map(|offset| Msgpack::at_offset(self.buf, offset)))
    }

    /// Looks up `index` and returns its string.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the entry is not a string,
    /// [`Error::InvalidUtf8`] if it is not valid UTF-8.
    pub fn as_string<I: Index>(&self, index: I) -> Result<Option<&'a str>> {
        match self.get(index)? {
            Some(Value::Str(value)) => value.to_str().map(Some),
            Some(other) => Err(other.mismatch(Family::Str)),
            None => Ok(None),
        }
    }

    /// Looks up `index` and returns it as a signed integer.
    ///
    /// Unsigned values are accepted when they fit in `i64`.
    pub fn as_int<I: Index>(&self, index: I) -> Result<Option<i64>> {
        match self.get(index)? {
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| value.mismatch(Family::Int)),
            None => Ok(None),
        }
    }

    /// Looks up `index` and returns it as an unsigned integer.
    ///
    /// Signed values are accepted when they are not negative.
    pub fn as_uint<I: Index>(&self, index: I) -> Result<Option<u64>> {
        match self.get(index)? {
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| value.mismatch(Family::UInt)),
            None => Ok(None),
        }
    }

    pub fn as_float<I: Index>(&self, index: I) -> Result<Option<f64>> {
        match self.get(index)? {
            Some(Value::Float(value)) => Ok(Some(value)),
            Some(other) => Err(other.mismatch(Family::Float)),
            None => Ok(None),
        }
    }

    pub fn as_bool<I: Index>(&self, index: I) -> Result<Option<bool>> {
        match self.get(index)? {
            Some(Value::Bool(value)) => Ok(Some(value)),
            Some(other) => Err(other.mismatch(Family::Bool)),
            None => Ok(None),
        }
    }

    /// `Some(())` if the entry exists and is nil.
    pub fn as_nil<I: Index>(&self, index: I) -> Result<Option<()>> {
        match self.get(index)? {
            Some(Value::Nil) => Ok(Some(())),
            Some(other) => Err(other.mismatch(Family::Nil)),
            None => Ok(None),
        }
    }

    pub fn as_map<I: Index>(&self, index: I) -> Result<Option<MapView<'a>>> {
        match self.get(index)? {
            Some(Value::Map(value)) => Ok(Some(value)),
            Some(other) => Err(other.mismatch(Family::Map)),
            None => Ok(None),
        }
    }

    pub fn as_array<I: Index>(&self, index: I) -> Result<Option<ArrayView<'a>>> {
        match self.get(index)? {
            Some(Value::Array(value)) => Ok(Some(value)),
            Some(other) => Err(other.mismatch(Family::Array)),
            None => Ok(None),
        }
    }

    /// Looks up `index` and returns its binary payload, borrowed from the buffer.
    pub fn as_binary<I: Index>(&self, index: I) -> Result<Option<&'a [u8]>> {
        match self.get(index)? {
            Some(Value::Bin(value)) => Ok(Some(value.as_bytes())),
            Some(other) => Err(other.mismatch(Family::Bin)),
            None => Ok(None),
        }
    }

    pub fn as_ext<I: Index>(&self, index: I) -> Result<Option<ExtView<'a>>> {
        match self.get(index)? {
            Some(Value::Ext(value)) => Ok(Some(value)),
            Some(other) => Err(other.mismatch(Family::Ext)),
            None => Ok(None),
        }
    }
}

impl<'a> From<&'a [u8]> for Msgpack<'a> {
    #[inline]
    fn from(source: &'a [u8]) -> Self {
        Msgpack::new(source)
    }
}

impl<'a> From<&'a Vec<u8>> for Msgpack<'a> {
    #[inline]
    fn from(source: &'a Vec<u8>) -> Self {
        Msgpack::new(source)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Msgpack<'a> {
    #[inline]
    fn from(source: &'a [u8; N]) -> Self {
        Msgpack::new(source)
    }
}

impl<'a> From<&'a [i8]> for Msgpack<'a> {
    #[inline]
    fn from(source: &'a [i8]) -> Self {
        Msgpack::from_signed(source)
    }
}
