use bytes::Bytes;

use crate::{Index, Msgpack, Result, Value, skip_value};

/// A MessagePack view that shares ownership of its buffer.
///
/// Cloning is cheap (a reference-count bump on the [`Bytes`]), and the view is
/// `'static + Send + Sync`, so it can be handed to other threads or stored
/// without borrowing the caller's buffer. Lookups go through
/// [`view`](Self::view), which borrows the shared bytes as a [`Msgpack`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharedMsgpack {
    source: Bytes,
    offset: usize,
}

/// Wraps `source` in a [`SharedMsgpack`] after checking that it starts with
/// one complete value.
///
/// # Errors
///
/// Returns [`Error::Truncated`](crate::Error::Truncated) or
/// [`Error::InvalidFormat`](crate::Error::InvalidFormat) if the root value is
/// malformed. Bytes after the root value are allowed.
pub fn read_shared(source: Bytes) -> Result<SharedMsgpack> {
    skip_value(&source, 0)?;
    Ok(SharedMsgpack { source, offset: 0 })
}

impl SharedMsgpack {
    /// Wraps `source` without validating it; errors surface on lookup.
    #[inline]
    pub fn new(source: Bytes) -> Self {
        Self { source, offset: 0 }
    }

    /// Borrows the shared buffer as a [`Msgpack`] positioned at this value.
    #[inline]
    pub fn view(&self) -> Msgpack<'_> {
        Msgpack::at_offset(&self.source, self.offset)
    }

    /// The whole shared buffer.
    #[inline]
    pub fn source(&self) -> &Bytes {
        &self.source
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn value(&self) -> Result<Value<'_>> {
        self.view().value()
    }

    /// See [`Msgpack::get`].
    #[inline]
    pub fn get<I: Index>(&self, index: I) -> Result<Option<Value<'_>>> {
        self.view().get(index)
    }

    /// See [`Msgpack::at`].
    #[inline]
    pub fn at<I: Index>(&self, index: I) -> Result<Value<'_>> {
        self.view().at(index)
    }

    /// Returns an owned view positioned at the entry for `index`. The buffer is
    /// shared, not copied.
    pub fn child<I: Index>(&self, index: I) -> Result<Option<SharedMsgpack>> {
        Ok(self.view().child(index)?.map(|child| SharedMsgpack {
            source: self.source.clone(),
            offset: child.offset(),
        }))
    }

    /// The encoded bytes of this value as a [`Bytes`] slice of the shared
    /// buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let len = self.view().encoded_len()?;
        Ok(self.source.slice(self.offset..self.offset + len))
    }
}

impl From<Bytes> for SharedMsgpack {
    #[inline]
    fn from(source: Bytes) -> Self {
        SharedMsgpack::new(source)
    }
}

impl From<Vec<u8>> for SharedMsgpack {
    #[inline]
    fn from(source: Vec<u8>) -> Self {
        SharedMsgpack::new(Bytes::from(source))
    }
}
