//! Tag byte classification.
//!
//! Every MessagePack value starts with a 1-byte tag. The tag alone determines the
//! encoded type, the width of any length/count field that follows it and, for the
//! compact encodings, the value or count itself.

/// The kind of [`Value`](crate::Value) a tag decodes to.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Family {
    Nil,
    Bool,
    UInt,
    Int,
    Float,
    Str,
    Bin,
    Array,
    Map,
    Ext,
}

impl Family {
    /// Get the family name as a string (for error messages).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Family::Nil => "nil",
            Family::Bool => "bool",
            Family::UInt => "uint",
            Family::Int => "int",
            Family::Float => "float",
            Family::Str => "str",
            Family::Bin => "bin",
            Family::Array => "array",
            Family::Map => "map",
            Family::Ext => "ext",
        }
    }

    /// Returns `true` for the families whose values carry nested values.
    ///
    /// ```
    /// use msgpack_view::Family;
    ///
    /// assert!(Family::Map.is_container());
    /// assert!(Family::Array.is_container());
    /// assert!(!Family::Str.is_container());
    /// ```
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Family::Array | Family::Map)
    }
}

/// A classified tag byte.
///
/// The compact encodings keep the value or count carried in the tag's low bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Format {
    PositiveFixInt(u8),
    NegativeFixInt(i8),
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Nil,
    /// `0xc1`, reserved by the format and never emitted by encoders.
    NeverUsed,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Ext8,
    Ext16,
    Ext32,
    Float32,
    Float64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    FixExt1,
    FixExt2,
    FixExt4,
    FixExt8,
    FixExt16,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
}

impl Format {
    /// Classifies a tag byte. The mapping is total.
    ///
    /// # Example
    ///
    /// ```
    /// use msgpack_view::Format;
    ///
    /// assert_eq!(Format::from_byte(0x7f), Format::PositiveFixInt(127));
    /// assert_eq!(Format::from_byte(0xff), Format::NegativeFixInt(-1));
    /// assert_eq!(Format::from_byte(0x83), Format::FixMap(3));
    /// assert_eq!(Format::from_byte(0xdf), Format::Map32);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0x00..=0x7f => Format::PositiveFixInt(byte),
            0x80..=0x8f => Format::FixMap(byte & 0x0f),
            0x90..=0x9f => Format::FixArray(byte & 0x0f),
            0xa0..=0xbf => Format::FixStr(byte & 0x1f),
            0xc0 => Format::Nil,
            0xc1 => Format::NeverUsed,
            0xc2 => Format::False,
            0xc3 => Format::True,
            0xc4 => Format::Bin8,
            0xc5 => Format::Bin16,
            0xc6 => Format::Bin32,
            0xc7 => Format::Ext8,
            0xc8 => Format::Ext16,
            0xc9 => Format::Ext32,
            0xca => Format::Float32,
            0xcb => Format::Float64,
            0xcc => Format::UInt8,
            0xcd => Format::UInt16,
            0xce => Format::UInt32,
            0xcf => Format::UInt64,
            0xd0 => Format::Int8,
            0xd1 => Format::Int16,
            0xd2 => Format::Int32,
            0xd3 => Format::Int64,
            0xd4 => Format::FixExt1,
            0xd5 => Format::FixExt2,
            0xd6 => Format::FixExt4,
            0xd7 => Format::FixExt8,
            0xd8 => Format::FixExt16,
            0xd9 => Format::Str8,
            0xda => Format::Str16,
            0xdb => Format::Str32,
            0xdc => Format::Array16,
            0xdd => Format::Array32,
            0xde => Format::Map16,
            0xdf => Format::Map32,
            // Sign-extend the low 5 bits: 0xe0 is -32, 0xff is -1.
            0xe0..=0xff => Format::NegativeFixInt(((byte & 0x1f) as i8) - 32),
        }
    }

    /// Get the family this format decodes to, or `None` for [`Format::NeverUsed`].
    #[must_use]
    pub const fn family(self) -> Option<Family> {
        Some(match self {
            Format::Nil => Family::Nil,
            Format::False | Format::True => Family::Bool,
            Format::PositiveFixInt(_)
            | Format::UInt8
            | Format::UInt16
            | Format::UInt32
            | Format::UInt64 => Family::UInt,
            Format::NegativeFixInt(_)
            | Format::Int8
            | Format::Int16
            | Format::Int32
            | Format::Int64 => Family::Int,
            Format::Float32 | Format::Float64 => Family::Float,
            Format::FixStr(_) | Format::Str8 | Format::Str16 | Format::Str32 => Family::Str,
            Format::Bin8 | Format::Bin16 | Format::Bin32 => Family::Bin,
            Format::FixArray(_) | Format::Array16 | Format::Array32 => Family::Array,
            Format::FixMap(_) | Format::Map16 | Format::Map32 => Family::Map,
            Format::Ext8
            | Format::Ext16
            | Format::Ext32
            | Format::FixExt1
            | Format::FixExt2
            | Format::FixExt4
            | Format::FixExt8
            | Format::FixExt16 => Family::Ext,
            Format::NeverUsed => return None,
        })
    }

    /// Number of header bytes: the tag plus any length, count or ext type field.
    ///
    /// For scalars with a fixed payload this excludes the payload; see
    /// [`fixed_len`](Self::fixed_len) for their total size.
    #[must_use]
    pub const fn header_len(self) -> usize {
        match self {
            Format::Bin8 | Format::Str8 => 2,
            Format::Bin16 | Format::Str16 | Format::Array16 | Format::Map16 => 3,
            Format::Bin32 | Format::Str32 | Format::Array32 | Format::Map32 => 5,
            Format::Ext8 => 3,
            Format::Ext16 => 4,
            Format::Ext32 => 6,
            Format::FixExt1
            | Format::FixExt2
            | Format::FixExt4
            | Format::FixExt8
            | Format::FixExt16 => 2,
            _ => 1,
        }
    }

    /// Width in bytes of the big-endian length/count field following the tag,
    /// or 0 when the length is carried in the tag or fixed by the format.
    #[must_use]
    pub const fn length_field_width(self) -> usize {
        match self {
            Format::Bin8 | Format::Ext8 | Format::Str8 => 1,
            Format::Bin16 | Format::Ext16 | Format::Str16 | Format::Array16 | Format::Map16 => 2,
            Format::Bin32 | Format::Ext32 | Format::Str32 | Format::Array32 | Format::Map32 => 4,
            _ => 0,
        }
    }

    /// Total encoded length for formats whose size is known from the tag alone:
    /// nil, booleans, integers, floats and fixext. Strings, binaries, ext8/16/32
    /// and containers return `None`.
    ///
    /// ```
    /// use msgpack_view::Format;
    ///
    /// assert_eq!(Format::UInt64.fixed_len(), Some(9));
    /// assert_eq!(Format::FixExt16.fixed_len(), Some(18));
    /// assert_eq!(Format::Str8.fixed_len(), None);
    /// ```
    #[must_use]
    pub const fn fixed_len(self) -> Option<usize> {
        Some(match self {
            Format::PositiveFixInt(_)
            | Format::NegativeFixInt(_)
            | Format::Nil
            | Format::False
            | Format::True => 1,
            Format::UInt8 | Format::Int8 => 2,
            Format::UInt16 | Format::Int16 => 3,
            Format::UInt32 | Format::Int32 | Format::Float32 => 5,
            Format::UInt64 | Format::Int64 | Format::Float64 => 9,
            Format::FixExt1 => 3,
            Format::FixExt2 => 4,
            Format::FixExt4 => 6,
            Format::FixExt8 => 10,
            Format::FixExt16 => 18,
            _ => return None,
        })
    }

    /// Payload size of the fixext formats.
    #[must_use]
    pub const fn fixext_payload_len(self) -> Option<usize> {
        match self {
            Format::FixExt1 => Some(1),
            Format::FixExt2 => Some(2),
            Format::FixExt4 => Some(4),
            Format::FixExt8 => Some(8),
            Format::FixExt16 => Some(16),
            _ => None,
        }
    }

    /// Returns `true` if the tag itself carries the count or length.
    #[must_use]
    pub const fn is_fix(self) -> bool {
        matches!(
            self,
            Format::PositiveFixInt(_)
                | Format::NegativeFixInt(_)
                | Format::FixMap(_)
                | Format::FixArray(_)
                | Format::FixStr(_)
        )
    }
}
