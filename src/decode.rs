use crate::{
    ArrayView, BinView, Error, ExtView, Format, MapView, Result, StrView, Value, cold_path,
    skip::skip_elements,
    util::{
        read_f32, read_f64, read_i8, read_i16, read_i32, read_i64, read_len, read_u8, read_u16,
        read_u32, read_u64, slice_at,
    },
};

/// Decodes the value at `offset` and returns the number of bytes it occupies
/// together with a typed [`Value`].
///
/// Scalars are copied. Strings, binaries and extensions become views over
/// their payload. Arrays and maps become views over their body, whose byte
/// length is found by skipping every element once, since container headers
/// carry only a count.
///
/// # Errors
///
/// - [`Error::Truncated`] if the header, payload or any nested element runs
///   past the end of `buf`
/// - [`Error::InvalidFormat`] if a reserved `0xc1` tag is met
///
/// # Example
///
/// ```
/// use msgpack_view::{Value, decode_value};
///
/// let (consumed, value) = decode_value(&[0xcd, 0x12, 0x34], 0).unwrap();
/// assert_eq!(consumed, 3);
/// assert_eq!(value, Value::UInt(0x1234));
/// ```
pub fn decode_value(buf: &[u8], offset: usize) -> Result<(usize, Value<'_>)> {
    let tag = read_u8(buf, offset)?;
    let format = Format::from_byte(tag);
    let at = offset + 1;

    macro_rules! str_or_bin {
        ($variant:ident, $view:ident, $len:expr) => {{
            let header = format.header_len();
            let len = $len;
            slice_at(buf, offset + header, len)?;
            (
                header + len,
                Value::$variant($view {
                    buf,
                    offset: offset + header,
                    len,
                }),
            )
        }};
    }

    macro_rules! container {
        ($variant:ident, $view:ident, $count:expr, $per_entry:literal) => {{
            let header = format.header_len();
            let count = $count;
            let body_len = skip_elements(buf, offset + header, count as u64 * $per_entry)?;
            (
                header + body_len,
                Value::$variant($view {
                    buf,
                    offset: offset + header,
                    count,
                    body_len,
                }),
            )
        }};
    }

    let decoded = match format {
        Format::PositiveFixInt(value) => (1, Value::UInt(value as u64)),
        Format::NegativeFixInt(value) => (1, Value::Int(value as i64)),
        Format::Nil => (1, Value::Nil),
        Format::False => (1, Value::Bool(false)),
        Format::True => (1, Value::Bool(true)),
        Format::NeverUsed => {
            cold_path();
            return Err(Error::InvalidFormat(tag));
        }

        Format::UInt8 => (2, Value::UInt(read_u8(buf, at)? as u64)),
        Format::UInt16 => (3, Value::UInt(read_u16(buf, at)? as u64)),
        Format::UInt32 => (5, Value::UInt(read_u32(buf, at)? as u64)),
        Format::UInt64 => (9, Value::UInt(read_u64(buf, at)?)),
        Format::Int8 => (2, Value::Int(read_i8(buf, at)? as i64)),
        Format::Int16 => (3, Value::Int(read_i16(buf, at)? as i64)),
        Format::Int32 => (5, Value::Int(read_i32(buf, at)? as i64)),
        Format::Int64 => (9, Value::Int(read_i64(buf, at)?)),
        Format::Float32 => (5, Value::Float(read_f32(buf, at)? as f64)),
        Format::Float64 => (9, Value::Float(read_f64(buf, at)?)),

        Format::FixStr(len) => str_or_bin!(Str, StrView, len as usize),
        Format::Str8 | Format::Str16 | Format::Str32 => {
            str_or_bin!(Str, StrView, read_len(buf, at, format.length_field_width())?)
        }
        Format::Bin8 | Format::Bin16 | Format::Bin32 => {
            str_or_bin!(Bin, BinView, read_len(buf, at, format.length_field_width())?)
        }

        Format::FixExt1
        | Format::FixExt2
        | Format::FixExt4
        | Format::FixExt8
        | Format::FixExt16 => {
            let len = format.fixext_payload_len().unwrap_or_default();
            decode_ext(buf, offset, format, len)?
        }
        Format::Ext8 | Format::Ext16 | Format::Ext32 => {
            let len = read_len(buf, at, format.length_field_width())?;
            decode_ext(buf, offset, format, len)?
        }

        Format::FixArray(count) => container!(Array, ArrayView, count as usize, 1),
        Format::Array16 | Format::Array32 => container!(
            Array,
            ArrayView,
            read_len(buf, at, format.length_field_width())?,
            1
        ),
        Format::FixMap(count) => container!(Map, MapView, count as usize, 2),
        Format::Map16 | Format::Map32 => container!(
            Map,
            MapView,
            read_len(buf, at, format.length_field_width())?,
            2
        ),
    };

    Ok(decoded)
}

/// Ext headers put the type code right before the payload.
fn decode_ext(buf: &[u8], offset: usize, format: Format, len: usize) -> Result<(usize, Value<'_>)> {
    let header = format.header_len();
    let type_code = read_i8(buf, offset + header - 1)?;
    slice_at(buf, offset + header, len)?;
    Ok((
        header + len,
        Value::Ext(ExtView {
            buf,
            type_code,
            offset: offset + header,
            len,
        }),
    ))
}
