use crate::{
    Error, Format, Result, cold_path,
    util::{read_len, read_u8, slice_at},
};

/// Returns the total number of bytes occupied by the value at `offset`,
/// including every nested element, without materializing it.
///
/// Containers are walked in encoding order with a counter of elements still
/// owed: an array adds its element count, a map twice its pair count. Nesting
/// therefore costs no stack depth.
///
/// # Errors
///
/// - [`Error::Truncated`] if any header or payload runs past the end of `buf`
/// - [`Error::InvalidFormat`] if a reserved `0xc1` tag is met
///
/// # Example
///
/// ```
/// use msgpack_view::skip_value;
///
/// // {"a": [1, 2]}
/// let data = [0x81, 0xa1, b'a', 0x92, 0x01, 0x02];
/// assert_eq!(skip_value(&data, 0).unwrap(), 6);
/// assert_eq!(skip_value(&data, 3).unwrap(), 3);
/// ```
pub fn skip_value(buf: &[u8], offset: usize) -> Result<usize> {
    skip_elements(buf, offset, 1)
}

/// Skips `count` consecutive values starting at `offset` and returns the
/// number of bytes they occupy.
pub(crate) fn skip_elements(buf: &[u8], offset: usize, count: u64) -> Result<usize> {
    let mut pos = offset;
    let mut remaining = count;

    while remaining > 0 {
        remaining -= 1;

        let format = Format::from_byte(read_u8(buf, pos)?);
        let advance = match format {
            Format::NeverUsed => {
                cold_path();
                return Err(Error::InvalidFormat(0xc1));
            }
            Format::FixArray(count) => {
                remaining = remaining.saturating_add(count as u64);
                1
            }
            Format::FixMap(count) => {
                remaining = remaining.saturating_add(2 * count as u64);
                1
            }
            Format::Array16 | Format::Array32 => {
                let count = read_len(buf, pos + 1, format.length_field_width())? as u64;
                remaining = remaining.saturating_add(count);
                format.header_len()
            }
            Format::Map16 | Format::Map32 => {
                let count = read_len(buf, pos + 1, format.length_field_width())? as u64;
                remaining = remaining.saturating_add(2 * count);
                format.header_len()
            }
            Format::FixStr(len) => 1 + len as usize,
            Format::Str8
            | Format::Str16
            | Format::Str32
            | Format::Bin8
            | Format::Bin16
            | Format::Bin32
            | Format::Ext8
            | Format::Ext16
            | Format::Ext32 => {
                let len = read_len(buf, pos + 1, format.length_field_width())?;
                match format.header_len().checked_add(len) {
                    Some(advance) => advance,
                    None => {
                        cold_path();
                        return Err(Error::Truncated {
                            offset: pos,
                            needed: usize::MAX,
                            len: buf.len(),
                        });
                    }
                }
            }
            _ => match format.fixed_len() {
                Some(len) => len,
                None => {
                    cold_path();
                    return Err(Error::InvalidFormat(buf[pos]));
                }
            },
        };

        slice_at(buf, pos, advance)?;
        pos += advance;
    }

    Ok(pos - offset)
}
