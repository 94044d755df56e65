use crate::{
    ArrayView, Family, Format, MapView, Result, cold_path, decode_value, skip::skip_elements,
    skip_value, util::read_u8,
};

/// Scans the top-level pairs of `map` for a string key equal to `key` and
/// returns the offset of its value.
///
/// Keys are compared byte for byte. Pairs with non-string keys are skipped
/// whole, and nested containers are never searched. The first match wins.
///
/// # Example
///
/// ```
/// use msgpack_view::{Value, decode_value, find_map_entry};
///
/// // {"a": 1, "b": 2}
/// let data = [0x82, 0xa1, b'a', 0x01, 0xa1, b'b', 0x02];
/// let (_, Value::Map(map)) = decode_value(&data, 0).unwrap() else { unreachable!() };
/// assert_eq!(find_map_entry(&map, b"b").unwrap(), Some(6));
/// assert_eq!(find_map_entry(&map, b"c").unwrap(), None);
/// ```
pub fn find_map_entry(map: &MapView<'_>, key: &[u8]) -> Result<Option<usize>> {
    let buf = map.buf;
    let mut offset = map.offset;

    for _ in 0..map.count {
        let format = Format::from_byte(read_u8(buf, offset)?);

        if format.family() == Some(Family::Str) {
            let (key_len, candidate) = decode_value(buf, offset)?;
            offset += key_len;

            if candidate.as_str_view().map(|s| s.as_bytes()) == Some(key) {
                return Ok(Some(offset));
            }

            offset += skip_value(buf, offset)?;
        } else {
            cold_path();
            offset += skip_elements(buf, offset, 2)?;
        }
    }

    Ok(None)
}

/// Returns the offset of element `index` of `array`, or `None` when `index` is
/// not less than the element count.
///
/// ```
/// use msgpack_view::{Value, decode_value, find_array_element};
///
/// let data = [0x93, 0x01, 0xcc, 0xff, 0x03];
/// let (_, Value::Array(array)) = decode_value(&data, 0).unwrap() else { unreachable!() };
/// assert_eq!(find_array_element(&array, 2).unwrap(), Some(4));
/// assert_eq!(find_array_element(&array, 3).unwrap(), None);
/// ```
pub fn find_array_element(array: &ArrayView<'_>, index: usize) -> Result<Option<usize>> {
    if index >= array.count {
        cold_path();
        return Ok(None);
    }

    let skipped = skip_elements(array.buf, array.offset, index as u64)?;
    Ok(Some(array.offset + skipped))
}
