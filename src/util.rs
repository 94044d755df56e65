use zerocopy::byteorder::{BigEndian, F32, F64, I16, I32, I64, U16, U32, U64};

use crate::{Error, Result};

#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

/// Returns `len` bytes starting at `offset`, or [`Error::Truncated`] if the
/// range runs past the end of `buf`.
#[inline]
pub(crate) fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    match offset.checked_add(len) {
        Some(end) if end <= buf.len() => Ok(&buf[offset..end]),
        _ => {
            cold_path();
            Err(Error::Truncated {
                offset,
                needed: len,
                len: buf.len(),
            })
        }
    }
}

#[inline]
fn array_at<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice_at(buf, offset, N)?);
    Ok(out)
}

#[inline]
pub(crate) fn read_u8(buf: &[u8], offset: usize) -> Result<u8> {
    match buf.get(offset) {
        Some(byte) => Ok(*byte),
        None => {
            cold_path();
            Err(Error::Truncated {
                offset,
                needed: 1,
                len: buf.len(),
            })
        }
    }
}

#[inline]
pub(crate) fn read_i8(buf: &[u8], offset: usize) -> Result<i8> {
    Ok(read_u8(buf, offset)? as i8)
}

#[inline]
pub(crate) fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    Ok(U16::<BigEndian>::from_bytes(array_at(buf, offset)?).get())
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(U32::<BigEndian>::from_bytes(array_at(buf, offset)?).get())
}

#[inline]
pub(crate) fn read_u64(buf: &[u8], offset: usize) -> Result<u64> {
    Ok(U64::<BigEndian>::from_bytes(array_at(buf, offset)?).get())
}

#[inline]
pub(crate) fn read_i16(buf: &[u8], offset: usize) -> Result<i16> {
    Ok(I16::<BigEndian>::from_bytes(array_at(buf, offset)?).get())
}

#[inline]
pub(crate) fn read_i32(buf: &[u8], offset: usize) -> Result<i32> {
    Ok(I32::<BigEndian>::from_bytes(array_at(buf, offset)?).get())
}

#[inline]
pub(crate) fn read_i64(buf: &[u8], offset: usize) -> Result<i64> {
    Ok(I64::<BigEndian>::from_bytes(array_at(buf, offset)?).get())
}

#[inline]
pub(crate) fn read_f32(buf: &[u8], offset: usize) -> Result<f32> {
    Ok(F32::<BigEndian>::from_bytes(array_at(buf, offset)?).get())
}

#[inline]
pub(crate) fn read_f64(buf: &[u8], offset: usize) -> Result<f64> {
    Ok(F64::<BigEndian>::from_bytes(array_at(buf, offset)?).get())
}

/// Reads an unsigned big-endian length or count field of `width` bytes (1, 2 or 4).
#[inline]
pub(crate) fn read_len(buf: &[u8], offset: usize, width: usize) -> Result<usize> {
    Ok(match width {
        1 => read_u8(buf, offset)? as usize,
        2 => read_u16(buf, offset)? as usize,
        _ => read_u32(buf, offset)? as usize,
    })
}
