//! NUL-terminated byte string primitives.
//!
//! These operate on caller-owned buffers. A buffer without a NUL is treated
//! as terminated at its end, so nothing here reads past a slice. Copy and
//! concatenate report [`FmtError::BufferCapacity`] instead of overrunning.

use core::cmp::Ordering;

use crate::error::{FmtError, FmtResult};
use crate::memory::copy_bytes;

/// Length of the string in `buf`, up to the first NUL (or the slice end).
#[inline]
pub fn str_len(buf: &[u8]) -> usize {
    buf.iter().position(|&b| b == 0).unwrap_or(buf.len())
}

/// Lexicographic byte comparison of two NUL-terminated strings.
///
/// Bytes compare as unsigned, and a shorter string precedes any string it
/// is a prefix of.
pub fn str_cmp(lhs: &[u8], rhs: &[u8]) -> Ordering {
    let lhs = &lhs[..str_len(lhs)];
    let rhs = &rhs[..str_len(rhs)];
    lhs.cmp(rhs)
}

/// Copy the string in `src` (with its terminator) into `dst`.
///
/// Returns the copied length, excluding the terminator.
pub fn str_copy(dst: &mut [u8], src: &[u8]) -> FmtResult<usize> {
    let len = str_len(src);
    if len >= dst.len() {
        return Err(FmtError::BufferCapacity);
    }
    copy_bytes(dst, &src[..len])?;
    dst[len] = 0;
    Ok(len)
}

/// Append the string in `src` to the string already in `dst`.
///
/// Returns the new length of `dst`, excluding the terminator. On failure
/// `dst` is left unchanged.
pub fn str_cat(dst: &mut [u8], src: &[u8]) -> FmtResult<usize> {
    let start = str_len(dst);
    if start == dst.len() {
        return Err(FmtError::InvalidParameter);
    }
    let added = str_copy(&mut dst[start..], src)?;
    Ok(start + added)
}

/// Parse an optionally negative decimal integer from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. Parsing stops at the
/// first non-digit; if no digit was seen the result is `(0, 0)`, so a lone
/// `-` consumes nothing. Values past the `i64` range saturate.
pub fn atoi(bytes: &[u8]) -> (i64, usize) {
    let mut pos = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        pos = 1;
    }

    let digits_start = pos;
    let mut value: i64 = 0;
    while let Some(&b) = bytes.get(pos) {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = (b - b'0') as i64;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
        pos += 1;
    }

    if pos == digits_start {
        return (0, 0);
    }
    (value, pos)
}

/// Extract a NUL-padded byte array as a `&str`.
///
/// Scans for the first NUL byte (or end of slice) and interprets the
/// prefix as UTF-8. Returns `"<invalid>"` if the bytes are not valid
/// UTF-8, or `""` if the buffer starts with NUL / is empty.
#[inline]
pub fn bytes_as_str(buf: &[u8]) -> &str {
    core::str::from_utf8(&buf[..str_len(buf)]).unwrap_or("<invalid>")
}
