//! Base-N integer to text.

use super::NumFlags;
use crate::error::{FmtError, FmtResult};

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Longest digit run: `u64::MAX` in base 2.
const MAX_DIGITS: usize = 64;

/// How an integer is rendered: base 2..=16, letter case, minimum digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntAttr {
    pub base: u8,
    pub flags: NumFlags,
    /// Minimum digit count; shorter runs are left-padded with `'0'`.
    pub precision: Option<usize>,
}

impl IntAttr {
    pub const DECIMAL: Self = Self::new(10);

    #[inline]
    pub const fn new(base: u8) -> Self {
        Self {
            base,
            flags: NumFlags::empty(),
            precision: None,
        }
    }

    #[inline]
    pub const fn upper(mut self, upper: bool) -> Self {
        self.flags = if upper {
            self.flags.union(NumFlags::UPPER_CASE)
        } else {
            self.flags.difference(NumFlags::UPPER_CASE)
        };
        self
    }

    #[inline]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}

/// Format an unsigned value into `buf`, NUL-terminated.
///
/// Returns the number of digits written (the terminator is not counted).
/// Fails with [`FmtError::InvalidParameter`] for a base outside 2..=16 and
/// with [`FmtError::BufferCapacity`] when digits plus terminator do not fit.
pub fn fmt_u64(value: u64, attr: &IntAttr, buf: &mut [u8]) -> FmtResult<usize> {
    if !(2..=16).contains(&attr.base) {
        return Err(FmtError::InvalidParameter);
    }
    let table = if attr.flags.contains(NumFlags::UPPER_CASE) {
        UPPER_DIGITS
    } else {
        LOWER_DIGITS
    };
    let base = attr.base as u64;

    // Least significant first; reversed on the way out.
    let mut rev = [0u8; MAX_DIGITS];
    let mut count = 0;
    let mut n = value;
    loop {
        rev[count] = table[(n % base) as usize];
        count += 1;
        n /= base;
        if n == 0 {
            break;
        }
    }

    let width = attr.precision.map_or(count, |p| p.max(count));
    if width >= buf.len() {
        return Err(FmtError::BufferCapacity);
    }

    let zeros = width - count;
    buf[..zeros].fill(b'0');
    for (dst, &digit) in buf[zeros..width].iter_mut().zip(rev[..count].iter().rev()) {
        *dst = digit;
    }
    buf[width] = 0;
    Ok(width)
}

/// Format a signed value into `buf`, NUL-terminated.
///
/// Negative values get a leading `'-'`; the magnitude is taken without
/// overflow, so `i64::MIN` is fine. Returns the characters written
/// including the sign. Precision applies to the digits only.
pub fn fmt_i64(value: i64, attr: &IntAttr, buf: &mut [u8]) -> FmtResult<usize> {
    if value >= 0 {
        return fmt_u64(value as u64, attr, buf);
    }
    let (sign, rest) = buf.split_first_mut().ok_or(FmtError::BufferCapacity)?;
    let digits = fmt_u64(value.unsigned_abs(), attr, rest)?;
    *sign = b'-';
    Ok(digits + 1)
}

/// Format a `u32` as decimal. Convenience wrapper around [`fmt_u64`].
#[inline]
pub fn fmt_u32(value: u32, buf: &mut [u8]) -> FmtResult<usize> {
    fmt_u64(value as u64, &IntAttr::DECIMAL, buf)
}
