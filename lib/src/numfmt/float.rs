//! Fixed and general notation for `f32`/`f64`.
//!
//! Digits come from the exact binary value: the float is split into
//! mantissa and exponent, and both the integer and the fractional part are
//! expanded with [`Big`]. Rounding inspects the first dropped digit only:
//! above 5 rounds up, below 5 truncates, exactly 5 rounds the last kept
//! digit to even.

use super::NumFlags;
use super::bignum::Big;
use crate::error::{FmtError, FmtResult};
use crate::memory::move_within;

/// Decimal digits in the integer part of `f64::MAX`, rounded up.
const INT_DIGITS_MAX: usize = 320;
const CHUNK: u32 = 1_000_000_000;
const CHUNK_DIGITS: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatMode {
    /// Exactly `precision` fractional digits.
    Fixed,
    /// At most `precision` fractional digits; trailing zeros dropped.
    General,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloatAttr {
    pub precision: usize,
    pub mode: FloatMode,
    pub flags: NumFlags,
}

impl FloatAttr {
    #[inline]
    pub const fn fixed(precision: usize) -> Self {
        Self {
            precision,
            mode: FloatMode::Fixed,
            flags: NumFlags::empty(),
        }
    }

    #[inline]
    pub const fn general(precision: usize) -> Self {
        Self {
            precision,
            mode: FloatMode::General,
            flags: NumFlags::empty(),
        }
    }

    #[inline]
    pub const fn with_flags(mut self, flags: NumFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }
}

/// Layout of a magnitude written by [`fmt_f64_parts`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloatText {
    /// A `'-'` belongs in front of the text.
    pub negative: bool,
    /// False for `inf`/`nan`.
    pub finite: bool,
    pub len: usize,
}

/// Whether `value` renders with a minus sign under `flags`.
///
/// Zero only counts as negative when [`NumFlags::SIGNED_ZERO`] is set; a
/// NaN follows its sign bit.
#[inline]
pub fn float_is_negative(value: f64, flags: NumFlags) -> bool {
    value.is_sign_negative() && (value != 0.0 || flags.contains(NumFlags::SIGNED_ZERO))
}

struct Cursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Cursor<'_> {
    #[inline]
    fn push(&mut self, byte: u8) -> FmtResult {
        let slot = self.buf.get_mut(self.pos).ok_or(FmtError::BufferCapacity)?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    fn extend(&mut self, bytes: &[u8]) -> FmtResult {
        let end = self.pos + bytes.len();
        let dst = self.buf.get_mut(self.pos..end).ok_or(FmtError::BufferCapacity)?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

fn decompose(value: f64) -> (u64, i32) {
    let bits = value.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    }
}

fn write_integer(int_part: &mut Big, out: &mut Cursor<'_>) -> FmtResult {
    if int_part.is_zero() {
        return out.push(b'0');
    }

    let mut scratch = [0u8; INT_DIGITS_MAX];
    let mut start = scratch.len();
    loop {
        let mut chunk = int_part.divrem_small(CHUNK);
        let last = int_part.is_zero();
        let mut emitted = 0;
        loop {
            // Inner chunks are zero-padded to nine digits, the leading one is not.
            let done = if last { chunk == 0 } else { emitted == CHUNK_DIGITS };
            if done {
                break;
            }
            start -= 1;
            scratch[start] = b'0' + (chunk % 10) as u8;
            chunk /= 10;
            emitted += 1;
        }
        if last {
            break;
        }
    }
    out.extend(&scratch[start..])
}

#[inline]
fn next_fraction_digit(frac: &mut Big, frac_bits: usize) -> u8 {
    if frac.is_zero() {
        return 0;
    }
    frac.mul_small(10);
    frac.take_above(frac_bits) as u8
}

/// Add one unit in the last place of the digits in `out`, carrying left.
fn round_up(out: &mut Cursor<'_>) -> FmtResult {
    let mut i = out.pos;
    while i > 0 {
        i -= 1;
        match out.buf[i] {
            b'.' => continue,
            b'9' => out.buf[i] = b'0',
            digit => {
                out.buf[i] = digit + 1;
                return Ok(());
            }
        }
    }
    // Carried out of the leading digit: "99.9" became "00.0", prepend a 1.
    if out.pos >= out.buf.len() {
        return Err(FmtError::BufferCapacity);
    }
    move_within(out.buf, 0..out.pos, 1)?;
    out.buf[0] = b'1';
    out.pos += 1;
    Ok(())
}

fn write_special(text: &[u8; 3], flags: NumFlags, out: &mut Cursor<'_>) -> FmtResult {
    for &b in text {
        let b = if flags.contains(NumFlags::UPPER_CASE) {
            b.to_ascii_uppercase()
        } else {
            b
        };
        out.push(b)?;
    }
    Ok(())
}

/// Write the magnitude of `value` into `buf` (no sign, no terminator).
///
/// The sign decision is returned in [`FloatText::negative`] so the caller
/// can place it relative to any padding.
pub fn fmt_f64_parts(value: f64, attr: &FloatAttr, buf: &mut [u8]) -> FmtResult<FloatText> {
    let negative = float_is_negative(value, attr.flags);
    let mut out = Cursor { buf, pos: 0 };

    if value.is_nan() || value.is_infinite() {
        let text = if value.is_nan() { b"nan" } else { b"inf" };
        write_special(text, attr.flags, &mut out)?;
        return Ok(FloatText {
            negative,
            finite: false,
            len: out.pos,
        });
    }

    let (mantissa, exp) = decompose(value);
    let (mut int_part, mut frac, frac_bits) = if exp >= 0 {
        let mut int_part = Big::from_u64(mantissa);
        int_part.shl(exp as usize);
        (int_part, Big::zero(), 0)
    } else {
        let k = exp.unsigned_abs() as usize;
        if k < 64 {
            let int_part = Big::from_u64(mantissa >> k);
            let frac = Big::from_u64(mantissa & ((1u64 << k) - 1));
            (int_part, frac, k)
        } else {
            (Big::zero(), Big::from_u64(mantissa), k)
        }
    };

    write_integer(&mut int_part, &mut out)?;
    let int_len = out.pos;

    let keep_point = attr.flags.contains(NumFlags::KEEP_POINT);
    if attr.precision > 0 || keep_point {
        out.push(b'.')?;
    }
    for _ in 0..attr.precision {
        let digit = next_fraction_digit(&mut frac, frac_bits);
        out.push(b'0' + digit)?;
    }

    let dropped = next_fraction_digit(&mut frac, frac_bits);
    let last_kept = if attr.precision > 0 {
        out.buf[out.pos - 1]
    } else {
        out.buf[int_len - 1]
    };
    if dropped > 5 || (dropped == 5 && (last_kept - b'0') % 2 == 1) {
        round_up(&mut out)?;
    }

    if attr.mode == FloatMode::General && attr.precision > 0 {
        while out.pos > 0 && out.buf[out.pos - 1] == b'0' {
            out.pos -= 1;
        }
        if out.buf[out.pos - 1] == b'.' && !keep_point {
            out.pos -= 1;
        }
    }

    Ok(FloatText {
        negative,
        finite: true,
        len: out.pos,
    })
}

/// Format `value` with its sign into `buf`, NUL-terminated.
///
/// Returns the characters written, terminator excluded.
pub fn fmt_f64(value: f64, attr: &FloatAttr, buf: &mut [u8]) -> FmtResult<usize> {
    let sign_len = float_is_negative(value, attr.flags) as usize;
    let body = buf.get_mut(sign_len..).ok_or(FmtError::BufferCapacity)?;
    let text = fmt_f64_parts(value, attr, body)?;

    let len = sign_len + text.len;
    if len >= buf.len() {
        return Err(FmtError::BufferCapacity);
    }
    if text.negative {
        buf[0] = b'-';
    }
    buf[len] = 0;
    Ok(len)
}

/// `f32` flavour of [`fmt_f64`]; widening to `f64` is exact.
#[inline]
pub fn fmt_f32(value: f32, attr: &FloatAttr, buf: &mut [u8]) -> FmtResult<usize> {
    fmt_f64(value as f64, attr, buf)
}
