//! Stack-only number formatting for `no_std` contexts.
//!
//! Every converter writes into a caller-provided `&mut [u8]` and reports how
//! many bytes it produced. No heap, no allocator. Integer conversion
//! supports bases 2..=16 with a minimum digit count; float conversion
//! produces exact fixed or general notation from the binary value.
//!
//! # Typed wrappers
//!
//! The [`NumBuf`] helper owns a stack buffer and hands back the formatted
//! bytes, so callers don't have to size and slice buffers themselves:
//!
//! ```ignore
//! let mut buf = NumBuf::<32>::new();
//! let text = buf.format_u64(0xBEEF, &IntAttr::new(16).upper(true))?; // b"BEEF"
//! let pi = buf.format_f64(3.14159, &FloatAttr::fixed(2))?;            // b"3.14"
//! ```

use bitflags::bitflags;

mod bignum;
mod float;
mod int;

pub use float::{FloatAttr, FloatMode, FloatText, fmt_f32, fmt_f64, fmt_f64_parts, float_is_negative};
pub use int::{IntAttr, fmt_i64, fmt_u32, fmt_u64};

use crate::error::FmtResult;

bitflags! {
    /// Rendering switches shared by the integer and float converters.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NumFlags: u8 {
        /// Digits above 9 and `INF`/`NAN` in upper case.
        const UPPER_CASE  = 1 << 0;
        /// Emit the decimal point even when no fraction digits follow.
        const KEEP_POINT  = 1 << 1;
        /// Render `-0.0` with its sign.
        const SIGNED_ZERO = 1 << 2;
    }
}

/// Stack-allocated formatting buffer.
///
/// `N` should be sized for the largest formatted output expected plus the
/// NUL terminator the converters append:
/// - decimal `u64::MAX` or `i64::MIN`: 21 bytes
/// - binary `u64::MAX`: 65 bytes
/// - fixed `f64::MAX` at precision 6: 317 bytes
pub struct NumBuf<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> Default for NumBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NumBuf<N> {
    #[inline]
    pub const fn new() -> Self {
        Self { buf: [0u8; N] }
    }

    /// Format an unsigned value; returns the digits.
    #[inline]
    pub fn format_u64(&mut self, value: u64, attr: &IntAttr) -> FmtResult<&[u8]> {
        let len = fmt_u64(value, attr, &mut self.buf)?;
        Ok(&self.buf[..len])
    }

    /// Format a signed value; returns sign and digits.
    #[inline]
    pub fn format_i64(&mut self, value: i64, attr: &IntAttr) -> FmtResult<&[u8]> {
        let len = fmt_i64(value, attr, &mut self.buf)?;
        Ok(&self.buf[..len])
    }

    /// Format a float with its sign.
    #[inline]
    pub fn format_f64(&mut self, value: f64, attr: &FloatAttr) -> FmtResult<&[u8]> {
        let len = fmt_f64(value, attr, &mut self.buf)?;
        Ok(&self.buf[..len])
    }

    /// Format only the magnitude of a float; the sign is reported separately.
    #[inline]
    pub fn format_f64_parts(&mut self, value: f64, attr: &FloatAttr) -> FmtResult<(FloatText, &[u8])> {
        let text = fmt_f64_parts(value, attr, &mut self.buf)?;
        Ok((text, &self.buf[..text.len]))
    }
}
