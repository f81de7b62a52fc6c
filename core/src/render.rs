//! Rendering of a single argument under its [`FormatSpec`].
//!
//! A field is assembled from three parts: sign, radix prefix and body.
//! Padding goes around the whole field, except in zero-pad mode where the
//! zeros sit between prefix and body. Width is measured in bytes.

use nanofmt_lib::numfmt::{FloatAttr, IntAttr, NumBuf, NumFlags};
use nanofmt_lib::sink::Sink;
use nanofmt_lib::{FmtError, FmtResult, ParseReason};

use crate::config::Config;
use crate::spec::{Align, FormatSpec, Presentation, Sign};
use crate::stack::ArgValue;

/// Scratch space for numeric text; longer numbers fail with
/// [`FmtError::BufferCapacity`].
pub const RENDER_SCRATCH_SIZE: usize = 512;

pub const FLOAT_DEFAULT_PRECISION: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Text,
    Number,
    /// `inf` and `nan`: numeric alignment, never zero padded.
    NonFinite,
}

struct Field<'b> {
    sign: &'static [u8],
    prefix: &'static [u8],
    body: &'b [u8],
    kind: Kind,
}

impl<'b> Field<'b> {
    fn text(body: &'b [u8]) -> Self {
        Self {
            sign: b"",
            prefix: b"",
            body,
            kind: Kind::Text,
        }
    }
}

/// Offset is filled in by the caller, which knows the placeholder.
fn mismatch() -> FmtError {
    FmtError::Parse {
        offset: 0,
        reason: ParseReason::TypeMismatch,
    }
}

fn sign_text(negative: bool, mode: Sign) -> &'static [u8] {
    match (negative, mode) {
        (true, _) => b"-",
        (false, Sign::Plus) => b"+",
        (false, Sign::Space) => b" ",
        (false, Sign::Minus) => b"",
    }
}

fn integer<'b>(
    negative: bool,
    magnitude: u64,
    spec: &FormatSpec,
    scratch: &'b mut NumBuf<RENDER_SCRATCH_SIZE>,
) -> FmtResult<Field<'b>> {
    let ty = spec.ty.unwrap_or(Presentation::Decimal);
    let base = ty.radix().ok_or_else(mismatch)?;
    let body = scratch.format_u64(magnitude, &IntAttr::new(base).upper(ty.is_upper()))?;

    let prefix: &'static [u8] = if spec.alternate() {
        match ty {
            Presentation::HexLower => b"0x",
            Presentation::HexUpper => b"0X",
            Presentation::BinLower => b"0b",
            Presentation::BinUpper => b"0B",
            Presentation::Octal if magnitude != 0 => b"0",
            _ => b"",
        }
    } else {
        b""
    };

    Ok(Field {
        sign: sign_text(negative, spec.sign),
        prefix,
        body,
        kind: Kind::Number,
    })
}

fn pointer<'b>(
    addr: usize,
    spec: &FormatSpec,
    scratch: &'b mut NumBuf<RENDER_SCRATCH_SIZE>,
) -> FmtResult<Field<'b>> {
    let upper = match spec.ty {
        None | Some(Presentation::Pointer) | Some(Presentation::HexLower) => false,
        Some(Presentation::HexUpper) => true,
        Some(_) => return Err(mismatch()),
    };
    let body = scratch.format_u64(addr as u64, &IntAttr::new(16).upper(upper))?;
    Ok(Field {
        sign: b"",
        prefix: if upper { b"0X" } else { b"0x" },
        body,
        kind: Kind::Number,
    })
}

fn float<'b>(
    value: f64,
    spec: &FormatSpec,
    cfg: &Config,
    scratch: &'b mut NumBuf<RENDER_SCRATCH_SIZE>,
) -> FmtResult<Field<'b>> {
    let precision = spec.precision.unwrap_or(FLOAT_DEFAULT_PRECISION);
    let ty = spec.ty.unwrap_or(Presentation::FixedLower);
    let attr = match ty {
        Presentation::FixedLower | Presentation::FixedUpper => FloatAttr::fixed(precision),
        Presentation::GeneralLower | Presentation::GeneralUpper => FloatAttr::general(precision),
        _ => return Err(mismatch()),
    };

    let mut flags = NumFlags::empty();
    flags.set(NumFlags::UPPER_CASE, ty.is_upper());
    flags.set(NumFlags::KEEP_POINT, spec.alternate());
    flags.set(NumFlags::SIGNED_ZERO, cfg.signed_zero);

    let (text, body) = scratch.format_f64_parts(value, &attr.with_flags(flags))?;
    Ok(Field {
        sign: sign_text(text.negative, spec.sign),
        prefix: b"",
        body,
        kind: if text.finite { Kind::Number } else { Kind::NonFinite },
    })
}

/// Longest prefix of `text` within `limit` bytes that ends on a character
/// boundary.
fn truncate_str(text: &str, limit: usize) -> &str {
    if limit >= text.len() {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn write_field<S: Sink + ?Sized>(field: &Field<'_>, spec: &FormatSpec, out: &mut S) -> FmtResult {
    let len = field.sign.len() + field.prefix.len() + field.body.len();
    let pad = spec.width.map_or(0, |w| w.saturating_sub(len));

    if spec.zero_pad() && field.kind == Kind::Number {
        out.emit_all(field.sign)?;
        out.emit_all(field.prefix)?;
        out.emit_repeat(b"0", pad)?;
        return out.emit_all(field.body);
    }

    let fill = match (spec.zero_pad(), field.kind) {
        (true, Kind::NonFinite) => ' ',
        (true, _) => '0',
        (false, _) => spec.fill,
    };
    let mut fill_buf = [0u8; 4];
    let fill = fill.encode_utf8(&mut fill_buf).as_bytes();

    let default_align = if field.kind == Kind::Text { Align::Left } else { Align::Right };
    let (before, after) = match spec.align.unwrap_or(default_align) {
        Align::Left => (0, pad),
        Align::Right => (pad, 0),
        Align::Center => (pad / 2, pad - pad / 2),
    };

    out.emit_repeat(fill, before)?;
    out.emit_all(field.sign)?;
    out.emit_all(field.prefix)?;
    out.emit_all(field.body)?;
    out.emit_repeat(fill, after)
}

/// Render `value` under `spec` into `out`.
///
/// A presentation type that does not fit the value's category is a
/// [`ParseReason::TypeMismatch`] error (reported at offset 0). String
/// arguments must be UTF-8; precision truncates them to at most that many
/// bytes without splitting a character. Precision is ignored for integers.
pub fn render<S: Sink + ?Sized>(value: ArgValue<'_>, spec: &FormatSpec, cfg: &Config, out: &mut S) -> FmtResult {
    let mut scratch = NumBuf::<RENDER_SCRATCH_SIZE>::new();
    let mut byte = [0u8; 1];

    let field = match value {
        ArgValue::Char(c) => match spec.ty {
            None | Some(Presentation::Char) => {
                byte[0] = c;
                Field::text(&byte)
            }
            Some(_) => integer(false, c as u64, spec, &mut scratch)?,
        },
        ArgValue::Str(s) => match spec.ty {
            None | Some(Presentation::Str) => {
                let text = s.to_str().map_err(|_| FmtError::InvalidParameter)?;
                let text = match spec.precision {
                    Some(limit) => truncate_str(text, limit),
                    None => text,
                };
                Field::text(text.as_bytes())
            }
            Some(_) => return Err(mismatch()),
        },
        ArgValue::Ptr(p) => pointer(p as usize, spec, &mut scratch)?,
        ArgValue::F32(v) => float(v as f64, spec, cfg, &mut scratch)?,
        ArgValue::F64(v) => float(v, spec, cfg, &mut scratch)?,
        ArgValue::I8(v) => integer(v < 0, v.unsigned_abs() as u64, spec, &mut scratch)?,
        ArgValue::I16(v) => integer(v < 0, v.unsigned_abs() as u64, spec, &mut scratch)?,
        ArgValue::I32(v) => integer(v < 0, v.unsigned_abs() as u64, spec, &mut scratch)?,
        ArgValue::Isize(v) => integer(v < 0, v.unsigned_abs() as u64, spec, &mut scratch)?,
        ArgValue::I64(v) => integer(v < 0, v.unsigned_abs(), spec, &mut scratch)?,
        ArgValue::U8(v) => integer(false, v as u64, spec, &mut scratch)?,
        ArgValue::U16(v) => integer(false, v as u64, spec, &mut scratch)?,
        ArgValue::U32(v) => integer(false, v as u64, spec, &mut scratch)?,
        ArgValue::Usize(v) => integer(false, v as u64, spec, &mut scratch)?,
        ArgValue::U64(v) => integer(false, v, spec, &mut scratch)?,
    };

    write_field(&field, spec, out)
}
