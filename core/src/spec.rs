//! Template tokenizer and placeholder grammar.
//!
//! A template is literal text with `{}` placeholders. `{{` and `}}` stand
//! for single braces; a `}` on its own is an error. Inside a placeholder:
//!
//! ```text
//! {[index][:spec]}
//! spec := [[fill]align][sign]['#']['0'][width]['.' precision][type]
//! align := '<' | '>' | '^'
//! sign := '+' | '-' | ' '
//! type := 'd' | 'x' | 'X' | 'b' | 'B' | 'o' | 'c' | 'p' | 'f' | 'F' | 'g' | 'G' | 's'
//! ```

use bitflags::bitflags;

use nanofmt_lib::string::atoi;
use nanofmt_lib::{FmtError, FmtResult, ParseReason};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sign {
    /// `+`: sign on every number.
    Plus,
    /// `-`: sign on negative numbers only.
    #[default]
    Minus,
    /// ` `: a space in place of `+`.
    Space,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SpecFlags: u8 {
        /// `#`: radix prefix for integers, kept point for floats.
        const ALTERNATE = 1 << 0;
        /// `0`: pad with zeros after the sign and prefix.
        const ZERO_PAD  = 1 << 1;
    }
}

/// Presentation type letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    Decimal,
    HexLower,
    HexUpper,
    BinLower,
    BinUpper,
    Octal,
    Char,
    Pointer,
    FixedLower,
    FixedUpper,
    GeneralLower,
    GeneralUpper,
    Str,
}

impl Presentation {
    pub fn from_char(c: char) -> Option<Self> {
        let ty = match c {
            'd' => Presentation::Decimal,
            'x' => Presentation::HexLower,
            'X' => Presentation::HexUpper,
            'b' => Presentation::BinLower,
            'B' => Presentation::BinUpper,
            'o' => Presentation::Octal,
            'c' => Presentation::Char,
            'p' => Presentation::Pointer,
            'f' => Presentation::FixedLower,
            'F' => Presentation::FixedUpper,
            'g' => Presentation::GeneralLower,
            'G' => Presentation::GeneralUpper,
            's' => Presentation::Str,
            _ => return None,
        };
        Some(ty)
    }

    /// Integer base for the integer presentations.
    pub fn radix(self) -> Option<u8> {
        match self {
            Presentation::Decimal => Some(10),
            Presentation::HexLower | Presentation::HexUpper => Some(16),
            Presentation::BinLower | Presentation::BinUpper => Some(2),
            Presentation::Octal => Some(8),
            _ => None,
        }
    }

    pub fn is_upper(self) -> bool {
        matches!(
            self,
            Presentation::HexUpper | Presentation::BinUpper | Presentation::FixedUpper | Presentation::GeneralUpper
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    /// `None` means the default for the argument's category.
    pub align: Option<Align>,
    pub sign: Sign,
    pub flags: SpecFlags,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub ty: Option<Presentation>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FormatSpec {
    pub const DEFAULT: Self = Self {
        fill: ' ',
        align: None,
        sign: Sign::Minus,
        flags: SpecFlags::empty(),
        width: None,
        precision: None,
        ty: None,
    };

    #[inline]
    pub fn alternate(&self) -> bool {
        self.flags.contains(SpecFlags::ALTERNATE)
    }

    /// Sign-aware zero padding applies: `0` given and no explicit align.
    #[inline]
    pub fn zero_pad(&self) -> bool {
        self.flags.contains(SpecFlags::ZERO_PAD) && self.align.is_none()
    }

    /// Parse the text after `:`. `offset` is the placeholder's position in
    /// the template, used for error reports.
    pub fn parse(text: &str, offset: usize) -> FmtResult<Self> {
        let err = |reason| FmtError::Parse { offset, reason };
        let mut spec = Self::DEFAULT;
        let mut rest = text;

        let mut chars = rest.chars();
        let first = chars.next();
        let second = chars.next();
        if let (Some(fill), Some(align)) = (first, second.and_then(Align::from_char)) {
            spec.fill = fill;
            spec.align = Some(align);
            rest = &rest[fill.len_utf8() + 1..];
        } else if let Some(align) = first.and_then(Align::from_char) {
            spec.align = Some(align);
            rest = &rest[1..];
        }

        if let Some(sign) = match rest.as_bytes().first() {
            Some(b'+') => Some(Sign::Plus),
            Some(b'-') => Some(Sign::Minus),
            Some(b' ') => Some(Sign::Space),
            _ => None,
        } {
            spec.sign = sign;
            rest = &rest[1..];
        }

        if let Some(tail) = rest.strip_prefix('#') {
            spec.flags |= SpecFlags::ALTERNATE;
            rest = tail;
        }
        if let Some(tail) = rest.strip_prefix('0') {
            spec.flags |= SpecFlags::ZERO_PAD;
            rest = tail;
        }

        if let Some((width, tail)) = parse_count(rest).map_err(err)? {
            spec.width = Some(width);
            rest = tail;
        }

        if let Some(tail) = rest.strip_prefix('.') {
            let (precision, tail) = parse_count(tail)
                .map_err(err)?
                .ok_or(err(ParseReason::InvalidNumber))?;
            spec.precision = Some(precision);
            rest = tail;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            spec.ty = Some(Presentation::from_char(c).ok_or(err(ParseReason::UnexpectedChar(c)))?);
            if let Some(extra) = chars.next() {
                return Err(err(ParseReason::UnexpectedChar(extra)));
            }
        }

        Ok(spec)
    }
}

/// Leading decimal digits of `text`, if any, and the remainder.
fn parse_count(text: &str) -> Result<Option<(usize, &str)>, ParseReason> {
    if !text.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        return Ok(None);
    }
    let (value, used) = atoi(text.as_bytes());
    if value == i64::MAX {
        return Err(ParseReason::InvalidNumber);
    }
    let value = usize::try_from(value).map_err(|_| ParseReason::InvalidNumber)?;
    Ok(Some((value, &text[used..])))
}

/// One placeholder of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte offset of the opening `{`.
    pub offset: usize,
    /// Explicit argument index; `None` takes the next implicit one.
    pub index: Option<usize>,
    pub spec: FormatSpec,
}

impl Placeholder {
    /// Parse the text between the braces.
    fn parse(body: &str, offset: usize) -> FmtResult<Self> {
        let err = |reason| FmtError::Parse { offset, reason };

        let (index_text, spec_text) = match body.split_once(':') {
            Some((index, spec)) => (index, Some(spec)),
            None => (body, None),
        };

        let index = if index_text.is_empty() {
            None
        } else {
            let (value, used) = atoi(index_text.as_bytes());
            if used != index_text.len() || !index_text.as_bytes()[0].is_ascii_digit() {
                let bad = index_text[used..].chars().next().unwrap_or('-');
                return Err(err(ParseReason::UnexpectedChar(bad)));
            }
            if value == i64::MAX {
                return Err(err(ParseReason::InvalidIndex));
            }
            Some(usize::try_from(value).map_err(|_| err(ParseReason::InvalidIndex))?)
        };

        let spec = match spec_text {
            Some(text) => FormatSpec::parse(text, offset)?,
            None => FormatSpec::DEFAULT,
        };

        Ok(Self { offset, index, spec })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece<'t> {
    /// Text copied as-is; an escaped brace is a one-byte literal.
    Literal(&'t str),
    Placeholder(Placeholder),
}

/// Iterator over the pieces of a template.
///
/// Yields an error at the first malformed piece and stops.
pub struct Pieces<'t> {
    template: &'t str,
    pos: usize,
    failed: bool,
}

impl<'t> Pieces<'t> {
    pub fn new(template: &'t str) -> Self {
        Self {
            template,
            pos: 0,
            failed: false,
        }
    }

    fn next_piece(&mut self) -> FmtResult<Piece<'t>> {
        let start = self.pos;
        let bytes = self.template.as_bytes();

        match bytes[start] {
            b'{' if bytes.get(start + 1) == Some(&b'{') => {
                self.pos += 2;
                Ok(Piece::Literal(&self.template[start..start + 1]))
            }
            b'}' if bytes.get(start + 1) == Some(&b'}') => {
                self.pos += 2;
                Ok(Piece::Literal(&self.template[start..start + 1]))
            }
            b'}' => Err(FmtError::Parse {
                offset: start,
                reason: ParseReason::UnmatchedClose,
            }),
            b'{' => {
                let close = bytes[start + 1..]
                    .iter()
                    .position(|&b| b == b'}')
                    .ok_or(FmtError::Parse {
                        offset: start,
                        reason: ParseReason::UnterminatedPlaceholder,
                    })?;
                let end = start + 1 + close;
                self.pos = end + 1;
                Ok(Piece::Placeholder(Placeholder::parse(&self.template[start + 1..end], start)?))
            }
            _ => {
                let len = bytes[start..]
                    .iter()
                    .position(|&b| b == b'{' || b == b'}')
                    .unwrap_or(bytes.len() - start);
                self.pos += len;
                Ok(Piece::Literal(&self.template[start..start + len]))
            }
        }
    }
}

impl<'t> Iterator for Pieces<'t> {
    type Item = FmtResult<Piece<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.template.len() {
            return None;
        }
        let piece = self.next_piece();
        self.failed = piece.is_err();
        Some(piece)
    }
}
