//! Error taxonomy shared by every nanofmt crate.
//!
//! All fallible operations (argument stack, converters, template parsing,
//! output) report one [`FmtError`]. Nothing is retried and nothing degrades
//! into partial output: the first error ends the operation.

use core::fmt;

/// Why a template (or a placeholder inside it) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseReason {
    /// `{` without a closing `}`.
    UnterminatedPlaceholder,
    /// `}` outside a placeholder that is not part of `}}`.
    UnmatchedClose,
    /// Index digits that do not fit in `usize`.
    InvalidIndex,
    /// A character the format-spec grammar does not allow at this position.
    UnexpectedChar(char),
    /// Width or precision digits that do not fit in `usize`.
    InvalidNumber,
    /// Presentation type does not apply to the argument's category.
    TypeMismatch,
}

impl fmt::Display for ParseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedPlaceholder => write!(f, "unterminated placeholder"),
            Self::UnmatchedClose => write!(f, "unmatched '}}'"),
            Self::InvalidIndex => write!(f, "invalid argument index"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            Self::InvalidNumber => write!(f, "width or precision out of range"),
            Self::TypeMismatch => write!(f, "presentation type does not match argument"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FmtError {
    /// A required input was missing or out of its domain (e.g. base 17).
    InvalidParameter,
    /// Malformed template; `offset` is the byte offset of the placeholder.
    Parse { offset: usize, reason: ParseReason },
    /// Placeholder index past the end of the argument list.
    ArgumentIndex { index: usize, len: usize },
    StackOverflow,
    StackUnderflow,
    /// Destination (or scratch) too small for the rendered text.
    BufferCapacity,
    /// The output sink refused a character.
    Io,
}

impl fmt::Display for FmtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::Parse { offset, reason } => {
                write!(f, "template error at byte {}: {}", offset, reason)
            }
            Self::ArgumentIndex { index, len } => {
                write!(f, "argument index {} out of range ({} arguments)", index, len)
            }
            Self::StackOverflow => write!(f, "argument stack overflow"),
            Self::StackUnderflow => write!(f, "argument stack underflow"),
            Self::BufferCapacity => write!(f, "destination buffer too small"),
            Self::Io => write!(f, "output sink rejected a character"),
        }
    }
}

/// Convenience result type for nanofmt operations.
pub type FmtResult<T = ()> = Result<T, FmtError>;
