//! One-byte type tags for values on the argument stack.
//!
//! The high nibble names the family: `0x1_` signed (floats included, they
//! carry a sign), `0x2_` unsigned (pointer included), `0x3_` text. The raw
//! byte is what the stack stores; everything else matches on [`TypeTag`].

use core::ffi::c_char;
use core::mem::size_of;

const FAMILY_SIGNED: u8 = 0x1;
const FAMILY_UNSIGNED: u8 = 0x2;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    I8 = 0x10,
    I16 = 0x11,
    I32 = 0x12,
    Isize = 0x13,
    I64 = 0x14,
    F32 = 0x15,
    F64 = 0x16,

    U8 = 0x20,
    U16 = 0x21,
    U32 = 0x22,
    Usize = 0x23,
    U64 = 0x24,
    Ptr = 0x25,

    /// A single byte character.
    Char = 0x30,
    /// Pointer to a NUL-terminated string.
    Str = 0x31,
}

impl TypeTag {
    pub const ALL: [TypeTag; 15] = [
        TypeTag::I8,
        TypeTag::I16,
        TypeTag::I32,
        TypeTag::Isize,
        TypeTag::I64,
        TypeTag::F32,
        TypeTag::F64,
        TypeTag::U8,
        TypeTag::U16,
        TypeTag::U32,
        TypeTag::Usize,
        TypeTag::U64,
        TypeTag::Ptr,
        TypeTag::Char,
        TypeTag::Str,
    ];

    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub const fn from_raw(raw: u8) -> Option<Self> {
        let tag = match raw {
            0x10 => TypeTag::I8,
            0x11 => TypeTag::I16,
            0x12 => TypeTag::I32,
            0x13 => TypeTag::Isize,
            0x14 => TypeTag::I64,
            0x15 => TypeTag::F32,
            0x16 => TypeTag::F64,
            0x20 => TypeTag::U8,
            0x21 => TypeTag::U16,
            0x22 => TypeTag::U32,
            0x23 => TypeTag::Usize,
            0x24 => TypeTag::U64,
            0x25 => TypeTag::Ptr,
            0x30 => TypeTag::Char,
            0x31 => TypeTag::Str,
            _ => return None,
        };
        Some(tag)
    }

    /// Bytes the value occupies on the stack.
    pub const fn size(self) -> usize {
        match self {
            TypeTag::I8 | TypeTag::U8 | TypeTag::Char => 1,
            TypeTag::I16 | TypeTag::U16 => 2,
            TypeTag::I32 | TypeTag::U32 | TypeTag::F32 => 4,
            TypeTag::I64 | TypeTag::U64 | TypeTag::F64 => 8,
            TypeTag::Isize | TypeTag::Usize => size_of::<usize>(),
            TypeTag::Ptr => size_of::<*const ()>(),
            // Stored as the address of the first byte, not as a `&CStr`.
            TypeTag::Str => size_of::<*const c_char>(),
        }
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        is_signed(self as u8)
    }

    #[inline]
    pub const fn is_unsigned(self) -> bool {
        is_unsigned(self as u8)
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, TypeTag::F32 | TypeTag::F64)
    }

    /// Integer-valued tags (the pointer is not one).
    #[inline]
    pub const fn is_integer(self) -> bool {
        (self.is_signed() && !self.is_float()) || (self.is_unsigned() && !matches!(self, TypeTag::Ptr))
    }
}

/// Stack size of a raw tag byte; 0 for bytes that are not a tag.
#[inline]
pub const fn size_of_raw(raw: u8) -> usize {
    match TypeTag::from_raw(raw) {
        Some(tag) => tag.size(),
        None => 0,
    }
}

#[inline]
pub const fn is_signed(raw: u8) -> bool {
    raw >> 4 == FAMILY_SIGNED
}

#[inline]
pub const fn is_unsigned(raw: u8) -> bool {
    raw >> 4 == FAMILY_UNSIGNED
}
