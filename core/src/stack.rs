//! Typed argument stack.
//!
//! Arguments for one format call are pushed onto a fixed-capacity stack as
//! raw bytes plus a [`TypeTag`] per entry. Builders take the stack by
//! `&mut`, push one value and hand the same stack back, so calls nest:
//!
//! ```ignore
//! let mut stack = ArgStack::new();
//! let args = add(1, add(2, add(3, start(&mut stack))));
//! // Popping yields 1, 2, 3: the outermost call is argument 0.
//! ```
//!
//! [`args!`](crate::args) expands a comma list into the same nesting.
//!
//! A builder whose push fails poisons the stack: the error is stored,
//! later builders do nothing, and formatting the stack reports the stored
//! error without producing output.

use core::ffi::{CStr, c_char};
use core::marker::PhantomData;

use nanofmt_lib::klog_warn;
use nanofmt_lib::memory::copy_bytes;
use nanofmt_lib::{FmtError, FmtResult};

use crate::typetag::TypeTag;

/// Default capacity in bytes (and in entries).
pub const STACK_DEFAULT_SIZE: usize = 64;

/// Largest single entry.
pub const ARG_MAX_SIZE: usize = 8;

/// A decoded stack entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArgValue<'a> {
    I8(i8),
    I16(i16),
    I32(i32),
    Isize(isize),
    I64(i64),
    F32(f32),
    F64(f64),
    U8(u8),
    U16(u16),
    U32(u32),
    Usize(usize),
    U64(u64),
    Ptr(*const ()),
    Char(u8),
    Str(&'a CStr),
}

fn word<const W: usize>(bytes: &[u8]) -> [u8; W] {
    let mut out = [0u8; W];
    out.copy_from_slice(&bytes[..W]);
    out
}

impl<'a> ArgValue<'a> {
    pub const fn tag(&self) -> TypeTag {
        match self {
            ArgValue::I8(_) => TypeTag::I8,
            ArgValue::I16(_) => TypeTag::I16,
            ArgValue::I32(_) => TypeTag::I32,
            ArgValue::Isize(_) => TypeTag::Isize,
            ArgValue::I64(_) => TypeTag::I64,
            ArgValue::F32(_) => TypeTag::F32,
            ArgValue::F64(_) => TypeTag::F64,
            ArgValue::U8(_) => TypeTag::U8,
            ArgValue::U16(_) => TypeTag::U16,
            ArgValue::U32(_) => TypeTag::U32,
            ArgValue::Usize(_) => TypeTag::Usize,
            ArgValue::U64(_) => TypeTag::U64,
            ArgValue::Ptr(_) => TypeTag::Ptr,
            ArgValue::Char(_) => TypeTag::Char,
            ArgValue::Str(_) => TypeTag::Str,
        }
    }

    /// Write the stack representation into `out`; returns its length.
    fn encode(&self, out: &mut [u8; ARG_MAX_SIZE]) -> usize {
        let mut put = |bytes: &[u8]| {
            out[..bytes.len()].copy_from_slice(bytes);
            bytes.len()
        };
        match *self {
            ArgValue::I8(v) => put(&v.to_ne_bytes()),
            ArgValue::I16(v) => put(&v.to_ne_bytes()),
            ArgValue::I32(v) => put(&v.to_ne_bytes()),
            ArgValue::Isize(v) => put(&v.to_ne_bytes()),
            ArgValue::I64(v) => put(&v.to_ne_bytes()),
            ArgValue::F32(v) => put(&v.to_ne_bytes()),
            ArgValue::F64(v) => put(&v.to_ne_bytes()),
            ArgValue::U8(v) => put(&v.to_ne_bytes()),
            ArgValue::U16(v) => put(&v.to_ne_bytes()),
            ArgValue::U32(v) => put(&v.to_ne_bytes()),
            ArgValue::Usize(v) => put(&v.to_ne_bytes()),
            ArgValue::U64(v) => put(&v.to_ne_bytes()),
            ArgValue::Ptr(p) => put(&(p as usize).to_ne_bytes()),
            ArgValue::Char(c) => put(&[c]),
            ArgValue::Str(s) => put(&(s.as_ptr() as usize).to_ne_bytes()),
        }
    }

    /// Rebuild a value from its stack bytes.
    ///
    /// # Safety
    ///
    /// `bytes` must hold at least `tag.size()` bytes, and for
    /// [`TypeTag::Str`] they must be the address of a NUL-terminated string
    /// that lives for `'a`.
    unsafe fn decode(tag: TypeTag, bytes: &[u8]) -> Self {
        match tag {
            TypeTag::I8 => ArgValue::I8(i8::from_ne_bytes(word(bytes))),
            TypeTag::I16 => ArgValue::I16(i16::from_ne_bytes(word(bytes))),
            TypeTag::I32 => ArgValue::I32(i32::from_ne_bytes(word(bytes))),
            TypeTag::Isize => ArgValue::Isize(isize::from_ne_bytes(word(bytes))),
            TypeTag::I64 => ArgValue::I64(i64::from_ne_bytes(word(bytes))),
            TypeTag::F32 => ArgValue::F32(f32::from_ne_bytes(word(bytes))),
            TypeTag::F64 => ArgValue::F64(f64::from_ne_bytes(word(bytes))),
            TypeTag::U8 => ArgValue::U8(bytes[0]),
            TypeTag::U16 => ArgValue::U16(u16::from_ne_bytes(word(bytes))),
            TypeTag::U32 => ArgValue::U32(u32::from_ne_bytes(word(bytes))),
            TypeTag::Usize => ArgValue::Usize(usize::from_ne_bytes(word(bytes))),
            TypeTag::U64 => ArgValue::U64(u64::from_ne_bytes(word(bytes))),
            TypeTag::Ptr => ArgValue::Ptr(usize::from_ne_bytes(word(bytes)) as *const ()),
            TypeTag::Char => ArgValue::Char(bytes[0]),
            TypeTag::Str => {
                let ptr = usize::from_ne_bytes(word(bytes)) as *const c_char;
                // SAFETY: guaranteed by the caller.
                ArgValue::Str(unsafe { CStr::from_ptr(ptr) })
            }
        }
    }
}

/// Fixed-capacity LIFO of typed arguments.
///
/// `N` bounds both the byte arena and the number of entries.
pub struct ArgStack<'a, const N: usize = STACK_DEFAULT_SIZE> {
    types: [u8; N],
    data: [u8; N],
    type_top: usize,
    data_top: usize,
    error: Option<FmtError>,
    _strings: PhantomData<&'a CStr>,
}

impl<const N: usize> Default for ArgStack<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> ArgStack<'a, N> {
    pub const fn new() -> Self {
        Self {
            types: [0; N],
            data: [0; N],
            type_top: 0,
            data_top: 0,
            error: None,
            _strings: PhantomData,
        }
    }

    /// A stack that fails every format call with `error`.
    pub const fn poisoned(error: FmtError) -> Self {
        let mut stack = Self::new();
        stack.error = Some(error);
        stack
    }

    /// Empty the stack and clear any recorded error.
    pub fn init(&mut self) {
        self.type_top = 0;
        self.data_top = 0;
        self.error = None;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_top
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_top == 0
    }

    #[inline]
    pub fn bytes_used(&self) -> usize {
        self.data_top
    }

    /// The error a failed builder recorded, if any.
    #[inline]
    pub fn error(&self) -> Option<FmtError> {
        self.error
    }

    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.error.is_some()
    }

    /// Push `tag.size()` bytes from the front of `bytes` under `tag`.
    ///
    /// # Safety
    ///
    /// For [`TypeTag::Str`] the bytes must be the address of a
    /// NUL-terminated string that lives for `'a`. Other tags accept any
    /// bit pattern.
    pub unsafe fn push_raw(&mut self, bytes: &[u8], tag: TypeTag) -> FmtResult {
        let size = tag.size();
        if bytes.len() < size {
            return Err(FmtError::InvalidParameter);
        }
        if self.type_top >= N || N - self.data_top < size {
            return Err(FmtError::StackOverflow);
        }

        let end = self.data_top + size;
        copy_bytes(&mut self.data[self.data_top..end], &bytes[..size])?;
        self.types[self.type_top] = tag.raw();
        self.type_top += 1;
        self.data_top = end;
        Ok(())
    }

    /// Push a decoded value.
    pub fn push(&mut self, value: ArgValue<'a>) -> FmtResult {
        let mut raw = [0u8; ARG_MAX_SIZE];
        let len = value.encode(&mut raw);
        // SAFETY: a `Str` value holds a `&'a CStr`, so its address stays
        // valid for `'a`.
        unsafe { self.push_raw(&raw[..len], value.tag()) }
    }

    /// Pop the top entry's bytes into `out` and return its tag.
    pub fn pop_raw(&mut self, out: &mut [u8]) -> FmtResult<TypeTag> {
        if self.type_top == 0 {
            return Err(FmtError::StackUnderflow);
        }
        let tag = TypeTag::from_raw(self.types[self.type_top - 1]).ok_or(FmtError::InvalidParameter)?;
        let size = tag.size();
        if out.len() < size {
            return Err(FmtError::BufferCapacity);
        }

        let start = self.data_top - size;
        copy_bytes(&mut out[..size], &self.data[start..self.data_top])?;
        self.type_top -= 1;
        self.data_top = start;
        Ok(tag)
    }

    /// Pop and decode the top entry.
    pub fn pop(&mut self) -> FmtResult<ArgValue<'a>> {
        let mut raw = [0u8; ARG_MAX_SIZE];
        let tag = self.pop_raw(&mut raw)?;
        // SAFETY: entries only arrive through `push` or `push_raw`, whose
        // contracts keep `Str` addresses valid for `'a`.
        Ok(unsafe { ArgValue::decode(tag, &raw) })
    }
}

/// Conversion of a Rust value into a stack entry.
pub trait IntoArg<'a> {
    fn into_arg(self) -> FmtResult<ArgValue<'a>>;
}

macro_rules! impl_into_arg {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> IntoArg<'a> for $ty {
                #[inline]
                fn into_arg(self) -> FmtResult<ArgValue<'a>> {
                    Ok(ArgValue::$variant(self))
                }
            }
        )*
    };
}

impl_into_arg! {
    i8 => I8, i16 => I16, i32 => I32, isize => Isize, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, usize => Usize, u64 => U64,
    f32 => F32, f64 => F64,
}

/// Only ASCII fits the one-byte character slot.
impl<'a> IntoArg<'a> for char {
    #[inline]
    fn into_arg(self) -> FmtResult<ArgValue<'a>> {
        if self.is_ascii() {
            Ok(ArgValue::Char(self as u8))
        } else {
            Err(FmtError::InvalidParameter)
        }
    }
}

impl<'a> IntoArg<'a> for &'a CStr {
    #[inline]
    fn into_arg(self) -> FmtResult<ArgValue<'a>> {
        Ok(ArgValue::Str(self))
    }
}

impl<'a, T> IntoArg<'a> for *const T {
    #[inline]
    fn into_arg(self) -> FmtResult<ArgValue<'a>> {
        Ok(ArgValue::Ptr(self.cast()))
    }
}

impl<'a, T> IntoArg<'a> for *mut T {
    #[inline]
    fn into_arg(self) -> FmtResult<ArgValue<'a>> {
        Ok(ArgValue::Ptr(self.cast_const().cast()))
    }
}

impl<'a> IntoArg<'a> for ArgValue<'a> {
    #[inline]
    fn into_arg(self) -> FmtResult<ArgValue<'a>> {
        Ok(self)
    }
}

/// Empty `stack` and return it; the innermost call of a builder chain.
#[inline]
pub fn start<'s, 'a, const N: usize>(stack: &'s mut ArgStack<'a, N>) -> &'s mut ArgStack<'a, N> {
    stack.init();
    stack
}

/// Push `value` and return the stack.
///
/// On a poisoned stack this does nothing. A failed push poisons it.
pub fn add<'s, 'a, T: IntoArg<'a>, const N: usize>(
    value: T,
    stack: &'s mut ArgStack<'a, N>,
) -> &'s mut ArgStack<'a, N> {
    if stack.error.is_some() {
        return stack;
    }
    if let Err(err) = value.into_arg().and_then(|v| stack.push(v)) {
        if err == FmtError::StackOverflow {
            klog_warn!("nanofmt: argument stack full ({} entries, {} bytes)", stack.len(), stack.bytes_used());
        }
        stack.error = Some(err);
    }
    stack
}

macro_rules! define_builders {
    ($($name:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Push a `", stringify!($name), "`; see [`add`].")]
                #[inline]
                pub fn [<arg_ $name>]<'s, 'a, const N: usize>(
                    value: $name,
                    stack: &'s mut ArgStack<'a, N>,
                ) -> &'s mut ArgStack<'a, N> {
                    add(value, stack)
                }
            )*
        }
    };
}

define_builders!(i8, i16, i32, isize, i64, u8, u16, u32, usize, u64, f32, f64, char);

/// Push a string; see [`add`].
#[inline]
pub fn arg_str<'s, 'a, const N: usize>(value: &'a CStr, stack: &'s mut ArgStack<'a, N>) -> &'s mut ArgStack<'a, N> {
    add(value, stack)
}

/// Push a pointer; see [`add`].
#[inline]
pub fn arg_ptr<'s, 'a, T, const N: usize>(value: *const T, stack: &'s mut ArgStack<'a, N>) -> &'s mut ArgStack<'a, N> {
    add(value, stack)
}

/// Build an argument chain: `args!(&mut stack, a, b, c)` is
/// `add(a, add(b, add(c, start(&mut stack))))`.
#[macro_export]
macro_rules! args {
    ($stack:expr $(,)?) => {
        $crate::stack::start($stack)
    };
    ($stack:expr, $first:expr $(, $rest:expr)* $(,)?) => {
        $crate::stack::add($first, $crate::args!($stack $(, $rest)*))
    };
}

/// A stack drained into argument order: index 0 is the outermost builder.
pub struct ArgList<'a, const N: usize = STACK_DEFAULT_SIZE> {
    values: [ArgValue<'a>; N],
    len: usize,
}

impl<'a, const N: usize> ArgList<'a, N> {
    /// Pop every entry of `stack`.
    ///
    /// A poisoned stack yields its recorded error and is left untouched.
    pub fn drain(stack: &mut ArgStack<'a, N>) -> FmtResult<Self> {
        if let Some(err) = stack.error {
            return Err(err);
        }
        let mut list = Self {
            values: [ArgValue::U8(0); N],
            len: 0,
        };
        while !stack.is_empty() {
            list.values[list.len] = stack.pop()?;
            list.len += 1;
        }
        Ok(list)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> FmtResult<ArgValue<'a>> {
        self.as_slice().get(index).copied().ok_or(FmtError::ArgumentIndex { index, len: self.len })
    }

    #[inline]
    pub fn as_slice(&self) -> &[ArgValue<'a>] {
        &self.values[..self.len]
    }
}
