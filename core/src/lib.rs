#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod format;
pub mod render;
pub mod spec;
pub mod stack;
pub mod typetag;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use format::{Status, format, format_status, format_with, print, print_to, print_to_with, print_with};
pub use render::{FLOAT_DEFAULT_PRECISION, RENDER_SCRATCH_SIZE};
pub use spec::{Align, FormatSpec, Presentation, Sign, SpecFlags};
pub use stack::{
    ARG_MAX_SIZE, ArgList, ArgStack, ArgValue, IntoArg, STACK_DEFAULT_SIZE, add, arg_char, arg_f32, arg_f64,
    arg_i8, arg_i16, arg_i32, arg_i64, arg_isize, arg_ptr, arg_str, arg_u8, arg_u16, arg_u32, arg_u64,
    arg_usize, start,
};
pub use typetag::TypeTag;

pub use nanofmt_lib::{FmtError, FmtResult, ParseReason};
