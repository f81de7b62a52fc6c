#![no_std]

#[cfg(test)]
extern crate std;

pub mod error;
pub mod klog;
pub mod memory;
pub mod numfmt;
pub mod sink;
pub mod string;
pub mod testing;

#[doc(hidden)]
pub use paste;

pub use error::{FmtError, FmtResult, ParseReason};
pub use klog::{
    KlogLevel, klog_get_level, klog_init, klog_is_enabled, klog_register_backend, klog_set_level,
};
pub use numfmt::{FloatAttr, FloatMode, IntAttr, NumBuf, NumFlags};
pub use sink::{FnSink, Putchar, PutcharFn, Sink, register_putchar, unregister_putchar};
