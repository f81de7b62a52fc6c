//! Levelled logging for the runtime and its test harness.
//!
//! Every log line goes to one **backend** function pointer. If no backend is
//! registered, lines go out through the character sink ([`crate::sink`]), so
//! a board that only provides `putchar` still sees diagnostics.
//!
//! A backend gets the level and the pre-formatted arguments of one line. It
//! writes the text and a trailing newline. The sink fallback puts a
//! `<level>: ` tag in front of everything except `Info` lines.
//!
//! ```ignore
//! nanofmt_lib::klog::klog_register_backend(my_backend_fn);
//! nanofmt_lib::klog_warn!("stack full after {} arguments", n);
//! ```

use core::fmt;
use core::sync::atomic::{AtomicPtr, AtomicU8, Ordering};

use crate::sink;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl KlogLevel {
    pub const DEFAULT: Self = KlogLevel::Info;

    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => KlogLevel::Error,
            1 => KlogLevel::Warn,
            2 => KlogLevel::Info,
            3 => KlogLevel::Debug,
            _ => KlogLevel::Trace,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KlogLevel::Error => "error",
            KlogLevel::Warn => "warn",
            KlogLevel::Info => "info",
            KlogLevel::Debug => "debug",
            KlogLevel::Trace => "trace",
        }
    }

    /// Case-insensitive inverse of [`KlogLevel::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        [
            KlogLevel::Error,
            KlogLevel::Warn,
            KlogLevel::Info,
            KlogLevel::Debug,
            KlogLevel::Trace,
        ]
        .into_iter()
        .find(|level| level.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for KlogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(KlogLevel::DEFAULT as u8);

/// Write one line at `level`: the text, then a newline.
pub type KlogBackend = fn(KlogLevel, fmt::Arguments<'_>);

/// `null` selects the sink fallback.
static BACKEND: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

struct SinkWriter;

impl fmt::Write for SinkWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        sink::write_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

fn sink_backend(level: KlogLevel, args: fmt::Arguments<'_>) {
    use fmt::Write;

    let mut out = SinkWriter;
    let written = if level == KlogLevel::Info {
        out.write_fmt(args)
    } else {
        write!(out, "{}: {}", level, args)
    };
    // A refused byte drops the rest of the line.
    if written.is_ok() {
        let _ = sink::putchar(b'\n');
    }
}

fn current_backend() -> KlogBackend {
    let ptr = BACKEND.load(Ordering::Acquire);
    if ptr.is_null() {
        return sink_backend;
    }
    // SAFETY: only `klog_register_backend` stores into BACKEND, and it only
    // stores `KlogBackend` fn pointers, which have the size of `*mut ()`.
    unsafe { core::mem::transmute::<*mut (), KlogBackend>(ptr) }
}

/// Route every later line to `backend` instead of the sink.
pub fn klog_register_backend(backend: KlogBackend) {
    BACKEND.store(backend as *mut (), Ordering::Release);
}

/// Go back to the sink fallback.
pub fn klog_unregister_backend() {
    BACKEND.store(core::ptr::null_mut(), Ordering::Release);
}

/// Reset the level to [`KlogLevel::DEFAULT`].
pub fn klog_init() {
    klog_set_level(KlogLevel::DEFAULT);
}

pub fn klog_set_level(level: KlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn klog_get_level() -> KlogLevel {
    KlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

#[inline(always)]
pub fn klog_is_enabled(level: KlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

/// Emit one line at `level` if the level is enabled.
///
/// The backend adds the newline; format strings should not end with one.
pub fn log_args(level: KlogLevel, args: fmt::Arguments<'_>) {
    if klog_is_enabled(level) {
        current_backend()(level, args);
    }
}

#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {
        $crate::klog::log_args($level, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_error {
    ($($arg:tt)*) => { $crate::klog!($crate::klog::KlogLevel::Error, $($arg)*) };
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => { $crate::klog!($crate::klog::KlogLevel::Warn, $($arg)*) };
}

#[macro_export]
macro_rules! klog_info {
    ($($arg:tt)*) => { $crate::klog!($crate::klog::KlogLevel::Info, $($arg)*) };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => { $crate::klog!($crate::klog::KlogLevel::Debug, $($arg)*) };
}

#[macro_export]
macro_rules! klog_trace {
    ($($arg:tt)*) => { $crate::klog!($crate::klog::KlogLevel::Trace, $($arg)*) };
}
