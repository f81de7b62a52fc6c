//! Template formatting entry points.
//!
//! Every entry point drains the argument stack into an [`ArgList`], walks
//! the template once and writes literal runs and rendered placeholders in
//! order. Placeholders without an index take the next implicit one; the
//! implicit counter ignores explicit indices.

use nanofmt_lib::memory::copy_bytes;
use nanofmt_lib::sink::{Putchar, Sink};
use nanofmt_lib::{FmtError, FmtResult, klog_debug};

use crate::config::Config;
use crate::render::render;
use crate::spec::{Piece, Pieces};
use crate::stack::{ArgList, ArgStack};

/// Outcome of [`format_status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    Fail,
    /// A required input was missing or invalid.
    ParamError,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl<T> From<FmtResult<T>> for Status {
    fn from(result: FmtResult<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(FmtError::InvalidParameter) => Status::ParamError,
            Err(_) => Status::Fail,
        }
    }
}

/// Writes into a byte buffer, keeping one byte free for the terminator.
struct BufWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl Sink for BufWriter<'_> {
    fn emit(&mut self, byte: u8) -> FmtResult {
        self.emit_all(&[byte])
    }

    fn emit_all(&mut self, bytes: &[u8]) -> FmtResult {
        let end = self.len + bytes.len();
        if end >= self.buf.len() {
            return Err(FmtError::BufferCapacity);
        }
        copy_bytes(&mut self.buf[self.len..end], bytes)?;
        self.len = end;
        Ok(())
    }

    fn emit_repeat(&mut self, bytes: &[u8], count: usize) -> FmtResult {
        let room = self.buf.len() - 1 - self.len;
        match bytes.len().checked_mul(count) {
            Some(total) if total <= room => {}
            _ => return Err(FmtError::BufferCapacity),
        }
        for _ in 0..count {
            self.emit_all(bytes)?;
        }
        Ok(())
    }
}

/// Accepts and drops everything; used to validate before printing.
struct Discard;

impl Sink for Discard {
    #[inline]
    fn emit(&mut self, _byte: u8) -> FmtResult {
        Ok(())
    }

    #[inline]
    fn emit_all(&mut self, _bytes: &[u8]) -> FmtResult {
        Ok(())
    }

    #[inline]
    fn emit_repeat(&mut self, _bytes: &[u8], _count: usize) -> FmtResult {
        Ok(())
    }
}

fn at_placeholder(err: FmtError, offset: usize) -> FmtError {
    match err {
        FmtError::Parse { reason, .. } => FmtError::Parse { offset, reason },
        other => other,
    }
}

fn write_template<S: Sink + ?Sized, const N: usize>(
    cfg: &Config,
    out: &mut S,
    template: &str,
    list: &ArgList<'_, N>,
) -> FmtResult {
    let mut implicit = 0;
    for piece in Pieces::new(template) {
        match piece? {
            Piece::Literal(text) => out.emit_all(text.as_bytes())?,
            Piece::Placeholder(ph) => {
                let index = ph.index.unwrap_or_else(|| {
                    implicit += 1;
                    implicit - 1
                });
                let value = list.get(index)?;
                render(value, &ph.spec, cfg, out).map_err(|err| at_placeholder(err, ph.offset))?;
            }
        }
    }
    Ok(())
}

fn log_reject(err: &FmtError) {
    if matches!(err, FmtError::Parse { .. } | FmtError::ArgumentIndex { .. }) {
        klog_debug!("nanofmt: template rejected: {}", err);
    }
}

/// Format into `dst` and NUL-terminate.
///
/// Returns the text written (terminator excluded). On any error `dst`
/// holds an empty string and nothing else is guaranteed about its
/// contents. The stack is drained either way unless it was poisoned.
pub fn format<'b, const N: usize>(dst: &'b mut [u8], template: &str, args: &mut ArgStack<'_, N>) -> FmtResult<&'b str> {
    format_with(&Config::DEFAULT, dst, template, args)
}

/// [`format`] with explicit runtime switches.
pub fn format_with<'b, const N: usize>(
    cfg: &Config,
    dst: &'b mut [u8],
    template: &str,
    args: &mut ArgStack<'_, N>,
) -> FmtResult<&'b str> {
    if dst.is_empty() {
        return Err(FmtError::BufferCapacity);
    }

    let mut writer = BufWriter { buf: &mut *dst, len: 0 };
    let result = ArgList::drain(args).and_then(|list| write_template(cfg, &mut writer, template, &list));
    let len = writer.len;

    match result {
        Ok(()) => {
            dst[len] = 0;
            core::str::from_utf8(&dst[..len]).map_err(|_| FmtError::InvalidParameter)
        }
        Err(err) => {
            log_reject(&err);
            dst[0] = 0;
            Err(err)
        }
    }
}

/// Format through the registered `putchar`.
pub fn print<const N: usize>(template: &str, args: &mut ArgStack<'_, N>) -> FmtResult {
    print_to_with(&Config::DEFAULT, &mut Putchar, template, args)
}

/// [`print`] with explicit runtime switches.
pub fn print_with<const N: usize>(cfg: &Config, template: &str, args: &mut ArgStack<'_, N>) -> FmtResult {
    print_to_with(cfg, &mut Putchar, template, args)
}

/// Format into an explicit sink.
pub fn print_to<S: Sink + ?Sized, const N: usize>(sink: &mut S, template: &str, args: &mut ArgStack<'_, N>) -> FmtResult {
    print_to_with(&Config::DEFAULT, sink, template, args)
}

/// [`print_to`] with explicit runtime switches.
///
/// The whole template is checked before the first byte is emitted, so a
/// template or argument error produces no output. A sink failure
/// ([`FmtError::Io`]) can leave a partial line behind.
///
/// The check pass skips padding, so a huge width costs nothing until the
/// real sink starts receiving fill bytes.
pub fn print_to_with<S: Sink + ?Sized, const N: usize>(
    cfg: &Config,
    sink: &mut S,
    template: &str,
    args: &mut ArgStack<'_, N>,
) -> FmtResult {
    let result = ArgList::drain(args).and_then(|list| {
        write_template(cfg, &mut Discard, template, &list)?;
        write_template(cfg, sink, template, &list)
    });
    if let Err(err) = &result {
        log_reject(err);
    }
    result
}

/// Status-code flavour of [`format`] for callers holding optional inputs.
///
/// A missing destination or template is [`Status::ParamError`].
pub fn format_status<const N: usize>(dst: Option<&mut [u8]>, template: Option<&str>, args: &mut ArgStack<'_, N>) -> Status {
    let (Some(dst), Some(template)) = (dst, template) else {
        return Status::ParamError;
    };
    format(dst, template, args).into()
}
