//! Character output sink.
//!
//! Print-style output leaves the runtime one byte at a time through a
//! `putchar`-like function supplied by the firmware image (UART transmit,
//! semihosting, a RAM log, ...). The image registers it once with
//! [`register_putchar`]; until then every character is refused.
//!
//! Code that wants a specific destination instead of the registered one
//! implements [`Sink`] directly.

use core::sync::atomic::{AtomicPtr, Ordering};

use crate::error::{FmtError, FmtResult};

/// Emit one byte; return `false` if the byte could not be written.
pub type PutcharFn = fn(u8) -> bool;

/// Stored as a raw pointer; `null` means "no sink registered".
static PUTCHAR: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

/// Install the board's character output function.
pub fn register_putchar(putchar: PutcharFn) {
    PUTCHAR.store(putchar as *mut (), Ordering::Release);
}

/// Remove the registered function; later output fails with [`FmtError::Io`].
pub fn unregister_putchar() {
    PUTCHAR.store(core::ptr::null_mut(), Ordering::Release);
}

#[inline]
pub fn has_putchar() -> bool {
    !PUTCHAR.load(Ordering::Acquire).is_null()
}

/// Write one byte through the registered function.
#[inline]
pub fn putchar(byte: u8) -> FmtResult {
    let ptr = PUTCHAR.load(Ordering::Acquire);
    if ptr.is_null() {
        return Err(FmtError::Io);
    }
    // SAFETY: `register_putchar` only stores valid `PutcharFn` pointers,
    // which are the same size as `*mut ()` on all supported targets.
    let putchar: PutcharFn = unsafe { core::mem::transmute(ptr) };
    if putchar(byte) { Ok(()) } else { Err(FmtError::Io) }
}

/// Write `bytes` through the registered function, stopping at the first
/// refused byte.
pub fn write_bytes(bytes: &[u8]) -> FmtResult {
    for &b in bytes {
        putchar(b)?;
    }
    Ok(())
}

/// A destination that accepts one byte at a time.
pub trait Sink {
    fn emit(&mut self, byte: u8) -> FmtResult;

    fn emit_all(&mut self, bytes: &[u8]) -> FmtResult {
        for &b in bytes {
            self.emit(b)?;
        }
        Ok(())
    }

    /// Emit `bytes` `count` times in a row (padding).
    ///
    /// Sinks that can settle the outcome without looping, such as a
    /// fixed buffer or a discarding sink, should override this so a huge
    /// field width costs nothing.
    fn emit_repeat(&mut self, bytes: &[u8], count: usize) -> FmtResult {
        for _ in 0..count {
            self.emit_all(bytes)?;
        }
        Ok(())
    }
}

/// The registered `putchar` function as a [`Sink`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Putchar;

impl Sink for Putchar {
    #[inline]
    fn emit(&mut self, byte: u8) -> FmtResult {
        putchar(byte)
    }
}

/// Any `FnMut(u8) -> bool` callback is a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(u8) -> bool> Sink for FnSink<F> {
    #[inline]
    fn emit(&mut self, byte: u8) -> FmtResult {
        if (self.0)(byte) { Ok(()) } else { Err(FmtError::Io) }
    }
}
