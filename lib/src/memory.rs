//! Byte mover: block copy and overlap-tolerant move.
//!
//! The raw-pointer entry points mirror the libc contract (return `dst`,
//! accept null with a zero length). [`mem_move`] picks its own copy
//! direction from the relative position of the two regions instead of
//! deferring to `core::ptr::copy`, so it stays correct when linked into an
//! image whose `memmove` symbol is this very function.

use core::ops::Range;

use crate::error::{FmtError, FmtResult};

/// Copy `n` bytes from `src` to `dst`. The regions must not overlap.
///
/// # Safety
///
/// When `n > 0`, `src` must be valid for `n` reads, `dst` valid for `n`
/// writes, and the two ranges must be disjoint.
///
/// # Panics
///
/// Panics if `n > 0` and either pointer is null.
pub unsafe fn mem_copy(dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    if n == 0 {
        return dst;
    }
    assert!(!dst.is_null() && !src.is_null(), "mem_copy: null pointer with non-zero length");

    let mut i = 0;
    while i < n {
        // SAFETY: caller guarantees both ranges cover `n` bytes.
        unsafe { *dst.add(i) = *src.add(i) };
        i += 1;
    }
    dst
}

/// Move `n` bytes from `src` to `dst`; the regions may overlap.
///
/// The result equals copying `src` into a temporary first and then into
/// `dst`.
///
/// # Safety
///
/// When `n > 0`, `src` must be valid for `n` reads and `dst` valid for `n`
/// writes.
///
/// # Panics
///
/// Panics if `n > 0` and either pointer is null.
pub unsafe fn mem_move(dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    if n == 0 {
        return dst;
    }
    assert!(!dst.is_null() && !src.is_null(), "mem_move: null pointer with non-zero length");
    if core::ptr::eq(dst as *const u8, src) {
        return dst;
    }

    if (dst as usize) < (src as usize) {
        // Destination below source: front-to-back never clobbers unread bytes.
        let mut i = 0;
        while i < n {
            // SAFETY: both ranges are valid for `n` bytes per the contract.
            unsafe { *dst.add(i) = *src.add(i) };
            i += 1;
        }
    } else {
        let mut i = n;
        while i > 0 {
            i -= 1;
            // SAFETY: as above.
            unsafe { *dst.add(i) = *src.add(i) };
        }
    }
    dst
}

/// Copy all of `src` into the front of `dst`.
///
/// Returns the number of bytes copied, or [`FmtError::BufferCapacity`] if
/// `dst` is shorter than `src`.
pub fn copy_bytes(dst: &mut [u8], src: &[u8]) -> FmtResult<usize> {
    if src.len() > dst.len() {
        return Err(FmtError::BufferCapacity);
    }
    // SAFETY: `dst` and `src` are distinct borrows, so they cannot overlap,
    // and both cover `src.len()` bytes.
    unsafe { mem_copy(dst.as_mut_ptr(), src.as_ptr(), src.len()) };
    Ok(src.len())
}

/// Move `buf[src]` so that it starts at `buf[dest]`, tolerating overlap.
pub fn move_within(buf: &mut [u8], src: Range<usize>, dest: usize) -> FmtResult {
    if src.start > src.end || src.end > buf.len() {
        return Err(FmtError::InvalidParameter);
    }
    let n = src.end - src.start;
    if dest > buf.len() || buf.len() - dest < n {
        return Err(FmtError::BufferCapacity);
    }
    let base = buf.as_mut_ptr();
    // SAFETY: both ranges were bounds-checked against `buf` above.
    unsafe { mem_move(base.add(dest), base.add(src.start), n) };
    Ok(())
}
