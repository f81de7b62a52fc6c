//! Capture of the global `putchar` for host tests.

use std::string::String;

use nanofmt_lib::sink::{register_putchar, unregister_putchar};

/// Held by every test that registers a `putchar` or may log through it.
pub static SINK_LOCK: spin::Mutex<()> = spin::Mutex::new(());

struct Captured {
    buf: [u8; 512],
    len: usize,
}

static CAPTURED: spin::Mutex<Captured> = spin::Mutex::new(Captured { buf: [0; 512], len: 0 });

fn capture_putchar(byte: u8) -> bool {
    let mut cap = CAPTURED.lock();
    let len = cap.len;
    match cap.buf.get_mut(len) {
        Some(slot) => {
            *slot = byte;
            cap.len += 1;
            true
        }
        None => false,
    }
}

/// Run `f` with output captured; returns its result and the text.
pub fn with_captured_putchar<R>(f: impl FnOnce() -> R) -> (R, String) {
    let _guard = SINK_LOCK.lock();
    CAPTURED.lock().len = 0;
    register_putchar(capture_putchar);
    let result = f();
    unregister_putchar();

    let cap = CAPTURED.lock();
    (result, String::from_utf8_lossy(&cap.buf[..cap.len]).into_owned())
}
