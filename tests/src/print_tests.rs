//! Sink output tests.

use nanofmt_core::{ArgStack, Config, FmtError, ParseReason, args, print, print_to, print_to_with};
use nanofmt_lib::sink::{FnSink, Sink, has_putchar};
use nanofmt_lib::testing::TestResult;
use nanofmt_lib::{FmtResult, assert_eq_test, assert_err, assert_ok, pass};

/// Collects emitted bytes into a fixed line buffer.
struct LineSink {
    buf: [u8; 96],
    len: usize,
}

impl LineSink {
    const fn new() -> Self {
        Self { buf: [0; 96], len: 0 }
    }

    fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Sink for LineSink {
    fn emit(&mut self, byte: u8) -> FmtResult {
        let slot = self.buf.get_mut(self.len).ok_or(FmtError::Io)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }
}

pub fn test_print_literals_and_ints() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut sink = LineSink::new();
    assert_ok!(print_to(&mut sink, "||{{Hello, World!}}__\n", args!(&mut stack)));
    assert_eq_test!(sink.bytes(), b"||{Hello, World!}__\n");

    let mut sink = LineSink::new();
    assert_ok!(print_to(&mut sink, "int a = {}\n", args!(&mut stack, 26471)));
    assert_eq_test!(sink.bytes(), b"int a = 26471\n");
    pass!()
}

pub fn test_print_rejects_before_output() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut sink = LineSink::new();
    assert_err!(
        print_to(&mut sink, "ok {} then {", args!(&mut stack, 1)),
        FmtError::Parse { offset: 11, reason: ParseReason::UnterminatedPlaceholder }
    );
    assert_eq_test!(sink.len, 0, "nothing emitted for a bad template");

    assert_err!(print_to(&mut sink, "{} {}", args!(&mut stack, 1)), FmtError::ArgumentIndex { index: 1, len: 1 });
    assert_eq_test!(sink.len, 0);
    pass!()
}

pub fn test_print_refusing_sink() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut budget = 4;
    let mut sink = FnSink(|_: u8| {
        if budget == 0 {
            return false;
        }
        budget -= 1;
        true
    });
    assert_err!(print_to(&mut sink, "value {}\n", args!(&mut stack, 7)), FmtError::Io);
    pass!()
}

pub fn test_print_signed_zero_switch() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut sink = LineSink::new();
    let cfg = Config::DEFAULT.with_signed_zero(false);
    assert_ok!(print_to_with(&cfg, &mut sink, "{:.1}", args!(&mut stack, -0.0f64)));
    assert_eq_test!(sink.bytes(), b"0.0");
    pass!()
}

pub fn test_print_registered_putchar() -> TestResult {
    if !has_putchar() {
        return TestResult::Skipped;
    }
    let mut stack: ArgStack = ArgStack::new();
    assert_ok!(print("print: {:>4}|{:<4}|\n", args!(&mut stack, 42, 'x')));
    pass!()
}

nanofmt_lib::define_test_suite!(
    print,
    [
        test_print_literals_and_ints,
        test_print_rejects_before_output,
        test_print_refusing_sink,
        test_print_signed_zero_switch,
        test_print_registered_putchar,
    ]
);
