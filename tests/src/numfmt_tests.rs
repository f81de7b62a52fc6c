//! Converter and string primitive smoke tests.

use core::cmp::Ordering;

use nanofmt_lib::memory::move_within;
use nanofmt_lib::numfmt::{FloatAttr, IntAttr, NumBuf, NumFlags};
use nanofmt_lib::string::{atoi, str_cat, str_cmp, str_copy, str_len};
use nanofmt_lib::testing::TestResult;
use nanofmt_lib::{assert_eq_test, assert_ok, pass};

pub fn test_int_zero_every_base() -> TestResult {
    let mut buf = NumBuf::<8>::new();
    for base in 2..=16u8 {
        for upper in [false, true] {
            let attr = IntAttr::new(base).upper(upper);
            assert_eq_test!(assert_ok!(buf.format_i64(0, &attr)), b"0", base);
        }
    }
    pass!()
}

pub fn test_int_extremes() -> TestResult {
    let mut buf = NumBuf::<72>::new();
    let hex = IntAttr::new(16).upper(true);
    assert_eq_test!(assert_ok!(buf.format_i64(i32::MIN as i64, &hex)), b"-80000000");

    let text = assert_ok!(buf.format_i64(i32::MIN as i64, &IntAttr::new(2)));
    assert_eq_test!(text.len(), 33, "sign plus 32 digits");
    assert_eq_test!(&text[..2], b"-1");
    assert_eq_test!(text[2..].iter().all(|&b| b == b'0'), true);

    assert_eq_test!(assert_ok!(buf.format_i64(-12345, &IntAttr::DECIMAL)), b"-12345");
    assert_eq_test!(assert_ok!(buf.format_u64(4294967295, &IntAttr::new(8))), b"37777777777");
    pass!()
}

pub fn test_int_precision_pads_digits() -> TestResult {
    let mut buf = NumBuf::<16>::new();
    let attr = IntAttr::DECIMAL.with_precision(4);
    assert_eq_test!(assert_ok!(buf.format_i64(-7, &attr)), b"-0007");
    assert_eq_test!(assert_ok!(buf.format_i64(123456, &attr)), b"123456");
    pass!()
}

pub fn test_float_rounding() -> TestResult {
    let mut buf = NumBuf::<32>::new();
    assert_eq_test!(assert_ok!(buf.format_f64(2.61734536, &FloatAttr::fixed(5))), b"2.61734");
    assert_eq_test!(assert_ok!(buf.format_f64(2.61737536, &FloatAttr::fixed(5))), b"2.61738");
    assert_eq_test!(assert_ok!(buf.format_f64(123.456, &FloatAttr::fixed(2))), b"123.46");
    assert_eq_test!(assert_ok!(buf.format_f64(123.456, &FloatAttr::fixed(1))), b"123.4");
    assert_eq_test!(assert_ok!(buf.format_f64(9.96, &FloatAttr::fixed(1))), b"10.0");
    assert_eq_test!(assert_ok!(buf.format_f64(-0.0, &FloatAttr::fixed(6))), b"0.000000");
    pass!()
}

pub fn test_float_flags() -> TestResult {
    let mut buf = NumBuf::<32>::new();
    let keep = FloatAttr::fixed(0).with_flags(NumFlags::KEEP_POINT);
    assert_eq_test!(assert_ok!(buf.format_f64(0.0, &keep)), b"0.");
    assert_eq_test!(assert_ok!(buf.format_f64(123.456, &keep)), b"123.");

    let upper = FloatAttr::fixed(2).with_flags(NumFlags::UPPER_CASE);
    assert_eq_test!(assert_ok!(buf.format_f64(f64::NEG_INFINITY, &upper)), b"-INF");
    assert_eq_test!(assert_ok!(buf.format_f64(3.0, &FloatAttr::general(6))), b"3");
    pass!()
}

pub fn test_string_primitives() -> TestResult {
    let mut dest = [0u8; 32];
    assert_eq_test!(assert_ok!(str_copy(&mut dest, b"Hello, \0")), 7);
    assert_eq_test!(assert_ok!(str_cat(&mut dest, b"World!\0")), 13);
    assert_eq_test!(str_len(&dest), 13);
    assert_eq_test!(str_cmp(&dest, b"Hello, World!\0"), Ordering::Equal);
    assert_eq_test!(str_cmp(b"Hello\0", b"Hello, World!\0"), Ordering::Less);

    assert_eq_test!(atoi(b"-0123"), (-123, 5));
    assert_eq_test!(atoi(b"65431-0"), (65431, 5));
    assert_eq_test!(atoi(b"--0"), (0, 0));
    pass!()
}

pub fn test_overlapping_move() -> TestResult {
    let mut buf = *b"0123456789";
    assert_ok!(move_within(&mut buf, 0..6, 3));
    assert_eq_test!(&buf, b"0120123459");
    assert_ok!(move_within(&mut buf, 3..9, 0));
    assert_eq_test!(&buf, b"0123453459");
    pass!()
}

nanofmt_lib::define_test_suite!(
    numfmt,
    [
        test_int_zero_every_base,
        test_int_extremes,
        test_int_precision_pads_digits,
        test_float_rounding,
        test_float_flags,
        test_string_primitives,
        test_overlapping_move,
    ]
);
