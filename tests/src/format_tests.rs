//! Template formatting smoke tests against known-good output.

use nanofmt_core::{
    ArgStack, Config, FmtError, ParseReason, Status, add, arg_f32, arg_i32, args, format, format_status,
    format_with, start,
};
use nanofmt_lib::testing::TestResult;
use nanofmt_lib::{assert_eq_test, assert_err, assert_ok, pass};

pub fn test_array_templates() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut buf = [0u8; 64];

    let out = assert_ok!(format(&mut buf, "arr = [{}, {}, {}].\n", args!(&mut stack, 1, 2, 3)));
    assert_eq_test!(out, "arr = [1, 2, 3].\n");

    let out = assert_ok!(format(&mut buf, "arr = [{2:<d}, {0:<3d}, {1:<#5}].\n", args!(&mut stack, 1, 2, 3)));
    assert_eq_test!(out, "arr = [3, 1  , 2    ].\n");

    let out = assert_ok!(format(
        &mut buf,
        "arr = [{2:<.5d}, {0:*<3.3d}, {1:<#5.4}].\n",
        args!(&mut stack, 1, 2, 3)
    ));
    assert_eq_test!(out, "arr = [3, 1**, 2    ].\n");
    pass!()
}

pub fn test_positional_arguments() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut buf = [0u8; 64];

    let out = assert_ok!(format(&mut buf, "{2}, {0}, {1}", args!(&mut stack, 1, 2, 3)));
    assert_eq_test!(out, "3, 1, 2");

    let out = assert_ok!(format(&mut buf, "{0}{1}{0}", args!(&mut stack, c"abra", c"cad")));
    assert_eq_test!(out, "abracadabra");
    pass!()
}

pub fn test_field_specs() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut buf = [0u8; 64];

    let out = assert_ok!(format(&mut buf, "{:*^30}", args!(&mut stack, c"centered")));
    assert_eq_test!(out, "***********centered***********");

    let out = assert_ok!(format(&mut buf, "{0:x}", add(255, start(&mut stack))));
    assert_eq_test!(out, "ff");

    let out = assert_ok!(format(&mut buf, "{2:.2f}", arg_i32(1, arg_i32(2, arg_f32(3.14159, start(&mut stack))))));
    assert_eq_test!(out, "3.14");

    let out = assert_ok!(format(&mut buf, "{:05}", args!(&mut stack, -2)));
    assert_eq_test!(out, "-0002");

    let out = assert_ok!(format(&mut buf, "{:#.0f} {:#.0f}", args!(&mut stack, 0.0, 123.456)));
    assert_eq_test!(out, "0. 123.");

    let out = assert_ok!(format(&mut buf, "[{:^7}]", args!(&mut stack, c"ab")));
    assert_eq_test!(out, "[  ab   ]");
    pass!()
}

pub fn test_signed_zero_switch() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut buf = [0u8; 32];

    let out = assert_ok!(format(&mut buf, "{}", args!(&mut stack, -0.0)));
    assert_eq_test!(out, "-0.000000");

    let cfg = Config::DEFAULT.with_signed_zero(false);
    let out = assert_ok!(format_with(&cfg, &mut buf, "{}", args!(&mut stack, -0.0)));
    assert_eq_test!(out, "0.000000");
    pass!()
}

pub fn test_rejected_templates() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut buf = [0u8; 32];

    assert_err!(
        format(&mut buf, "{} }", args!(&mut stack, 1)),
        FmtError::Parse { offset: 3, reason: ParseReason::UnmatchedClose }
    );
    assert_eq_test!(buf[0], 0);
    assert_err!(
        format(&mut buf, "{:f}", args!(&mut stack, 1)),
        FmtError::Parse { offset: 0, reason: ParseReason::TypeMismatch }
    );
    assert_err!(
        format(&mut buf, "{1}", args!(&mut stack, 1)),
        FmtError::ArgumentIndex { index: 1, len: 1 }
    );
    pass!()
}

pub fn test_status_codes() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let mut sentinel: ArgStack = ArgStack::poisoned(FmtError::StackOverflow);
    let mut buf = [0u8; 32];

    assert_eq_test!(format_status(Some(&mut buf), Some("No!"), &mut sentinel), Status::Fail);
    assert_eq_test!(format_status(None, Some("No!"), start(&mut stack)), Status::ParamError);
    assert_eq_test!(format_status(Some(&mut buf), None, start(&mut stack)), Status::ParamError);
    assert_eq_test!(format_status(Some(&mut buf), Some("{}!"), args!(&mut stack, 9)), Status::Success);
    assert_eq_test!(&buf[..3], b"9!\0");
    pass!()
}

nanofmt_lib::define_test_suite!(
    format,
    [
        test_array_templates,
        test_positional_arguments,
        test_field_specs,
        test_signed_zero_switch,
        test_rejected_templates,
        test_status_codes,
    ]
);
