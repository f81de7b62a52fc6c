//! Argument stack smoke tests.

use nanofmt_core::{
    ArgList, ArgStack, ArgValue, TypeTag, add, arg_char, arg_f32, arg_f64, arg_i16, arg_i32, arg_isize, arg_ptr,
    arg_str, start,
};
use nanofmt_lib::testing::TestResult;
use nanofmt_lib::{FmtError, assert_eq_test, assert_err, assert_ok, assert_test, pass};

/// Push one of every category, pop back in reverse.
pub fn test_stack_mixed_round_trip() -> TestResult {
    let target = 0x5A5Au32;
    let ptr: *const u32 = &target;
    let text = c"Hello";

    let mut stack: ArgStack = ArgStack::new();
    arg_str(
        text,
        arg_ptr(
            ptr,
            arg_f64(2.0, arg_f32(15.0, arg_isize(-0x2542, arg_i32(0x2A2A, arg_i16(0x12C, arg_char('h', start(&mut stack))))))),
        ),
    );
    assert_test!(!stack.is_poisoned(), "builder chain poisoned the stack");
    assert_eq_test!(stack.len(), 8);

    assert_eq_test!(assert_ok!(stack.pop()), ArgValue::Str(text));
    assert_eq_test!(assert_ok!(stack.pop()), ArgValue::Ptr(ptr.cast()));
    assert_eq_test!(assert_ok!(stack.pop()), ArgValue::F64(2.0));
    assert_eq_test!(assert_ok!(stack.pop()), ArgValue::F32(15.0));
    assert_eq_test!(assert_ok!(stack.pop()), ArgValue::Isize(-0x2542));
    assert_eq_test!(assert_ok!(stack.pop()), ArgValue::I32(0x2A2A));
    assert_eq_test!(assert_ok!(stack.pop()), ArgValue::I16(0x12C));
    assert_eq_test!(assert_ok!(stack.pop()), ArgValue::Char(b'h'));
    assert_err!(stack.pop(), FmtError::StackUnderflow);
    pass!()
}

pub fn test_stack_raw_bytes() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let word = 0xDEAD_BEEFu32.to_ne_bytes();
    // SAFETY: a U32 tag accepts any bit pattern.
    assert_ok!(unsafe { stack.push_raw(&word, TypeTag::U32) });
    assert_eq_test!(stack.bytes_used(), 4);

    let mut out = [0u8; 8];
    assert_eq_test!(assert_ok!(stack.pop_raw(&mut out)), TypeTag::U32);
    assert_eq_test!(&out[..4], &word[..]);
    assert_eq_test!(stack.bytes_used(), 0);
    pass!()
}

pub fn test_stack_overflow_poisons_chain() -> TestResult {
    let mut stack: ArgStack<'_, 8> = ArgStack::new();
    add(3u8, add(2u64, add(1u64, start(&mut stack))));
    assert_eq_test!(stack.error(), Some(FmtError::StackOverflow));
    assert_eq_test!(stack.len(), 1);
    assert_test!(ArgList::drain(&mut stack).is_err(), "poisoned stack drained");

    start(&mut stack);
    assert_test!(!stack.is_poisoned(), "start did not clear the error");
    pass!()
}

pub fn test_builder_order_is_argument_order() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    let list = assert_ok!(ArgList::drain(add(1, add(2, add(3, start(&mut stack))))));
    assert_eq_test!(list.as_slice(), &[ArgValue::I32(1), ArgValue::I32(2), ArgValue::I32(3)][..]);
    assert_test!(stack.is_empty());
    pass!()
}

pub fn test_non_ascii_char_rejected() -> TestResult {
    let mut stack: ArgStack = ArgStack::new();
    arg_char('ß', start(&mut stack));
    assert_eq_test!(stack.error(), Some(FmtError::InvalidParameter));
    pass!()
}

nanofmt_lib::define_test_suite!(
    stack,
    [
        test_stack_mixed_round_trip,
        test_stack_raw_bytes,
        test_stack_overflow_poisons_chain,
        test_builder_order_is_argument_order,
        test_non_ascii_char_rejected,
    ]
);
