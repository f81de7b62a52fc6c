//! Assertion macros for `fn() -> TestResult` tests.
//!
//! A failed check logs what it saw and returns `TestResult::Fail` carrying
//! the file and line of the assertion.

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_failed {
    ($($arg:tt)*) => {{
        $crate::klog_info!($($arg)*);
        return $crate::fail_here!();
    }};
}

#[macro_export]
macro_rules! assert_test {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::__assert_failed!("ASSERT: {}", ::core::stringify!($cond));
        }
    };
    ($cond:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        if !$cond {
            $crate::__assert_failed!(::core::concat!("ASSERT: ", $fmt) $(, $arg)*);
        }
    };
}

#[macro_export]
macro_rules! assert_eq_test {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if *left != *right {
                    $crate::__assert_failed!("ASSERT_EQ: expected {:?}, got {:?}", right, left);
                }
            }
        }
    };
    ($left:expr, $right:expr, $ctx:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if *left != *right {
                    $crate::__assert_failed!("ASSERT_EQ ({}): expected {:?}, got {:?}", $ctx, right, left);
                }
            }
        }
    };
}

#[macro_export]
macro_rules! assert_ne_test {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if *left == *right {
                    $crate::__assert_failed!("ASSERT_NE: both are {:?}", left);
                }
            }
        }
    };
}

/// Unwrap an `Ok`, or fail the test with the error.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr $(,)?) => {
        match $result {
            Ok(v) => v,
            Err(e) => $crate::__assert_failed!("ASSERT_OK: got Err({:?})", e),
        }
    };
}

/// Expect exactly the error `$expected`.
#[macro_export]
macro_rules! assert_err {
    ($result:expr, $expected:expr $(,)?) => {
        match $result {
            Err(e) if e == $expected => {}
            Err(e) => $crate::__assert_failed!("ASSERT_ERR: expected {:?}, got Err({:?})", $expected, e),
            Ok(v) => $crate::__assert_failed!("ASSERT_ERR: expected {:?}, got Ok({:?})", $expected, v),
        }
    };
}
