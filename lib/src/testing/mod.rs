pub mod config;
pub mod harness;
mod runner;

mod assertions;
pub use config::{TestConfig, Verbosity, config_from_cmdline};
pub use harness::{HARNESS_MAX_SUITES, SuiteRunnerFn, TestRunSummary, TestSuiteDesc, TestSuiteResult};
pub use runner::{run_single_test, run_suites};

/// Where a failing assertion fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FailSite {
    pub file: &'static str,
    pub line: u32,
}

impl core::fmt::Display for FailSite {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail(FailSite),
    Skipped,
}

impl TestResult {
    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    #[inline]
    pub fn fail_site(&self) -> Option<FailSite> {
        match self {
            Self::Fail(site) => Some(*site),
            _ => None,
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! fail_here {
    () => {
        $crate::testing::TestResult::Fail($crate::testing::FailSite {
            file: ::core::file!(),
            line: ::core::line!(),
        })
    };
}

#[macro_export]
macro_rules! pass {
    () => {
        $crate::testing::TestResult::Pass
    };
}

#[macro_export]
macro_rules! fail {
    () => {
        $crate::fail_here!()
    };
    ($msg:expr) => {{
        $crate::klog_info!("TEST FAIL: {}", $msg);
        $crate::fail_here!()
    }};
    ($fmt:expr, $($arg:tt)*) => {{
        $crate::klog_info!(concat!("TEST FAIL: ", $fmt), $($arg)*);
        $crate::fail_here!()
    }};
}

#[macro_export]
macro_rules! run_test {
    ($config:expr, $result:expr, $test_fn:expr) => {{
        let result = $crate::testing::run_single_test($config, stringify!($test_fn), || $test_fn());
        $result.record(result);
        result
    }};

    ($config:expr, $test_fn:expr) => {{ $crate::testing::run_single_test($config, stringify!($test_fn), || $test_fn()) }};
}

/// Declare a suite of `fn() -> TestResult` tests.
///
/// Generates `run_<name>_suite` and a public `<NAME>_SUITE_DESC` descriptor
/// that a runner passes to [`run_suites`].
#[macro_export]
macro_rules! define_test_suite {
    ($suite_name:ident, [$($test_fn:path),* $(,)?]) => {
        $crate::paste::paste! {
            fn [<run_ $suite_name _suite>](
                config: &$crate::testing::TestConfig,
                out: &mut $crate::testing::TestSuiteResult,
            ) -> bool {
                *out = $crate::testing::TestSuiteResult::new(stringify!($suite_name));

                $(
                    $crate::run_test!(config, out, $test_fn);
                )*

                out.all_passed()
            }

            pub static [<$suite_name:upper _SUITE_DESC>]: $crate::testing::TestSuiteDesc = $crate::testing::TestSuiteDesc {
                name: stringify!($suite_name),
                run: [<run_ $suite_name _suite>],
            };
        }
    };
}
