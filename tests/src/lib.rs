//! On-target smoke suites for the format engine.
//!
//! A firmware image links this crate, registers its `putchar`, and calls
//! [`tests_run_all`] with a config read from its boot arguments. Results are
//! logged through klog and returned in a [`TestRunSummary`].

#![no_std]

#[cfg(test)]
extern crate std;

use nanofmt_lib::klog_info;
pub use nanofmt_lib::testing::{
    HARNESS_MAX_SUITES, TestConfig, TestRunSummary, TestSuiteDesc, TestSuiteResult, Verbosity,
    config_from_cmdline,
};

pub mod format_tests;
pub mod numfmt_tests;
pub mod print_tests;
pub mod stack_tests;

/// Every suite, in run order.
pub static ALL_SUITES: [&TestSuiteDesc; 4] = [
    &numfmt_tests::NUMFMT_SUITE_DESC,
    &stack_tests::STACK_SUITE_DESC,
    &format_tests::FORMAT_SUITE_DESC,
    &print_tests::PRINT_SUITE_DESC,
];

/// Run all registered suites; returns `true` when nothing failed.
pub fn tests_run_all(config: &TestConfig, summary: &mut TestRunSummary) -> bool {
    if !config.enabled {
        klog_info!("TESTS: Harness disabled");
        *summary = TestRunSummary::default();
        return true;
    }
    klog_info!("TESTS: Starting test suites");
    nanofmt_lib::testing::run_suites(config, &ALL_SUITES, summary)
}

/// Parse `cmdline` and run the suites it enables.
pub fn tests_run_from_cmdline(cmdline: Option<&str>, summary: &mut TestRunSummary) -> bool {
    let config = config_from_cmdline(cmdline);
    tests_run_all(&config, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanofmt_lib::sink::{register_putchar, unregister_putchar};
    use std::string::String;

    static LOCK: spin::Mutex<()> = spin::Mutex::new(());

    struct Captured {
        buf: [u8; 8192],
        len: usize,
    }

    static CAPTURED: spin::Mutex<Captured> = spin::Mutex::new(Captured { buf: [0; 8192], len: 0 });

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

    fn run_captured(cmdline: &str) -> (bool, TestRunSummary, String) {
        let _guard = LOCK.lock();
        CAPTURED.lock().len = 0;
        register_putchar(capture_putchar);
        let mut summary = TestRunSummary::default();
        let ok = tests_run_from_cmdline(Some(cmdline), &mut summary);
        unregister_putchar();

        let cap = CAPTURED.lock();
        let log = String::from_utf8_lossy(&cap.buf[..cap.len]).into_owned();
        (ok, summary, log)
    }

    #[test]
    fn all_suites_pass_on_host() {
        let (ok, summary, log) = run_captured("console=uart itests=on");
        assert!(ok, "suite log:\n{}", log);
        assert_eq!(summary.suite_count, ALL_SUITES.len());
        assert_eq!(summary.failed, 0);
        assert!(summary.total_tests > 0);
        assert!(log.contains("SUITE format:"), "{}", log);
        assert!(log.contains("TESTS: "), "{}", log);
    }

    #[test]
    fn verbose_run_lists_each_test() {
        let (ok, summary, log) = run_captured("itests=on itests.verbosity=verbose itests.log=debug");
        assert!(ok, "suite log:\n{}", log);
        assert!(log.contains("PASS test_float_rounding"), "{}", log);
        assert!(log.contains("PASS test_print_registered_putchar"), "{}", log);
        assert!(log.contains("debug: nanofmt: template rejected"), "{}", log);
        assert_eq!(summary.skipped, 0);
        assert_eq!(nanofmt_lib::klog_get_level(), nanofmt_lib::KlogLevel::Info);
    }

    #[test]
    fn disabled_by_default() {
        let (ok, summary, log) = run_captured("quiet");
        assert!(ok);
        assert_eq!(summary.total_tests, 0);
        assert!(log.contains("Harness disabled"));
    }
}
