use super::{TestConfig, TestResult, TestRunSummary, TestSuiteDesc, TestSuiteResult, Verbosity};
use crate::klog::{klog_get_level, klog_set_level};
use crate::{klog_error, klog_info};

/// Run one test and report it at the configured verbosity.
pub fn run_single_test<F>(config: &TestConfig, name: &str, test: F) -> TestResult
where
    F: FnOnce() -> TestResult,
{
    let result = test();
    match result {
        TestResult::Fail(site) => {
            if config.verbosity != Verbosity::Quiet {
                klog_error!("FAIL {} ({})", name, site);
            }
        }
        TestResult::Pass if config.verbosity == Verbosity::Verbose => {
            klog_info!("PASS {}", name);
        }
        TestResult::Skipped if config.verbosity == Verbosity::Verbose => {
            klog_info!("SKIP {}", name);
        }
        _ => {}
    }
    result
}

/// Run every suite in order, filling `summary`.
///
/// Returns `true` when no test failed. Nothing runs if the config is
/// disabled. A configured log level holds for the run and is restored
/// afterwards.
pub fn run_suites(config: &TestConfig, suites: &[&TestSuiteDesc], summary: &mut TestRunSummary) -> bool {
    *summary = TestRunSummary::default();
    if !config.enabled {
        return true;
    }

    let saved_level = klog_get_level();
    if let Some(level) = config.log_level {
        klog_set_level(level);
    }

    for desc in suites {
        let mut result = TestSuiteResult::new(desc.name);
        (desc.run)(config, &mut result);
        if config.verbosity != Verbosity::Quiet {
            klog_info!(
                "SUITE {}: {}/{} passed, {} skipped",
                result.name,
                result.passed,
                result.total,
                result.skipped
            );
        }
        summary.add_suite_result(&result);
    }

    if config.verbosity != Verbosity::Quiet {
        klog_info!(
            "TESTS: {}/{} passed, {} failed, {} skipped",
            summary.passed,
            summary.total_tests,
            summary.failed,
            summary.skipped
        );
    }
    klog_set_level(saved_level);
    summary.all_passed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailSite, SuiteRunnerFn};

    fn all_pass(_: &TestConfig, out: &mut TestSuiteResult) -> bool {
        out.record(TestResult::Pass);
        out.record(TestResult::Pass);
        true
    }

    fn one_fails(_: &TestConfig, out: &mut TestSuiteResult) -> bool {
        out.record(TestResult::Fail(FailSite { file: "x.rs", line: 7 }));
        false
    }

    fn desc(name: &'static str, run: SuiteRunnerFn) -> TestSuiteDesc {
        TestSuiteDesc { name, run }
    }

    #[test]
    fn disabled_config_runs_nothing() {
        let a = desc("a", one_fails);
        let mut summary = TestRunSummary::default();
        assert!(run_suites(&TestConfig::default(), &[&a], &mut summary));
        assert_eq!(summary.total_tests, 0);
    }

    #[test]
    fn aggregates_suites() {
        let cfg = TestConfig::enabled(Verbosity::Quiet);
        let a = desc("a", all_pass);
        let b = desc("b", one_fails);
        let mut summary = TestRunSummary::default();
        assert!(!run_suites(&cfg, &[&a, &b], &mut summary));
        assert_eq!((summary.total_tests, summary.passed, summary.failed), (3, 2, 1));
        assert_eq!(summary.suite_results()[1].name, "b");
        assert_eq!(summary.suite_results()[1].first_failure.map(|s| s.line), Some(7));
    }
}
