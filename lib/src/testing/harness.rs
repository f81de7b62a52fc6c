// Test harness types: TestSuiteResult, TestSuiteDesc, TestRunSummary.
// Suites are declared with define_test_suite! and handed to run_suites.

use super::{FailSite, TestConfig, TestResult};

/// Maximum number of suite results kept in a summary.
pub const HARNESS_MAX_SUITES: usize = 16;

/// Result of executing a single test suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestSuiteResult {
    pub name: &'static str,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub first_failure: Option<FailSite>,
}

impl Default for TestSuiteResult {
    fn default() -> Self {
        Self::new("")
    }
}

impl TestSuiteResult {
    /// Create a new result with just the suite name set.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            first_failure: None,
        }
    }

    /// Count one test outcome.
    pub fn record(&mut self, result: TestResult) {
        self.total = self.total.saturating_add(1);
        match result {
            TestResult::Pass => self.passed = self.passed.saturating_add(1),
            TestResult::Skipped => self.skipped = self.skipped.saturating_add(1),
            TestResult::Fail(site) => {
                self.failed = self.failed.saturating_add(1);
                if self.first_failure.is_none() {
                    self.first_failure = Some(site);
                }
            }
        }
    }

    /// Check if all tests in this suite passed or were skipped.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

pub type SuiteRunnerFn = fn(&TestConfig, &mut TestSuiteResult) -> bool;

#[derive(Clone, Copy)]
pub struct TestSuiteDesc {
    pub name: &'static str,
    pub run: SuiteRunnerFn,
}

/// Aggregated results from running all test suites.
#[derive(Clone, Copy, Debug)]
pub struct TestRunSummary {
    pub suites: [TestSuiteResult; HARNESS_MAX_SUITES],
    pub suite_count: usize,
    pub total_tests: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self {
            suites: [TestSuiteResult::default(); HARNESS_MAX_SUITES],
            suite_count: 0,
            total_tests: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
        }
    }
}

impl TestRunSummary {
    /// Add results from a single suite to the summary.
    ///
    /// Totals always accumulate; the per-suite slot is dropped once
    /// `HARNESS_MAX_SUITES` results are stored.
    pub fn add_suite_result(&mut self, result: &TestSuiteResult) {
        self.total_tests = self.total_tests.saturating_add(result.total);
        self.passed = self.passed.saturating_add(result.passed);
        self.failed = self.failed.saturating_add(result.failed);
        self.skipped = self.skipped.saturating_add(result.skipped);
        if let Some(slot) = self.suites.get_mut(self.suite_count) {
            *slot = *result;
            self.suite_count += 1;
        }
    }

    /// Results stored so far.
    pub fn suite_results(&self) -> &[TestSuiteResult] {
        &self.suites[..self.suite_count]
    }

    /// Check if all tests across all suites passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
