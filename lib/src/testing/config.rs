//! Boot-argument switches for the on-target suites.

use crate::klog::KlogLevel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    /// Only the failing return value; nothing is logged.
    Quiet,
    /// One line per suite plus the totals.
    Summary,
    /// Also one line per test.
    Verbose,
}

impl Verbosity {
    pub fn from_str(value: &str) -> Self {
        match value {
            v if v.eq_ignore_ascii_case("quiet") => Verbosity::Quiet,
            v if v.eq_ignore_ascii_case("verbose") => Verbosity::Verbose,
            _ => Verbosity::Summary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Summary => "summary",
            Verbosity::Verbose => "verbose",
        }
    }
}

impl core::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestConfig {
    pub enabled: bool,
    pub verbosity: Verbosity,
    /// klog level to use while the suites run; `None` keeps the current one.
    pub log_level: Option<KlogLevel>,
}

impl TestConfig {
    pub const DISABLED: Self = Self {
        enabled: false,
        verbosity: Verbosity::Summary,
        log_level: None,
    };

    pub const fn enabled(verbosity: Verbosity) -> Self {
        Self {
            enabled: true,
            verbosity,
            log_level: None,
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::DISABLED
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    const TRUE: [&str; 5] = ["on", "true", "yes", "enabled", "1"];
    const FALSE: [&str; 5] = ["off", "false", "no", "disabled", "0"];

    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(value)) {
        Some(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(value)) {
        Some(false)
    } else {
        None
    }
}

/// Read test switches from a boot argument string.
///
/// Recognised tokens:
/// - `itests=<bool>`; any non-boolean value (`itests=all`) enables the suites
/// - `itests.verbosity=<quiet|summary|verbose>`
/// - `itests.log=<error|warn|info|debug|trace>`
///
/// Everything else belongs to the firmware and is ignored.
pub fn config_from_cmdline(cmdline: Option<&str>) -> TestConfig {
    let mut cfg = TestConfig::default();
    for token in cmdline.unwrap_or("").split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        match key {
            "itests" => cfg.enabled = parse_bool(value).unwrap_or(true),
            "itests.verbosity" => cfg.verbosity = Verbosity::from_str(value),
            "itests.log" => {
                if let Some(level) = KlogLevel::from_name(value) {
                    cfg.log_level = Some(level);
                }
            }
            _ => {}
        }
    }
    cfg
}
