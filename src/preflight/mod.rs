//! Preflight checks for the Relay installer build.
//!
//! Validates that the build environment is complete BEFORE any network or
//! compiler activity. Two entry points:
//!
//! - [`verify_build_env`] - fail-fast check used by the build pipeline;
//!   bails on the first missing prerequisite.
//! - [`PreflightChecker::run_all`] - full report with suggestions, printed
//!   by the `status` subcommand.

mod host_tools;
mod network;

pub use host_tools::check_host_tools;
pub use network::check_network;

use anyhow::{bail, Result};

use crate::config::BuildConfig;
use crate::defaults::NSIS_PATH_ENV;

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create a failing check result.
    pub fn fail(
        name: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

/// Comprehensive preflight report.
#[derive(Debug, Default)]
pub struct PreflightReport {
    /// All check results
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Check if all preflight checks passed.
    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Get all failing checks.
    pub fn errors(&self) -> Vec<&CheckResult> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// Get count of passing checks.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get total check count.
    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// Print a summary of the preflight checks.
    pub fn print_summary(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            let status = if check.passed { "[OK]" } else { "[FAIL]" };
            println!("{} {}: {}", status, check.name, check.message);
            if let Some(suggestion) = &check.suggestion {
                println!("     Suggestion: {}", suggestion);
            }
        }

        println!();
        if self.is_ok() {
            println!(
                "All preflight checks passed ({}/{})",
                self.passed_count(),
                self.total_count()
            );
        } else {
            println!(
                "Preflight checks failed: {} of {} passed",
                self.passed_count(),
                self.total_count()
            );
        }
    }
}

/// Preflight checker for the Relay installer build environment.
pub struct PreflightChecker<'a> {
    config: &'a BuildConfig,
}

impl<'a> PreflightChecker<'a> {
    /// Create a new preflight checker.
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    /// Run all preflight checks and return a comprehensive report.
    pub async fn run_all(&self) -> PreflightReport {
        let mut report = PreflightReport::default();

        // Build environment contents
        report.checks.extend(self.check_build_env());

        // Host tools
        report.checks.extend(check_host_tools(self.config));

        // Network (async)
        report.checks.push(check_network().await);

        report
    }

    /// Check the pre-populated build environment contents.
    fn check_build_env(&self) -> Vec<CheckResult> {
        let mut checks = Vec::new();
        let file_checks = [
            (
                "Interpreter",
                self.config.interpreter(),
                "Populate buildenv/ from an agent build before packaging",
            ),
            (
                "Agent binary",
                self.config.agent_binary(),
                "Build the agent binary into buildenv/ before packaging",
            ),
            (
                "Installer template",
                self.config.installer_template(),
                "The installer/ directory must contain the NSIS definition file",
            ),
            (
                "Agent config",
                self.config.conf_source(),
                "The conf/ directory must contain the shipped agent config",
            ),
        ];

        for (name, path, suggestion) in file_checks {
            if path.exists() {
                checks.push(CheckResult::pass(
                    name,
                    format!("Found at {}", path.display()),
                ));
            } else {
                checks.push(CheckResult::fail(
                    name,
                    format!("Not found at {}", path.display()),
                    suggestion,
                ));
            }
        }
        checks
    }
}

/// Fail-fast build environment verification, in the order the pipeline
/// depends on the pieces. Runs before any network or compiler activity.
pub fn verify_build_env(config: &BuildConfig) -> Result<()> {
    let interpreter = config.interpreter();
    if !interpreter.exists() {
        bail!(
            "Interpreter not found at {}.\n\
             Populate buildenv/ from an agent build before packaging.",
            interpreter.display()
        );
    }

    let agent = config.agent_binary();
    if !agent.exists() {
        bail!(
            "Pre-built agent binary not found at {}.\n\
             Build the agent binary into buildenv/ before packaging.",
            agent.display()
        );
    }

    if config.nsis_exe.is_none() {
        bail!(
            "NSIS compiler not found.\n\
             Install NSIS or point {} at makensis.",
            NSIS_PATH_ENV
        );
    }

    let template = config.installer_template();
    if !template.exists() {
        bail!(
            "Installer template not found at {}.",
            template.display()
        );
    }

    let conf = config.conf_source();
    if !conf.exists() {
        bail!("Agent config not found at {}.", conf.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Arch;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_result_pass() {
        let result = CheckResult::pass("test", "passed");
        assert!(result.passed);
        assert!(result.suggestion.is_none());
    }

    #[test]
    fn test_check_result_fail() {
        let result = CheckResult::fail("test", "failed", "fix it");
        assert!(!result.passed);
        assert!(result.suggestion.is_some());
    }

    #[test]
    fn test_preflight_report_is_ok() {
        let mut report = PreflightReport::default();
        assert!(report.is_ok()); // Empty is OK

        report.checks.push(CheckResult::pass("test1", "ok"));
        assert!(report.is_ok());

        report.checks.push(CheckResult::fail("test2", "bad", "fix"));
        assert!(!report.is_ok());
    }

    #[test]
    fn test_preflight_report_errors_lists_only_failures() {
        let mut report = PreflightReport::default();
        report.checks.push(CheckResult::pass("ok", "fine"));
        report.checks.push(CheckResult::fail("bad", "broken", "fix"));

        let errors = report.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].name, "bad");
    }

    #[test]
    fn test_verify_build_env_reports_interpreter_first() {
        let dir = tempdir().unwrap();
        let config = BuildConfig::new(dir.path(), "1.0.0".to_string(), Arch::Amd64);

        let err = verify_build_env(&config).unwrap_err();
        assert!(err.to_string().contains("Interpreter not found"));
    }

    #[test]
    fn test_verify_build_env_reports_agent_binary_second() {
        let dir = tempdir().unwrap();
        let config = BuildConfig::new(dir.path(), "1.0.0".to_string(), Arch::Amd64);

        fs::create_dir_all(config.interpreter().parent().unwrap()).unwrap();
        fs::write(config.interpreter(), b"").unwrap();

        let err = verify_build_env(&config).unwrap_err();
        assert!(err.to_string().contains("agent binary not found"));
    }
}
