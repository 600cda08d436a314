//! Host tool validation for the installer build.
//!
//! Checks that required external tools are installed and locatable.

use super::CheckResult;
use crate::config::BuildConfig;
use crate::defaults::NSIS_PATH_ENV;
use crate::process::which;

/// Check that all required host tools are available.
pub fn check_host_tools(config: &BuildConfig) -> Vec<CheckResult> {
    vec![check_nsis(config), check_git()]
}

/// The NSIS compiler is resolved by the config (env var, conventional
/// install locations, then `PATH`).
fn check_nsis(config: &BuildConfig) -> CheckResult {
    match &config.nsis_exe {
        Some(path) => CheckResult::pass(
            "NSIS compiler",
            format!("Found at {}", path.display()),
        ),
        None => CheckResult::fail(
            "NSIS compiler",
            "makensis not found",
            format!("Install NSIS or set {}", NSIS_PATH_ENV),
        ),
    }
}

/// git is only needed when the version is not supplied explicitly.
fn check_git() -> CheckResult {
    match which("git") {
        Some(path) => CheckResult::pass(
            "git tool",
            format!("Found at {} (version resolution)", path.display()),
        ),
        None => CheckResult::fail(
            "git tool",
            "Not found (needed for: version resolution without --version)",
            "Install git or pass --version explicitly",
        ),
    }
}
