//! Network connectivity check for the installer build.
//!
//! Verifies the prerequisite mirror is reachable before starting downloads.

use std::time::Duration;

use super::CheckResult;
use crate::download;

/// Check network connectivity to the prerequisite mirror.
///
/// Performs a HEAD request against the mirror base URL. Any HTTP response
/// counts as reachable; only connection-level failures fail the check.
pub async fn check_network() -> CheckResult {
    let base = download::base_url();

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::fail(
                "Network",
                format!("Failed to build HTTP client: {}", e),
                "This is a local TLS configuration problem, not a mirror outage",
            )
        }
    };

    match client.head(&base).send().await {
        Ok(_) => CheckResult::pass("Network", format!("Mirror reachable ({})", base)),
        Err(e) => CheckResult::fail(
            "Network",
            format!("Mirror unreachable ({}): {}", base, e),
            "Check your internet connection or try again later",
        ),
    }
}
