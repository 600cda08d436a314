//! Product version resolution.
//!
//! The version names the final artifact. It is either supplied explicitly
//! on the command line or derived from `git describe` in the build
//! directory.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::process::Cmd;

/// Resolve the product version.
///
/// An explicit version wins; otherwise the build directory must be a git
/// checkout and the version comes from `git describe --tags`. An empty
/// version is fatal either way.
pub fn resolve_version(explicit: Option<String>, repo_dir: &Path) -> Result<String> {
    if let Some(version) = explicit {
        let version = normalize(&version);
        if version.is_empty() {
            bail!("Supplied version is empty");
        }
        return Ok(version);
    }

    let described = Cmd::new("git")
        .args(["describe", "--tags"])
        .current_dir(repo_dir)
        .error_msg("git describe failed. Is the build directory a git checkout with tags?")
        .run_capture()
        .context("Could not derive version from git")?;

    let version = normalize(&described);
    if version.is_empty() {
        bail!("git describe returned an empty version");
    }
    Ok(version)
}

/// Strip whitespace and a leading `v` tag prefix.
fn normalize(version: &str) -> String {
    let version = version.trim();
    version.strip_prefix('v').unwrap_or(version).to_string()
}
