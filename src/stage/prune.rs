//! Removal of platform-inapplicable files from the build environment.
//!
//! The agent ships executable and state modules for every platform it
//! supports; the Windows installer must not carry the Unix-only ones.
//! Exclusions are glob patterns matched inside a single directory.

use anyhow::{bail, Context, Result};
use glob::glob;
use std::fs;
use std::path::Path;

use crate::config::BuildConfig;
use crate::defaults::{EXCLUDED_EXEC_MODULES, EXCLUDED_STATE_MODULES};

/// Delete every match of the two exclusion lists from the packaged
/// library tree. A pattern with no matches is a no-op; a match that
/// survives deletion is fatal.
pub fn prune_platform_files(config: &BuildConfig) -> Result<()> {
    let exec_removed = prune_patterns(&config.modules_dir(), EXCLUDED_EXEC_MODULES)?;
    let state_removed = prune_patterns(&config.states_dir(), EXCLUDED_STATE_MODULES)?;
    println!(
        "Pruned {} executable module(s), {} state module(s)",
        exec_removed, state_removed
    );
    Ok(())
}

/// Delete everything under `dir` matching any of `patterns`, then re-glob
/// to verify nothing matching remains. Returns the number of entries
/// removed. A missing directory means there is nothing to prune.
pub fn prune_patterns(dir: &Path, patterns: &[&str]) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for pattern in patterns {
        let full = dir.join(pattern);
        let full = full.to_string_lossy().into_owned();

        for entry in glob(&full).with_context(|| format!("Bad exclusion pattern {}", pattern))? {
            let path = entry?;
            if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            }
            .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed += 1;
        }

        // Post-condition: nothing matching the pattern may survive
        if let Some(survivor) = glob(&full)?.next() {
            bail!(
                "{} still present after pruning pattern {}",
                survivor?.display(),
                pattern
            );
        }
    }
    Ok(removed)
}
