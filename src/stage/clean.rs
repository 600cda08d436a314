//! Removal of prior staging artifacts.

use anyhow::{bail, Context, Result};
use std::fs;

use crate::config::BuildConfig;

/// Remove the configuration output and prerequisites directories left by
/// a previous run, then verify both are gone. Already-absent directories
/// are fine.
pub fn clean_staging(config: &BuildConfig) -> Result<()> {
    for dir in [&config.config_dir, &config.prereq_dir] {
        if dir.exists() {
            println!("Removing {}...", dir.display());
            fs::remove_dir_all(dir)
                .with_context(|| format!("Failed to remove {}", dir.display()))?;
        }

        if dir.exists() {
            bail!(
                "{} still present after removal.\n\
                 Is another build holding it open?",
                dir.display()
            );
        }
    }
    Ok(())
}
