//! Configuration staging.

use anyhow::{bail, Context, Result};
use std::fs;

use crate::config::BuildConfig;
use crate::defaults::CONFIG_FILE;

/// Create the configuration output directory and copy the shipped agent
/// config into it, then verify the copy landed.
pub fn stage_config(config: &BuildConfig) -> Result<()> {
    let source = config.conf_source();
    if !source.exists() {
        bail!("Agent config not found at {}.", source.display());
    }

    fs::create_dir_all(&config.config_dir)
        .with_context(|| format!("Failed to create {}", config.config_dir.display()))?;

    let dest = config.config_dir.join(CONFIG_FILE);
    println!("Staging {} -> {}", source.display(), dest.display());
    fs::copy(&source, &dest)
        .with_context(|| format!("Failed to copy {}", source.display()))?;

    if !dest.exists() {
        bail!("{} missing after copy.", dest.display());
    }
    Ok(())
}
