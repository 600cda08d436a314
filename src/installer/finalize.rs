//! Final artifact placement with backup-on-conflict.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;

/// Move the freshly built installer into the output directory.
///
/// An artifact already holding the canonical name is renamed to a
/// timestamped backup first, so a re-run never destroys a prior build.
pub fn place_artifact(config: &BuildConfig, built: &Path) -> Result<PathBuf> {
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let dest = config.final_artifact();
    if dest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
        let backup = unique_backup_path(&config.output_dir, &config.artifact_name(), &stamp);

        println!("Backing up existing artifact to {}...", backup.display());
        fs::rename(&dest, &backup)
            .with_context(|| format!("Failed to back up {}", dest.display()))?;
    }

    println!("Moving artifact to {}...", dest.display());
    atomic_move(built, &dest)?;

    if !dest.exists() {
        bail!("{} missing after move.", dest.display());
    }
    Ok(dest)
}

/// Backup filename for a displaced artifact.
pub fn backup_name(artifact: &str, stamp: &str) -> String {
    format!("{}.bak-{}", artifact, stamp)
}

/// Backup path that does not collide with an existing backup. Re-runs
/// within the same second get a counter suffix instead of clobbering
/// the earlier backup.
fn unique_backup_path(dir: &Path, artifact: &str, stamp: &str) -> PathBuf {
    let mut path = dir.join(backup_name(artifact, stamp));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{}.{}", backup_name(artifact, stamp), n));
        n += 1;
    }
    path
}

/// Rename with a copy-then-delete fallback for cross-filesystem moves.
pub fn atomic_move(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dest)
                .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
            fs::remove_file(src)
                .with_context(|| format!("Failed to remove {}", src.display()))?;
            Ok(())
        }
    }
}
