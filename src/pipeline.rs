//! The packaging pipeline: a fixed, ordered sequence of stages.
//!
//! Every stage either succeeds (re-verified against filesystem state) or
//! aborts the whole build. There is no retry, no rollback, and no
//! partial-success continuation.

use anyhow::Result;
use std::time::Instant;

use crate::config::BuildConfig;
use crate::defaults::PRODUCT_NAME;
use crate::installer;
use crate::preflight;
use crate::stage;
use crate::Timer;

/// Run the full packaging pipeline.
///
/// Stage order matters: the build environment is verified before any
/// network activity, and downloads complete before the compiler runs.
pub async fn run(config: &BuildConfig) -> Result<()> {
    let build_start = Instant::now();

    println!(
        "=== Building {} {} installer ({}) ===\n",
        PRODUCT_NAME, config.version, config.arch
    );

    // 1. Verify the pre-populated build environment
    preflight::verify_build_env(config)?;
    println!("[OK] Build environment verified");

    // 2. Clean prior staging artifacts
    let t = Timer::start("Clean");
    stage::clean_staging(config)?;
    t.finish();

    // 3. Stage configuration
    let t = Timer::start("Config");
    stage::stage_config(config)?;
    t.finish();

    // 4. Download prerequisite binaries
    let t = Timer::start("Prerequisites");
    crate::download::fetch_prereqs(config).await?;
    t.finish();

    // 5. Prune platform-inapplicable files
    let t = Timer::start("Prune");
    stage::prune_platform_files(config)?;
    t.finish();

    // 6. Compile the installer
    let t = Timer::start("Compile");
    let built = installer::compile_installer(config)?;
    t.finish();

    // 7. Place the artifact, backing up any prior build
    let t = Timer::start("Finalize");
    let placed = installer::place_artifact(config, &built)?;
    t.finish();

    let total = build_start.elapsed().as_secs_f64();
    println!("\n=== Build Complete ({:.1}s) ===", total);
    println!("  Artifact: {}", placed.display());
    match std::fs::metadata(&placed) {
        Ok(meta) => println!("  Size: {} MB", meta.len() / 1024 / 1024),
        Err(e) => eprintln!("  [WARN] Could not read artifact size: {}", e),
    }

    Ok(())
}
