//! Staging flow integration tests over a fabricated build tree.
//!
//! Everything here runs against a tempdir; no network and no NSIS
//! compiler are involved.

use std::fs;
use std::path::Path;

use relay_pkg::config::{Arch, BuildConfig};
use relay_pkg::defaults::{
    CONFIG_FILE, EXCLUDED_EXEC_MODULES, EXCLUDED_STATE_MODULES, PREREQ_BASE_URL_ENV,
};
use relay_pkg::download::fetch_prereqs;
use relay_pkg::installer::place_artifact;
use relay_pkg::preflight::verify_build_env;
use relay_pkg::stage::{clean_staging, prune_platform_files, stage_config};
use tempfile::{tempdir, TempDir};

/// Lay out a complete build environment the way an agent build would
/// leave it: interpreter, agent binary, library tree (with some Unix-only
/// modules), installer template, and shipped config.
fn fabricate_build_tree() -> (TempDir, BuildConfig) {
    let dir = tempdir().unwrap();
    let config = BuildConfig::new(dir.path(), "1.4.2".to_string(), Arch::Amd64);

    fs::create_dir_all(config.interpreter().parent().unwrap()).unwrap();
    fs::write(config.interpreter(), b"interpreter").unwrap();
    fs::write(config.agent_binary(), b"agent").unwrap();

    for (d, files) in [
        (config.modules_dir(), vec!["win_service.py", "yum.py", "zfs_pool.py"]),
        (config.states_dir(), vec!["win_task.py", "mount.py"]),
    ] {
        fs::create_dir_all(&d).unwrap();
        for f in files {
            fs::write(d.join(f), b"module").unwrap();
        }
    }

    fs::create_dir_all(&config.installer_dir).unwrap();
    fs::write(config.installer_template(), b"!define stub").unwrap();

    fs::create_dir_all(config.conf_source().parent().unwrap()).unwrap();
    fs::write(config.conf_source(), b"endpoint: hub.example\n").unwrap();

    (dir, config)
}

fn count_entries(dir: &Path) -> usize {
    fs::read_dir(dir).map(|rd| rd.count()).unwrap_or(0)
}

#[test]
fn well_formed_tree_passes_verification() {
    let (_dir, config) = fabricate_build_tree();
    // Only the NSIS compiler may legitimately be missing on a dev box
    if let Err(e) = verify_build_env(&config) {
        assert!(e.to_string().contains("NSIS"), "unexpected failure: {e:#}");
    }
}

#[test]
fn missing_agent_binary_fails_before_anything_else_touches_the_tree() {
    let (_dir, config) = fabricate_build_tree();
    fs::remove_file(config.agent_binary()).unwrap();

    let err = verify_build_env(&config).unwrap_err();
    assert!(err.to_string().contains("agent binary"));

    // Verification is read-only: nothing was staged or pruned
    assert!(!config.config_dir.exists());
    assert!(!config.prereq_dir.exists());
    assert!(config.modules_dir().join("yum.py").exists());
}

#[test]
fn staging_flow_cleans_stages_and_prunes() {
    let (_dir, config) = fabricate_build_tree();

    // Leftovers from a previous run
    fs::create_dir_all(&config.config_dir).unwrap();
    fs::write(config.config_dir.join("stale.conf"), b"old").unwrap();
    fs::create_dir_all(&config.prereq_dir).unwrap();
    fs::write(config.prereq_dir.join("vcredist.exe"), b"old").unwrap();

    clean_staging(&config).unwrap();
    assert!(!config.config_dir.exists());
    assert!(!config.prereq_dir.exists());

    stage_config(&config).unwrap();
    assert_eq!(
        fs::read(config.config_dir.join(CONFIG_FILE)).unwrap(),
        b"endpoint: hub.example\n"
    );

    prune_platform_files(&config).unwrap();

    // Unix-only modules are gone, Windows ones survive
    assert!(!config.modules_dir().join("yum.py").exists());
    assert!(!config.modules_dir().join("zfs_pool.py").exists());
    assert!(config.modules_dir().join("win_service.py").exists());
    assert!(!config.states_dir().join("mount.py").exists());
    assert!(config.states_dir().join("win_task.py").exists());
}

#[test]
fn prune_is_idempotent() {
    let (_dir, config) = fabricate_build_tree();

    prune_platform_files(&config).unwrap();
    let modules_after_first = count_entries(&config.modules_dir());
    let states_after_first = count_entries(&config.states_dir());

    // Second pass matches nothing and does not fail
    prune_platform_files(&config).unwrap();
    assert_eq!(count_entries(&config.modules_dir()), modules_after_first);
    assert_eq!(count_entries(&config.states_dir()), states_after_first);
}

#[tokio::test]
async fn unreachable_mirror_fails_the_download_stage_with_nothing_fetched() {
    let (_dir, config) = fabricate_build_tree();

    // Nothing listens on port 1; the connection is refused immediately
    std::env::set_var(PREREQ_BASE_URL_ENV, "http://127.0.0.1:1/prereqs");
    let result = fetch_prereqs(&config).await;
    std::env::remove_var(PREREQ_BASE_URL_ENV);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to download"));

    // Nothing landed, so the compiler stage could never see its inputs
    assert_eq!(count_entries(&config.prereq_dir), 0);
}

#[test]
fn rerun_backs_up_prior_artifact_without_data_loss() {
    let (_dir, config) = fabricate_build_tree();

    // First run's artifact already in the output directory
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.final_artifact(), b"first build").unwrap();

    // Second run produced a fresh artifact next to the template
    fs::write(config.built_artifact(), b"second build").unwrap();
    place_artifact(&config, &config.built_artifact()).unwrap();

    // New artifact holds the canonical name
    assert_eq!(fs::read(config.final_artifact()).unwrap(), b"second build");

    // Prior artifact survives under exactly one backup name
    let backups: Vec<_> = fs::read_dir(&config.output_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains(".bak-"))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read(backups[0].path()).unwrap(), b"first build");
}

#[test]
fn exclusion_lists_are_nonempty_and_distinct() {
    assert!(!EXCLUDED_EXEC_MODULES.is_empty());
    assert!(!EXCLUDED_STATE_MODULES.is_empty());
    // Ordered, deduplicated lists
    for list in [EXCLUDED_EXEC_MODULES, EXCLUDED_STATE_MODULES] {
        let mut sorted = list.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), list.len());
    }
}
