//! Prerequisite binary downloads.
//!
//! The installer bundles a small set of prerequisite binaries fetched from
//! an architecture-parameterized mirror. Downloads are plain GETs with no
//! retry; success is re-verified by checking the file landed on disk.
//!
//! # Environment Variables
//!
//! - `RELAY_PREREQ_BASE_URL`: Override the prerequisite mirror base URL

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;

use crate::config::{Arch, BuildConfig};
use crate::defaults::{PREREQ_BASE_URL, PREREQ_BASE_URL_ENV, PREREQ_FILES};

/// Options for a single download.
#[derive(Debug, Default)]
pub struct DownloadOptions {
    /// Print a per-file size line after the download.
    pub show_progress: bool,
}

/// Download one file to the given destination.
///
/// Fails on connection errors and non-success HTTP statuses. The parent
/// directory is created if needed.
pub async fn http(url: &str, dest: &Path, options: &DownloadOptions) -> Result<()> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("GET {} failed", url))?;

    if !response.status().is_success() {
        bail!("GET {} returned {}", url, response.status());
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, &bytes)
        .with_context(|| format!("Failed to write {}", dest.display()))?;

    if options.show_progress {
        println!("  {} ({} KB)", dest.display(), bytes.len() / 1024);
    }
    Ok(())
}

/// Mirror base URL, with environment override.
pub fn base_url() -> String {
    env::var(PREREQ_BASE_URL_ENV).unwrap_or_else(|_| PREREQ_BASE_URL.to_string())
}

/// Full URL for one prerequisite file.
pub fn prereq_url(base: &str, arch: Arch, file: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        arch.url_component(),
        file
    )
}

/// Download every prerequisite binary into the prerequisites directory,
/// then verify each one is present on disk.
pub async fn fetch_prereqs(config: &BuildConfig) -> Result<()> {
    fs::create_dir_all(&config.prereq_dir)?;

    let base = base_url();
    for file in PREREQ_FILES {
        let url = prereq_url(&base, config.arch, file);
        let dest = config.prereq_dir.join(file);

        println!("Downloading {}...", file);
        println!("  URL: {}", url);

        let options = DownloadOptions {
            show_progress: true,
        };
        http(&url, &dest, &options)
            .await
            .with_context(|| format!("Failed to download {}", file))?;
    }

    verify_prereqs(config)
}

/// Verify every expected prerequisite file exists.
pub fn verify_prereqs(config: &BuildConfig) -> Result<()> {
    for file in PREREQ_FILES {
        let dest = config.prereq_dir.join(file);
        if !dest.exists() {
            bail!(
                "Prerequisite {} missing after download.\n\
                 Expected at: {}",
                file,
                dest.display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_prereq_url() {
        assert_eq!(
            prereq_url("https://mirror.example/prereqs", Arch::Amd64, "vcredist.exe"),
            "https://mirror.example/prereqs/amd64/vcredist.exe"
        );
    }

    #[test]
    fn test_prereq_url_trailing_slash() {
        assert_eq!(
            prereq_url("https://mirror.example/prereqs/", Arch::X86, "ssm.exe"),
            "https://mirror.example/prereqs/x86/ssm.exe"
        );
    }

    #[test]
    fn test_verify_prereqs_missing() {
        let dir = tempdir().unwrap();
        let config = BuildConfig::new(dir.path(), "1.0.0".to_string(), Arch::Amd64);
        let err = verify_prereqs(&config).unwrap_err();
        assert!(err.to_string().contains("vcredist.exe"));
    }

    #[test]
    fn test_verify_prereqs_present() {
        let dir = tempdir().unwrap();
        let config = BuildConfig::new(dir.path(), "1.0.0".to_string(), Arch::Amd64);
        std::fs::create_dir_all(&config.prereq_dir).unwrap();
        for file in PREREQ_FILES {
            std::fs::write(config.prereq_dir.join(file), b"binary").unwrap();
        }
        verify_prereqs(&config).unwrap();
    }
}
