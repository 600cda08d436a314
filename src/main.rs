//! Relay Windows installer builder CLI
//!
//! Assembles the NSIS installer package for the Relay agent from a
//! pre-populated build environment.
//!
//! # Usage
//!
//! ```bash
//! # Show build environment status
//! relay-pkg status
//!
//! # Build the AMD64 installer, version from git describe
//! relay-pkg build
//!
//! # Build a specific version for x86
//! relay-pkg build --version 1.4.2 --arch x86
//!
//! # Remove prior staging artifacts
//! relay-pkg clean
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use relay_pkg::config::{Arch, BuildConfig};
use relay_pkg::defaults::PREREQ_FILES;
use relay_pkg::preflight::PreflightChecker;
use relay_pkg::{pipeline, stage, version};

#[derive(Parser)]
#[command(name = "relay-pkg")]
#[command(author, version, about = "Relay agent installer builder", long_about = None)]
struct Cli {
    /// Build directory (defaults to the current directory)
    #[arg(long, global = true)]
    build_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the installer package
    Build {
        /// Product version (default: derived from git describe)
        #[arg(long)]
        version: Option<String>,

        /// Target architecture
        #[arg(long, value_enum, default_value = "amd64")]
        arch: Arch,
    },

    /// Remove prior staging artifacts
    Clean,

    /// Show build environment status and next steps
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let base_dir = base_dir(cli.build_dir);

    let result = match cli.command {
        Commands::Build { version, arch } => cmd_build(base_dir, version, arch).await,
        Commands::Clean => cmd_clean(base_dir),
        Commands::Status => cmd_status(base_dir).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn base_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

async fn cmd_build(base_dir: PathBuf, version: Option<String>, arch: Arch) -> Result<()> {
    let version = version::resolve_version(version, &base_dir)?;
    let config = BuildConfig::new(base_dir, version, arch);
    pipeline::run(&config).await
}

fn cmd_clean(base_dir: PathBuf) -> Result<()> {
    // Version is irrelevant for cleanup; paths don't depend on it
    let config = BuildConfig::new(base_dir, "0.0.0".to_string(), Arch::Amd64);
    stage::clean_staging(&config)?;
    println!("Staging directories removed");
    Ok(())
}

async fn cmd_status(base_dir: PathBuf) -> Result<()> {
    let version = version::resolve_version(None, &base_dir)
        .unwrap_or_else(|_| "unknown".to_string());
    let config = BuildConfig::new(base_dir, version, Arch::Amd64);

    println!("Relay Installer Builder Status");
    println!("==============================");
    println!();
    println!("Configuration:");
    println!("  Build dir: {}", config.base_dir.display());
    println!("  Version:   {}", config.version);
    println!("  Artifact:  {}", config.artifact_name());
    println!();

    let report = PreflightChecker::new(&config).run_all().await;
    report.print_summary();
    println!();

    println!("Staging:");
    let status = |b: bool| if b { "PRESENT" } else { "ABSENT" };
    println!(
        "  Staged config:   {} ({})",
        status(config.config_dir.exists()),
        config.config_dir.display()
    );
    for file in PREREQ_FILES {
        let path = config.prereq_dir.join(file);
        println!("  {}:    {}", file, status(path.exists()));
    }
    println!();

    println!("Output:");
    let artifact = config.final_artifact();
    if artifact.exists() {
        let size = std::fs::metadata(&artifact)
            .map(|m| m.len() / 1024 / 1024)
            .unwrap_or(0);
        println!("  Artifact: BUILT ({} MB)", size);
        println!("            {}", artifact.display());
    } else {
        println!("  Artifact: NOT BUILT");
    }
    println!();

    println!("Next steps:");
    if !report.is_ok() {
        println!("  1. Fix the failing preflight checks:");
        for check in report.errors() {
            println!("     - {}: {}", check.name, check.message);
        }
    } else if !artifact.exists() {
        println!("  1. Run 'relay-pkg build' to assemble the installer");
    } else {
        println!("  Installer ready at {}", artifact.display());
    }

    Ok(())
}
