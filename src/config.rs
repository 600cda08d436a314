//! Build configuration for the Relay installer pipeline.
//!
//! All paths are derived once from the build directory and carried through
//! the pipeline in an immutable [`BuildConfig`]. Stages never compute paths
//! on their own.

use clap::ValueEnum;
use std::env;
use std::path::{Path, PathBuf};

use crate::defaults::{
    AGENT_BINARY, CONFIG_FILE, INSTALLER_TEMPLATE, INTERPRETER_PATH, NSIS_COMPILER,
    NSIS_INSTALL_PATHS, NSIS_PATH_ENV, PRODUCT_ID, PRODUCT_NAME, PYTHON_MAJOR,
};
use crate::process;

/// Target architecture of the installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Arch {
    /// 32-bit x86
    X86,
    /// 64-bit x86
    Amd64,
}

impl Arch {
    /// Architecture tag as it appears in the artifact name and the
    /// NSIS `PythonArchitecture` define.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::Amd64 => "AMD64",
        }
    }

    /// Path component in the prerequisite mirror URL.
    pub fn url_component(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::Amd64 => "amd64",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable configuration shared by every pipeline stage.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Resolved product version, e.g. `1.4.2`.
    pub version: String,
    /// Target architecture.
    pub arch: Arch,
    /// Root of the build tree.
    pub base_dir: PathBuf,
    /// Pre-populated build environment (`buildenv/`).
    pub build_env: PathBuf,
    /// Generated configuration output (`buildenv/configs/`).
    pub config_dir: PathBuf,
    /// Installer template directory (`installer/`).
    pub installer_dir: PathBuf,
    /// Downloaded prerequisites (`installer/prereqs/`).
    pub prereq_dir: PathBuf,
    /// Final artifact destination (`pkg/`).
    pub output_dir: PathBuf,
    /// NSIS compiler, if one could be located.
    pub nsis_exe: Option<PathBuf>,
}

impl BuildConfig {
    /// Derive all paths from the build directory.
    pub fn new(base_dir: impl Into<PathBuf>, version: String, arch: Arch) -> Self {
        let base_dir = base_dir.into();
        let build_env = base_dir.join("buildenv");
        Self {
            config_dir: build_env.join("configs"),
            installer_dir: base_dir.join("installer"),
            prereq_dir: base_dir.join("installer").join("prereqs"),
            output_dir: base_dir.join("pkg"),
            nsis_exe: resolve_nsis(),
            version,
            arch,
            base_dir,
            build_env,
        }
    }

    /// Bundled interpreter (`buildenv/Scripts/python.exe`).
    pub fn interpreter(&self) -> PathBuf {
        self.build_env.join(INTERPRETER_PATH)
    }

    /// Pre-built agent binary (`buildenv/relay-agent.exe`).
    pub fn agent_binary(&self) -> PathBuf {
        self.build_env.join(AGENT_BINARY)
    }

    /// Packaged library tree root (`buildenv/Lib/site-packages/relay`).
    pub fn site_packages(&self) -> PathBuf {
        self.build_env
            .join("Lib")
            .join("site-packages")
            .join(PRODUCT_ID)
    }

    /// Executable modules directory, pruned before compiling.
    pub fn modules_dir(&self) -> PathBuf {
        self.site_packages().join("modules")
    }

    /// State modules directory, pruned before compiling.
    pub fn states_dir(&self) -> PathBuf {
        self.site_packages().join("states")
    }

    /// Shipped agent configuration file (`conf/relay.conf`).
    pub fn conf_source(&self) -> PathBuf {
        self.base_dir.join("conf").join(CONFIG_FILE)
    }

    /// NSIS definition file compiled into the installer.
    pub fn installer_template(&self) -> PathBuf {
        self.installer_dir.join(INSTALLER_TEMPLATE)
    }

    /// Canonical artifact filename, encoding version, runtime major
    /// version, and architecture.
    pub fn artifact_name(&self) -> String {
        format!(
            "{}-{}-Py{}-{}-Setup.exe",
            PRODUCT_NAME,
            self.version,
            PYTHON_MAJOR,
            self.arch.as_str()
        )
    }

    /// Where the NSIS compiler writes the artifact, next to the template.
    pub fn built_artifact(&self) -> PathBuf {
        self.installer_dir.join(self.artifact_name())
    }

    /// Final artifact location under the output directory.
    pub fn final_artifact(&self) -> PathBuf {
        self.output_dir.join(self.artifact_name())
    }
}

/// Locate the NSIS compiler.
///
/// 1. `RELAY_NSIS_PATH` environment variable
/// 2. Conventional install locations
/// 3. `PATH` lookup
fn resolve_nsis() -> Option<PathBuf> {
    if let Ok(path) = env::var(NSIS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    for candidate in NSIS_INSTALL_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    process::which(NSIS_COMPILER)
}
