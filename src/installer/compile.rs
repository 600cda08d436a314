//! NSIS compiler invocation.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::defaults::NSIS_PATH_ENV;
use crate::process::Cmd;

/// Compile the installer from the NSIS definition file.
///
/// The compiler runs synchronously with the version and architecture as
/// defines. Its exit status is reported but not trusted: makensis has been
/// seen exiting zero on warnings-as-errors setups and non-zero on harmless
/// plugin warnings, so presence of the expected artifact decides success.
pub fn compile_installer(config: &BuildConfig) -> Result<PathBuf> {
    let Some(nsis_exe) = &config.nsis_exe else {
        bail!(
            "NSIS compiler not found.\n\
             Install NSIS or point {} at makensis.",
            NSIS_PATH_ENV
        );
    };

    let template = config.installer_template();
    if !template.exists() {
        bail!("Installer template not found at {}.", template.display());
    }

    println!("Compiling installer...");
    println!("  Compiler: {}", nsis_exe.display());
    println!("  Template: {}", template.display());

    let status = Cmd::new(nsis_exe.as_os_str())
        .arg(format!("-DProductVersion={}", config.version))
        .arg(format!("-DPythonArchitecture={}", config.arch.as_str()))
        .arg_path(&template)
        .status()?;

    if !status.success() {
        println!("  makensis exited with {} (checking output anyway)", status);
    }

    let artifact = config.built_artifact();
    if !artifact.exists() {
        bail!(
            "Installer not found at {} after compilation.\n\
             Check the makensis output above for the actual error.",
            artifact.display()
        );
    }

    println!("  Built: {}", artifact.display());
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Arch;
    use tempfile::tempdir;

    #[test]
    fn test_compile_without_compiler_fails() {
        let dir = tempdir().unwrap();
        let mut config = BuildConfig::new(dir.path(), "1.0.0".to_string(), Arch::Amd64);
        config.nsis_exe = None;

        let err = compile_installer(&config).unwrap_err();
        assert!(err.to_string().contains("NSIS compiler not found"));
    }

    #[test]
    fn test_compile_without_template_fails() {
        let dir = tempdir().unwrap();
        let mut config = BuildConfig::new(dir.path(), "1.0.0".to_string(), Arch::Amd64);
        // Pretend a compiler exists so the template check is reached
        config.nsis_exe = Some(PathBuf::from("/usr/bin/true"));

        let err = compile_installer(&config).unwrap_err();
        assert!(err.to_string().contains("template not found"));
    }

    #[test]
    fn test_compile_verifies_artifact_presence() {
        let dir = tempdir().unwrap();
        let mut config = BuildConfig::new(dir.path(), "1.0.0".to_string(), Arch::Amd64);
        config.nsis_exe = Some(PathBuf::from("/usr/bin/true"));

        std::fs::create_dir_all(&config.installer_dir).unwrap();
        std::fs::write(config.installer_template(), b"!define stub").unwrap();

        // /usr/bin/true exits 0 but writes nothing
        let err = compile_installer(&config).unwrap_err();
        assert!(err.to_string().contains("after compilation"));
    }
}
