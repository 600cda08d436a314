//! Product constants for the Relay Windows package build.
//!
//! Everything that names a file, a URL, or a pattern lives here so the
//! pipeline stages stay free of string literals.

/// Product name as it appears in the installer filename.
pub const PRODUCT_NAME: &str = "Relay";

/// Lowercase product id, used for the packaged library tree.
pub const PRODUCT_ID: &str = "relay";

/// Major version of the bundled Python runtime, encoded in the
/// artifact name (`...-Py3-...`).
pub const PYTHON_MAJOR: u8 = 3;

/// Pre-built agent service binary expected in the build environment.
pub const AGENT_BINARY: &str = "relay-agent.exe";

/// Bundled interpreter, relative to the build environment root.
pub const INTERPRETER_PATH: &str = "Scripts/python.exe";

/// Agent configuration file shipped inside the installer.
pub const CONFIG_FILE: &str = "relay.conf";

/// NSIS definition file, relative to the installer template directory.
pub const INSTALLER_TEMPLATE: &str = "Relay-Setup.nsi";

/// Conventional NSIS install locations checked before falling back
/// to `PATH` lookup.
pub const NSIS_INSTALL_PATHS: &[&str] = &[
    "C:\\Program Files (x86)\\NSIS\\makensis.exe",
    "C:\\Program Files\\NSIS\\makensis.exe",
];

/// Name of the NSIS compiler for `PATH` lookup.
pub const NSIS_COMPILER: &str = "makensis";

/// Override the NSIS compiler location.
pub const NSIS_PATH_ENV: &str = "RELAY_NSIS_PATH";

/// Override the prerequisite mirror base URL.
pub const PREREQ_BASE_URL_ENV: &str = "RELAY_PREREQ_BASE_URL";

/// Default prerequisite mirror. Final URLs are
/// `<base>/<arch>/<file>`.
pub const PREREQ_BASE_URL: &str = "https://packages.relayproject.io/windows/prereqs";

/// Prerequisite binaries bundled into the installer: the VC++
/// redistributable the agent links against and the service manager
/// used to register the agent as a Windows service.
pub const PREREQ_FILES: &[&str] = &["vcredist.exe", "ssm.exe"];

/// Executable modules that only function on Unix hosts. Deleted from
/// `Lib/site-packages/relay/modules/` before compiling the installer.
/// Glob patterns; a pattern with no matches is fine.
pub const EXCLUDED_EXEC_MODULES: &[&str] = &[
    "apk.py",
    "aptly*",
    "cron*",
    "daemontools.py",
    "iptables*",
    "kmod.py",
    "mount.py",
    "pam.py",
    "parted*",
    "ps.py",
    "runit.py",
    "rpm*",
    "shadow.py",
    "ssh_*",
    "systemd*",
    "sysv*",
    "useradd.py",
    "yum*",
    "zfs*",
];

/// State modules with no Windows counterpart. Deleted from
/// `Lib/site-packages/relay/states/`.
pub const EXCLUDED_STATE_MODULES: &[&str] = &[
    "alternatives.py",
    "blockdev.py",
    "cron*",
    "iptables*",
    "kmod.py",
    "mount.py",
    "ports.py",
    "selinux*",
    "systemd*",
    "sysv*",
    "user_*",
    "zfs*",
];
