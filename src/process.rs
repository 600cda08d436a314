//! Thin wrapper around external process invocation.
//!
//! Every external tool call in the pipeline goes through [`Cmd`] so that
//! failures carry the tool's stderr and an actionable message instead of a
//! bare exit status.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Builder for an external command.
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    error_msg: Option<String>,
}

impl Cmd {
    /// Create a command for the given program.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            error_msg: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument without lossy conversion.
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.as_os_str().to_os_string());
        self
    }

    /// Run the command in the given directory.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Message to lead the error with if the command fails.
    pub fn error_msg(mut self, msg: impl Into<String>) -> Self {
        self.error_msg = Some(msg.into());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    fn display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Message leading an error report, either the configured one or a
    /// generic "<program> failed".
    fn error_label(self) -> String {
        match self.error_msg {
            Some(msg) => msg,
            None => format!("{} failed", self.program.to_string_lossy()),
        }
    }

    /// Run with captured output, returning trimmed stdout.
    pub fn run_capture(self) -> Result<String> {
        let output = self
            .command()
            .output()
            .with_context(|| format!("Failed to spawn {}", self.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            bail!("{}\n{}", self.error_label(), stderr);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run with inherited stdio and return the exit status without
    /// treating a non-zero exit as an error.
    pub fn status(self) -> Result<ExitStatus> {
        self.command()
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("Failed to spawn {}", self.display()))
    }
}

/// Locate a tool on `PATH`. Also tries the `.exe` suffix so lookups
/// behave the same when the tool name is given bare on Windows.
pub fn which(tool: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(tool);
        if candidate.is_file() {
            return Some(candidate);
        }
        let exe = dir.join(format!("{}.exe", tool));
        if exe.is_file() {
            return Some(exe);
        }
    }
    None
}
