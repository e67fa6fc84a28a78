//! Executing `hg` and capturing its output.

use std::path::{Path, PathBuf};
use std::time::Duration;

use revstack_config::ToolConfig;
use revstack_utils::{UtilError, VcsCommand};

/// Runs a version-control command and returns its stdout lines.
///
/// Implementations must fail on a non-zero exit status. Calls are
/// blocking and strictly sequential.
pub trait CommandRunner {
    fn run_captured(&self, args: &[String]) -> Result<Vec<String>, UtilError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run_captured(&self, args: &[String]) -> Result<Vec<String>, UtilError> {
        (**self).run_captured(args)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run_captured(&self, args: &[String]) -> Result<Vec<String>, UtilError> {
        (**self).run_captured(args)
    }
}

/// Runs the real `hg` executable.
#[derive(Debug, Clone)]
pub struct HgRunner {
    binary: PathBuf,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl HgRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: None,
            timeout: None,
        }
    }

    /// Binary and timeout taken from the tool settings.
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            binary: config.hg_binary.clone(),
            working_dir: None,
            timeout: config.timeout,
        }
    }

    /// Run every command in `dir` instead of the current directory.
    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn command(&self, args: &[String]) -> VcsCommand {
        // HGPLAIN disables aliases, localisation and other output tweaks.
        let mut cmd = VcsCommand::new(&self.binary).args(args).env("HGPLAIN", "1");
        if let Some(ref dir) = self.working_dir {
            cmd = cmd.working_dir(dir);
        }
        if let Some(timeout) = self.timeout {
            cmd = cmd.timeout(timeout);
        }
        cmd
    }
}

impl Default for HgRunner {
    fn default() -> Self {
        Self::new("hg")
    }
}

impl CommandRunner for HgRunner {
    fn run_captured(&self, args: &[String]) -> Result<Vec<String>, UtilError> {
        let cmd = self.command(args);
        tracing::debug!(command = %cmd.command_string(), "running");
        let lines = cmd.run_captured()?;
        tracing::trace!(lines = lines.len(), "captured");
        Ok(lines)
    }
}
