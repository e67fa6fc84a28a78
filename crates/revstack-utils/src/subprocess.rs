use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::UtilError;
use crate::output::{split_lines, trimmed_text};
use crate::Result;

/// Poll interval while waiting on a command with a timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

type Reader = JoinHandle<std::io::Result<Vec<u8>>>;

/// Exit status and both captured streams of a finished command.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// A version-control command to run to completion.
///
/// Stdin is always closed and both output streams are captured; nothing
/// here ever prompts or writes to the terminal.
#[derive(Debug, Clone)]
pub struct VcsCommand {
    program: OsString,
    args: Vec<OsString>,
    env_vars: Vec<(OsString, OsString)>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl VcsCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            env_vars: Vec::new(),
            working_dir: None,
            timeout: None,
        }
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, val: impl AsRef<OsStr>) -> Self {
        self.env_vars
            .push((key.as_ref().to_os_string(), val.as_ref().to_os_string()));
        self
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Kill the child if it has not exited after `duration`.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// The command line as a single string, for logs and error messages.
    pub fn command_string(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn spawn(&self) -> Result<Child> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.env_vars.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        cmd.spawn().map_err(|e| self.subprocess_error(e))
    }

    fn subprocess_error(&self, source: std::io::Error) -> UtilError {
        UtilError::Subprocess {
            command: self.command_string(),
            source,
        }
    }

    /// Run to completion and return whatever the child produced, whatever
    /// its exit status.
    ///
    /// With a timeout the streams are drained on reader threads while the
    /// child is polled, so a full pipe cannot stall it.
    pub fn run(&self) -> Result<CommandOutput> {
        tracing::trace!(command = %self.command_string(), "spawning");
        let mut child = self.spawn()?;

        // A timeout too large to represent as an instant means no deadline.
        let deadline = self.timeout.and_then(|t| Instant::now().checked_add(t));
        let Some(deadline) = deadline else {
            let output = child
                .wait_with_output()
                .map_err(|e| self.subprocess_error(e))?;
            return Ok(CommandOutput {
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        };

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = loop {
            match child.try_wait().map_err(|e| self.subprocess_error(e))? {
                Some(status) => break status,
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(UtilError::SubprocessTimeout {
                        command: self.command_string(),
                    });
                }
                None => std::thread::sleep(POLL_INTERVAL),
            }
        };

        Ok(CommandOutput {
            status,
            stdout: self.join(stdout)?,
            stderr: self.join(stderr)?,
        })
    }

    /// Run and return stdout as lines; a non-zero exit becomes
    /// [`UtilError::CommandFailed`] carrying the child's stderr.
    pub fn run_captured(&self) -> Result<Vec<String>> {
        let output = self.run()?;
        if !output.success() {
            return Err(UtilError::CommandFailed {
                command: self.command_string(),
                code: output.status.code(),
                stderr: trimmed_text(&output.stderr),
            });
        }
        Ok(split_lines(&output.stdout))
    }

    fn join(&self, reader: Option<Reader>) -> Result<Vec<u8>> {
        match reader.map(JoinHandle::join) {
            None => Ok(Vec::new()),
            Some(Ok(bytes)) => bytes.map_err(|e| self.subprocess_error(e)),
            Some(Err(_)) => Err(self.subprocess_error(std::io::Error::other(
                "output reader thread panicked",
            ))),
        }
    }
}

fn drain<R: Read + Send + 'static>(mut stream: R) -> Reader {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    })
}
