//! Backend process launching.
//!
//! LaunchSpec::parse -> { program, args, working_dir } (shell-style splitting)
//! Launcher::spawn_detached -> Box<dyn ProcessHandle> | LaunchError
//! ProcessHandle::terminate
//!
//! The browser-opening sibling lives in `browser`.

pub mod browser;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use shell_words::split as shell_split;
use thiserror::Error;

/// Program + arguments + optional working directory for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    /// `None` runs in the CLI's own working directory.
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchSpecError {
    #[error("launch command is empty")]
    Empty,
    #[error("failed to split launch command: {0}")]
    Split(String),
}

impl LaunchSpec {
    /// Parse a command line like `npm run dev` or `node "my server.js"`.
    pub fn parse(line: &str, working_dir: Option<PathBuf>) -> Result<Self, LaunchSpecError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(LaunchSpecError::Empty);
        }
        let mut parts = shell_split(trimmed)
            .map_err(|e| LaunchSpecError::Split(e.to_string()))?
            .into_iter();
        let program = match parts.next() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(LaunchSpecError::Empty),
        };
        Ok(LaunchSpec {
            program,
            args: parts.collect(),
            working_dir,
        })
    }

    pub fn display_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("'{program}' not found")]
    NotFound { program: String },
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// What the user can do about it.
    pub fn remediation(&self) -> String {
        match self {
            LaunchError::NotFound { program } => match program.as_str() {
                "npm" | "npx" | "node" => "Install Node.js first.".to_string(),
                other => format!("Install '{other}' or fix launch_command in the config file."),
            },
            LaunchError::Spawn { .. } => {
                "Check the launch command and the working directory.".to_string()
            }
        }
    }
}

/// A running backend that can be asked to stop.
pub trait ProcessHandle {
    fn id(&self) -> Option<u32>;
    fn terminate(&mut self);
}

/// Starts the backend without waiting on it.
pub trait Launcher {
    fn spawn_detached(&self, spec: &LaunchSpec) -> Result<Box<dyn ProcessHandle>, LaunchError>;
}

/// Real launcher backed by `std::process`.
#[derive(Debug, Default, Clone)]
pub struct SystemLauncher {
    /// Append the child's stdout/stderr here instead of discarding them.
    pub log_file: Option<PathBuf>,
}

impl SystemLauncher {
    pub fn new(log_file: Option<PathBuf>) -> Self {
        SystemLauncher { log_file }
    }

    fn output_streams(&self) -> io::Result<(Stdio, Stdio)> {
        match &self.log_file {
            Some(path) => {
                let file = open_log(path)?;
                let dup = file.try_clone()?;
                Ok((Stdio::from(file), Stdio::from(dup)))
            }
            None => Ok((Stdio::null(), Stdio::null())),
        }
    }
}

fn open_log(path: &Path) -> io::Result<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Launcher for SystemLauncher {
    fn spawn_detached(&self, spec: &LaunchSpec) -> Result<Box<dyn ProcessHandle>, LaunchError> {
        let (stdout, stderr) = self.output_streams().map_err(|source| LaunchError::Spawn {
            program: spec.program.clone(),
            source,
        })?;

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr);
        if let Some(dir) = &spec.working_dir {
            cmd.current_dir(dir);
        }
        // Own process group: Ctrl-C in the CLI's terminal must not reach the backend.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        match cmd.spawn() {
            Ok(child) => {
                tracing::debug!(pid = child.id(), command = %spec.display_line(), "backend spawned");
                Ok(Box::new(SpawnedProcess { child }))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LaunchError::NotFound {
                program: spec.program.clone(),
            }),
            Err(source) => Err(LaunchError::Spawn {
                program: spec.program.clone(),
                source,
            }),
        }
    }
}

#[derive(Debug)]
pub struct SpawnedProcess {
    child: Child,
}

impl ProcessHandle for SpawnedProcess {
    fn id(&self) -> Option<u32> {
        Some(self.child.id())
    }

    /// Stops the backend's whole process group (`npm run dev` leaves the
    /// actual server as a grandchild): SIGTERM, a grace period, then SIGKILL
    /// for whatever is left. The direct child is always reaped.
    #[cfg(unix)]
    fn terminate(&mut self) {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        let pid = self.child.id();
        let Ok(raw) = i32::try_from(pid) else {
            self.kill_child();
            return;
        };
        let group = Pid::from_raw(raw);

        if let Err(e) = killpg(group, Signal::SIGTERM) {
            tracing::debug!(pid, error = %e, "SIGTERM to backend group failed");
        }
        if !self.exited_within(TERM_GRACE) {
            tracing::debug!(pid, "backend ignored SIGTERM");
        }
        // Signal 0 only checks for surviving members (the leader counts until reaped).
        if killpg(group, None).is_ok()
            && let Err(e) = killpg(group, Signal::SIGKILL)
        {
            tracing::warn!(pid, error = %e, "failed to kill backend group");
        }
        let _ = self.child.wait();
        tracing::debug!(pid, "backend terminated");
    }

    #[cfg(not(unix))]
    fn terminate(&mut self) {
        self.kill_child();
    }
}

#[cfg(unix)]
const TERM_GRACE: std::time::Duration = std::time::Duration::from_secs(3);

impl SpawnedProcess {
    #[cfg(unix)]
    fn exited_within(&mut self, grace: std::time::Duration) -> bool {
        let deadline = std::time::Instant::now() + grace;
        loop {
            match self.child.try_wait() {
                Ok(Some(_)) => return true,
                Ok(None) if std::time::Instant::now() < deadline => {
                    std::thread::sleep(std::time::Duration::from_millis(25));
                }
                _ => return false,
            }
        }
    }

    fn kill_child(&mut self) {
        let pid = self.child.id();
        match self.child.kill() {
            Ok(()) => {
                let _ = self.child.wait();
                tracing::debug!(pid, "backend terminated");
            }
            Err(e) => tracing::warn!(pid, error = %e, "failed to terminate backend"),
        }
    }
}

#[cfg(all(test, target_os = "linux"))]
#[path = "../../tests/common/procs.rs"]
mod procs;
