use std::io;
use std::process::{Command, Stdio};

/// Opens a URL in whatever the host considers the browser.
pub trait BrowserOpener {
    /// `true` when the opener ran and reported success.
    fn open(&self, url: &str) -> bool;
}

/// Uses a configured browser command when present, else the platform opener.
#[derive(Debug, Default, Clone)]
pub struct SystemBrowser {
    /// Shell-style command line; the URL is appended as the last argument.
    pub command: Option<String>,
}

impl SystemBrowser {
    pub fn new(command: Option<String>) -> Self {
        SystemBrowser { command }
    }

    fn build(&self, url: &str) -> io::Result<Command> {
        if let Some(line) = &self.command {
            let parts = shell_words::split(line)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            let Some((program, args)) = parts.split_first() else {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "browser command is empty",
                ));
            };
            let mut cmd = Command::new(program);
            cmd.args(args).arg(url);
            return Ok(cmd);
        }
        Ok(platform_opener(url))
    }
}

#[cfg(target_os = "macos")]
fn platform_opener(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(windows)]
fn platform_opener(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(url);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_opener(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> bool {
        let status = self.build(url).and_then(|mut cmd| {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
        });
        match status {
            Ok(s) if s.success() => true,
            Ok(s) => {
                tracing::debug!(%url, status = %s, "browser opener exited with failure");
                false
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "browser opener could not run");
                false
            }
        }
    }
}
