//! Shared helpers for the binary tests: a command builder with a clean
//! environment, the loopback Matriz API and process watching.

#![allow(dead_code)]

pub mod mock_api;
#[cfg(target_os = "linux")]
pub mod procs;

use std::io::Read;
use std::net::TcpListener;
use std::process::{Child, ExitStatus};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use assert_cmd::Command;
use assert_cmd::cargo::CommandCargoExt;

const MATRIZ_ENV: [&str; 4] = ["MATRIZ_URL", "MATRIZ_CONFIG", "BROWSER", "RUST_LOG"];

/// The binary with colors off and no inherited Matriz/browser settings.
pub fn matriz() -> Command {
    let mut cmd = Command::cargo_bin("matriz-cli").expect("compile bin");
    for key in MATRIZ_ENV {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1").env("NO_EMOJI", "1");
    cmd
}

/// Same environment as [`matriz`], as a plain process for tests that need
/// to signal it while it runs.
pub fn matriz_process() -> std::process::Command {
    let mut cmd = std::process::Command::cargo_bin("matriz-cli").expect("compile bin");
    for key in MATRIZ_ENV {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1").env("NO_EMOJI", "1");
    cmd
}

/// Base URL of a port nothing listens on.
pub fn closed_url() -> String {
    let l = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = l.local_addr().unwrap().port();
    drop(l);
    format!("http://127.0.0.1:{port}")
}

/// Everything a child writes to `stream`, collected on a background thread.
pub fn capture(mut stream: impl Read + Send + 'static) -> Arc<Mutex<String>> {
    let text = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&text);
    std::thread::spawn(move || {
        let mut buf = [0u8; 512];
        while let Ok(n) = stream.read(&mut buf) {
            if n == 0 {
                break;
            }
            sink.lock().unwrap().push_str(&String::from_utf8_lossy(&buf[..n]));
        }
    });
    text
}

/// Wait until the captured output contains `needle`.
pub fn wait_for_text(text: &Mutex<String>, needle: &str, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if text.lock().unwrap().contains(needle) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    false
}

/// Exit status, or `None` (after killing the child) when it outlives `timeout`.
pub fn wait_exit(child: &mut Child, timeout: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Ok(Some(status)) = child.try_wait() {
            return Some(status);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    let _ = child.kill();
    let _ = child.wait();
    None
}
