//! Runtime configuration.
//!
//! Built once at startup from, highest precedence first: CLI flags,
//! environment (`MATRIZ_URL`, `MATRIZ_CONFIG`, `BROWSER`), an optional YAML or
//! JSON config file, and built-in defaults. The resulting `Config` is immutable
//! and handed to every component by reference.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::cmd::format::StyleOptions;
use crate::launcher::{LaunchSpec, LaunchSpecError};

pub const DEFAULT_URL: &str = "http://localhost:3001";
pub const DEFAULT_LAUNCH_COMMAND: &str = "npm run dev";
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_ATTEMPTS: u32 = 30;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("invalid base URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("invalid launch command: {0}")]
    Launch(#[from] LaunchSpecError),
}

/// On-disk shape. Every key is optional; unknown keys are rejected.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub health_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub poll_attempts: Option<u32>,
    pub poll_interval_ms: Option<u64>,
    pub launch_command: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub server_log: Option<PathBuf>,
    pub browser: Option<String>,
}

/// Values coming from flags or the environment, already merged flag-over-env.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub url: Option<String>,
    pub browser: Option<String>,
    pub no_color: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub health_timeout: Duration,
    pub request_timeout: Duration,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
    /// Command line as configured, shown in hints.
    pub launch_command: String,
    pub launch: LaunchSpec,
    pub server_log: Option<PathBuf>,
    pub browser: Option<String>,
    pub style: StyleOptions,
}

impl Config {
    pub fn build(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let raw_url = overrides
            .url
            .or(file.url)
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let base_url = parse_base_url(&raw_url)?;

        let poll_attempts = file.poll_attempts.unwrap_or(DEFAULT_POLL_ATTEMPTS);
        if poll_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "poll_attempts",
                reason: "must be at least 1".into(),
            });
        }
        let health_timeout = positive_secs(
            "health_timeout_secs",
            file.health_timeout_secs.unwrap_or(DEFAULT_HEALTH_TIMEOUT_SECS),
        )?;
        let request_timeout = positive_secs(
            "request_timeout_secs",
            file.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )?;

        let launch_command = file
            .launch_command
            .unwrap_or_else(|| DEFAULT_LAUNCH_COMMAND.to_string());
        let launch = LaunchSpec::parse(&launch_command, file.working_dir)?;

        let mut style = StyleOptions::detect();
        if overrides.no_color {
            style.use_color = false;
            style.use_emoji = false;
        }

        Ok(Config {
            base_url,
            health_timeout,
            request_timeout,
            poll_attempts,
            poll_interval: Duration::from_millis(
                file.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
            launch_command,
            launch,
            server_log: file.server_log,
            browser: overrides
                .browser
                .or(file.browser)
                .filter(|b| !b.trim().is_empty()),
            style,
        })
    }

    /// Absolute URL for `path` under the base address, e.g. `/api/status`.
    /// An empty path yields the bare base address.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

/// Load a config file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let lower = path.to_string_lossy().to_ascii_lowercase();
    let parsed = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        serde_yaml::from_str::<Option<FileConfig>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<FileConfig>(&raw).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        value: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme '{other}' (expected http or https)"),
        }),
    }
}

fn positive_secs(key: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            reason: "must be at least 1 second".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}
