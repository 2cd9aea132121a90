//! HTTP client for the Matriz backend.
//!
//! Every public call is a single attempt with a hard timeout. Whatever goes
//! wrong (connection refused, timeout, non-success status, body that is not
//! the expected JSON) comes back as `false` / `None`; the cause is only logged.

pub mod model;
#[cfg(test)]
#[path = "../../tests/common/mock_api.rs"]
pub(crate) mod mock;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
pub use model::{
    AiTestRequest, AiTestResponse, BackupReceipt, BackupStatus, NoteReceipt, NoteRequest,
    ServiceStatus,
};

/// Why a call came back absent. Never leaves this module except through logs.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("service answered HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub trait HealthCheck {
    fn check_health(&self) -> bool;
}

/// Operations the commands need from the backend.
pub trait ServiceApi: HealthCheck {
    fn get_status(&self) -> Option<ServiceStatus>;
    fn get_backup_status(&self) -> Option<BackupStatus>;
    fn create_backup(&self) -> Option<BackupReceipt>;
    fn test_ai(&self, prompt: &str) -> Option<AiTestResponse>;
    fn create_note(&self, note: &NoteRequest) -> Option<NoteReceipt>;
}

pub struct ServiceClient {
    base: String,
    http: reqwest::Client,
    rt: tokio::runtime::Runtime,
    health_timeout: Duration,
    request_timeout: Duration,
}

impl ServiceClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_timeouts(
            &config.url_for(""),
            config.health_timeout,
            config.request_timeout,
        )
    }

    /// `base` is the bare origin, e.g. `http://localhost:3001`.
    pub fn with_timeouts(
        base: &str,
        health_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create Tokio runtime")?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("matriz-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ServiceClient {
            base: base.trim_end_matches('/').to_string(),
            http,
            rt,
            health_timeout,
            request_timeout,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base, path)
    }

    fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let req = self
            .http
            .get(self.api_url(path))
            .timeout(self.health_timeout);
        self.send(req)
    }

    fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        let mut req = self
            .http
            .post(self.api_url(path))
            .timeout(self.request_timeout)
            .header(CONTENT_TYPE, "application/json");
        if let Some(b) = body {
            req = req.json(b);
        }
        self.send(req)
    }

    fn send(&self, req: reqwest::RequestBuilder) -> Result<Value, ClientError> {
        self.rt.block_on(async {
            let resp = req.send().await.map_err(ClientError::Unreachable)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(ClientError::Status(status));
            }
            let bytes = resp.bytes().await.map_err(ClientError::Unreachable)?;
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Malformed(e.to_string()))
        })
    }

    /// POST `body` as JSON to `/api{path}`; the decoded answer or nothing.
    pub fn post_json(&self, path: &str, body: Option<&Value>) -> Option<Value> {
        absent(path, self.post(path, body))
    }

    fn post_typed<T: serde::de::DeserializeOwned>(&self, path: &str, body: Option<&Value>) -> Option<T> {
        let value = self.post_json(path, body)?;
        absent(path, decode(value))
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Malformed(e.to_string()))
}

/// Collapse a failure into "absent", keeping the reason in the debug log.
fn absent<T>(path: &str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(path, error = %e, "call came back absent");
            None
        }
    }
}

impl HealthCheck for ServiceClient {
    fn check_health(&self) -> bool {
        self.get_status().is_some_and(|s| s.ok)
    }
}

impl ServiceApi for ServiceClient {
    fn get_status(&self) -> Option<ServiceStatus> {
        let path = "/status";
        let value = absent(path, self.get_json(path))?;
        absent(path, decode(value))
    }

    fn get_backup_status(&self) -> Option<BackupStatus> {
        let path = "/backup/status";
        let value = absent(path, self.get_json(path))?;
        let parsed = BackupStatus::from_envelope(&value)?;
        absent(path, parsed.map_err(|e| ClientError::Malformed(e.to_string())))
    }

    fn create_backup(&self) -> Option<BackupReceipt> {
        self.post_typed("/backup/create", None)
    }

    fn test_ai(&self, prompt: &str) -> Option<AiTestResponse> {
        let body = serde_json::to_value(AiTestRequest {
            prompt: prompt.to_string(),
        })
        .ok()?;
        self.post_typed("/ai/test", Some(&body))
    }

    fn create_note(&self, note: &NoteRequest) -> Option<NoteReceipt> {
        let body = serde_json::to_value(note).ok()?;
        self.post_typed("/strategic-notes", Some(&body))
    }
}
