// Client module - the HTTP boundary to the analysis backend
//
// One request per upload: POST {base}/analyze?mode=&lang= with a multipart
// `file` part. Failures are classified here so the UI only has to map an
// `AnalysisError` onto an alert; success bodies are classified once into
// `AnalysisResponse`.

use super::{AnalysisRequest, AnalysisResponse};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Connection refused, DNS, timeout, body read failure
    #[error("Backend failed to respond")]
    Transport(#[source] reqwest::Error),

    #[error("Backend failed to respond")]
    Status(StatusCode),

    /// 2xx but the body was not JSON
    #[error("Backend failed to respond")]
    Decode(#[source] reqwest::Error),

    /// The backend answered with an `error` field
    #[error("{0}")]
    Application(String),
}

/// Coarse failure class, used as a structured log field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status,
    Decode,
    Application,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Status => "status",
            ErrorKind::Decode => "decode",
            ErrorKind::Application => "application",
        }
    }
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Transport(_) => ErrorKind::Transport,
            AnalysisError::Status(_) => ErrorKind::Status,
            AnalysisError::Decode(_) => ErrorKind::Decode,
            AnalysisError::Application(_) => ErrorKind::Application,
        }
    }

    /// Text for the blocking alert
    pub fn alert_message(&self) -> String {
        format!("Analysis failed: {}", self)
    }

    /// Underlying cause for logs (the alert text hides it)
    pub fn detail(&self) -> String {
        match self {
            AnalysisError::Transport(e) | AnalysisError::Decode(e) => e.to_string(),
            AnalysisError::Status(status) => format!("HTTP {}", status),
            AnalysisError::Application(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        AnalysisError::Transport(e)
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// `timeout_secs == 0` disables the request timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let http = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let part = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime)?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            url = %self.endpoint(),
            mode = request.mode().as_str(),
            lang = request.language.as_str(),
            bytes = request.bytes.len(),
            "Sending analysis request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .query(&[
                ("mode", request.mode().as_str()),
                ("lang", request.language.as_str()),
            ])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status(status));
        }

        let body: Value = response.json().await.map_err(AnalysisError::Decode)?;

        if let Some(message) = error_message(&body) {
            return Err(AnalysisError::Application(message));
        }

        Ok(AnalysisResponse::classify(body.get("analysis")))
    }
}

/// The body's `error` field, if it holds anything worth reporting.
///
/// Null, false, 0 and "" are treated as no error.
fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
