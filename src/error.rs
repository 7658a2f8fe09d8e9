use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

use crate::upload::UploadError;

#[derive(Debug, Error)]
pub enum PreloviumError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Process request failed (status: {status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl PreloviumError {
    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        PreloviumError::Status {
            status,
            body: body.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PreloviumError::Config(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            PreloviumError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            PreloviumError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check that the server is running and reachable (--server / PRELOVIUM_SERVER).",
            ),
            PreloviumError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify the server URL (e.g., http://localhost:8080).",
            ),
            PreloviumError::Status { status, body } => {
                let remediation = if status.is_client_error() {
                    "The server rejected the request; check the example name or the uploaded files (png, jpg, jpeg)."
                } else {
                    "The server failed to process the images; retry later."
                };
                ErrorPayload::new(
                    ErrorCategory::Server,
                    format!("Process request failed (status {}): {}", status, body),
                    remediation,
                )
            }
            PreloviumError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Server,
                e.to_string(),
                "The response or input was not valid JSON; run with --verbose for details.",
            ),
            PreloviumError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("unsupported file extension") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a supported image type (png, jpg, jpeg).",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else if lower.contains("server") || lower.contains("url") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set a valid http(s) server URL via --server, PRELOVIUM_SERVER or the config file.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file.",
                    )
                }
            }
            PreloviumError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

impl From<UploadError> for PreloviumError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Read { source, .. } => PreloviumError::Io(source),
            other => PreloviumError::Config(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PreloviumError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
