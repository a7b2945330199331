use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the remote catalog API attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl ApiStatus {
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .filter(|status| status.status_message.is_some())
    }

    pub fn message(&self) -> &str {
        self.status_message.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    MovieList,
    MovieDetail,
    Credits,
    Videos,
    Reviews,
}

#[derive(Debug, Clone, Error)]
#[error("malformed {payload:?} payload: {message}")]
pub struct DecodeError {
    pub payload: PayloadKind,
    pub message: String,
}

impl DecodeError {
    pub fn new(payload: PayloadKind, message: impl Into<String>) -> Self {
        Self {
            payload,
            message: message.into(),
        }
    }
}
