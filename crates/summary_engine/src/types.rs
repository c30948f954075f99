use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub type RequestId = u64;

/// JSON body of `POST /api/summary_bili`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    pub url: String,
}

/// Decoded reply of the summary endpoint.
///
/// Fields are kept as raw JSON because the backend contract is loose:
/// `success` is only "boolean-like" and either text field may be missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryResponse {
    pub success: Value,
    pub summary: Value,
    pub error: Value,
}

impl SummaryResponse {
    /// Reads the reply body. `null` is rejected; any other non-object body has no fields.
    pub fn from_json(body: Value) -> Result<Self, FetchError> {
        match body {
            Value::Null => Err(FetchError::new(FailureKind::Decode, "response body is null")),
            Value::Object(mut fields) => Ok(Self {
                success: fields.remove("success").unwrap_or(Value::Null),
                summary: fields.remove("summary").unwrap_or(Value::Null),
                error: fields.remove("error").unwrap_or(Value::Null),
            }),
            _ => Ok(Self::default()),
        }
    }

    pub fn is_success(&self) -> bool {
        is_truthy(&self.success)
    }

    /// Summary markdown; empty when the field is missing or not a string.
    pub fn summary_text(&self) -> String {
        self.summary.as_str().map(ToOwned::to_owned).unwrap_or_default()
    }

    /// Server-supplied error, if it is truthy. Non-string values are shown as JSON text.
    pub fn error_text(&self) -> Option<String> {
        if !is_truthy(&self.error) {
            return None;
        }
        Some(match &self.error {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        })
    }
}

/// Loose JSON truthiness: `false`, `null`, `0`, `NaN` and `""` are false, everything else true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SummaryCompleted {
        request_id: RequestId,
        result: Result<SummaryResponse, FetchError>,
    },
    HealthChecked {
        online: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    Decode,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
