//! Single error type of the public API.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Co2Error {
    /// Non-zero electricity usage without a supplier/menu pair.
    #[error("electricity usage ({usage_kwh}kWh) is non-zero but power supplier id or menu id is missing (month: {month})")]
    Validation { month: String, usage_kwh: f64 },

    /// Supplier/menu pair absent from the factor catalog.
    #[error("unknown power supplier/menu combination '{supplier_id}'/'{menu_id}' (month: {month})")]
    Lookup {
        month: String,
        supplier_id: String,
        menu_id: String,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Malformed or incomplete factor table. Fatal, never the caller's fault.
    #[error("factor catalog defect: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Co2Error>;

/// Who has to act on a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request is wrong; resubmitting a fixed request succeeds.
    Client,
    /// Configuration or environment defect.
    Internal,
}

impl Co2Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Co2Error::Validation { .. }
            | Co2Error::Lookup { .. }
            | Co2Error::InvalidRequest(_)
            | Co2Error::Csv(_)
            | Co2Error::Json(_)
            | Co2Error::Parse(_) => ErrorKind::Client,
            Co2Error::Catalog(_) | Co2Error::Io(_) | Co2Error::Xml(_) => ErrorKind::Internal,
        }
    }

    /// HTTP-equivalent status for transports that expose the engine.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Client => 400,
            ErrorKind::Internal => 500,
        }
    }

    /// Month the failure belongs to, if it came from a monthly record.
    pub fn month(&self) -> Option<&str> {
        match self {
            Co2Error::Validation { month, .. } | Co2Error::Lookup { month, .. } => Some(month.as_str()),
            _ => None,
        }
    }
}

/// Client-facing error payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<&Co2Error> for ErrorResponse {
    fn from(e: &Co2Error) -> Self {
        let detail = match e.kind() {
            ErrorKind::Client => e.to_string(),
            // internals stay out of the payload
            ErrorKind::Internal => "internal error".to_string(),
        };
        ErrorResponse { detail }
    }
}
