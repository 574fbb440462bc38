// Crate-level error type
use serde_json::{json, Value};
use thiserror::Error;

use crate::honorarios::FeeError;
use crate::identifiers::IdentifierError;
use crate::validation::{PayloadError, ValidationReport};

#[derive(Error, Debug)]
pub enum SghmError {
    #[error("Invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),

    #[error(transparent)]
    Validation(#[from] ValidationReport),

    #[error("Invalid fee: {0}")]
    Fee(#[from] FeeError),

    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("Could not parse payload: {0}")]
    Parse(String),

    #[error("No validator for '{entity}.{action}'")]
    UnknownValidator { entity: String, action: String },
}

impl From<serde_json::Error> for SghmError {
    fn from(err: serde_json::Error) -> Self {
        SghmError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for SghmError {
    fn from(err: serde_yaml::Error) -> Self {
        SghmError::Parse(err.to_string())
    }
}

impl SghmError {
    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SghmError::Identifier(_) => "INVALID_IDENTIFIER",
            SghmError::Validation(_) => "VALIDATION_ERROR",
            SghmError::Fee(_) => "INVALID_FEE",
            SghmError::Payload(_) | SghmError::Parse(_) => "INVALID_PAYLOAD",
            SghmError::UnknownValidator { .. } => "UNKNOWN_VALIDATOR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            SghmError::Validation(report) => {
                let mut body = json!(report);
                body["code"] = json!(self.error_code());
                body
            }
            _ => json!({
                "error": self.to_string(),
                "code": self.error_code()
            }),
        }
    }
}
