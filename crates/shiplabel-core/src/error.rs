//! Error types for the shiplabel-core library.

use thiserror::Error;

/// Message shown to the user whenever an autofill attempt fails.
pub const AUTOFILL_FAILED_MESSAGE: &str =
    "Could not parse address. Please try again or enter manually.";

/// Main error type for the shiplabel library.
#[derive(Error, Debug)]
pub enum ShiplabelError {
    /// Address extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to address extraction and autofill.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No API credential is configured.
    #[error("address extraction unavailable: no API key found in {0}")]
    Unavailable(String),

    /// The pasted text was empty.
    #[error("no address text to parse")]
    EmptyInput,

    /// A parse for this address is already pending.
    #[error("an address parse is already in progress")]
    InFlight,

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered without any text.
    #[error("service returned an empty response")]
    EmptyResponse,

    /// The response was not valid JSON, or not the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A required address field is absent from the response.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An address field is present but not a string.
    #[error("field {0} is not a string")]
    InvalidField(&'static str),
}

impl ExtractionError {
    /// Generic message to surface to the user.
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::Unavailable(_) => {
                "AI autofill is unavailable: no API key is configured.".to_string()
            }
            ExtractionError::EmptyInput => "Paste an address to auto-fill.".to_string(),
            ExtractionError::InFlight => "Parsing...".to_string(),
            _ => AUTOFILL_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Result type for the shiplabel library.
pub type Result<T> = std::result::Result<T, ShiplabelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_share_generic_message() {
        assert_eq!(
            ExtractionError::Malformed("expected value".into()).user_message(),
            AUTOFILL_FAILED_MESSAGE
        );
        assert_eq!(
            ExtractionError::Status { status: 500, body: String::new() }.user_message(),
            AUTOFILL_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_unavailable_is_reported_distinctly() {
        let message = ExtractionError::Unavailable("API_KEY".into()).user_message();
        assert_ne!(message, AUTOFILL_FAILED_MESSAGE);
        assert!(message.contains("unavailable"));
    }
}
