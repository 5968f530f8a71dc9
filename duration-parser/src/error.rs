//! Parse errors with machine-readable codes
//!
//! Every failure aborts the whole call: there are no partial results.
//! Unknown suffixes are only an error when `ignoreError` is off.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_INPUT_TYPE: &str = "INVALID_INPUT_TYPE";
    pub const UNKNOWN_TARGET_UNIT: &str = "UNKNOWN_TARGET_UNIT";
    pub const UNKNOWN_SOURCE_UNIT: &str = "UNKNOWN_SOURCE_UNIT";
    pub const INVALID_AMOUNT: &str = "INVALID_AMOUNT";
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Argument input must be a string, got {found}")]
    InvalidInputType { found: &'static str },

    #[error("Unrecognized target time unit: {0}")]
    UnknownTargetUnit(String),

    /// `start`/`end` are char offsets of the whole token in the normalized input
    #[error("Unrecognized input time unit: {unit}")]
    UnknownSourceUnit { unit: String, start: usize, end: usize },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl ParseError {
    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::InvalidInputType { .. } => codes::INVALID_INPUT_TYPE,
            ParseError::UnknownTargetUnit(_) => codes::UNKNOWN_TARGET_UNIT,
            ParseError::UnknownSourceUnit { .. } => codes::UNKNOWN_SOURCE_UNIT,
            ParseError::InvalidAmount(_) => codes::INVALID_AMOUNT,
        }
    }

    /// Hint for fixing the error, if there is a useful one
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ParseError::InvalidInputType { .. } => Some("Pass the duration as a string, e.g. \"1h 30m\""),
            ParseError::UnknownTargetUnit(_) => Some("Use a unit name such as millisecond, second, minute or hour"),
            ParseError::UnknownSourceUnit { .. } => Some("Fix the unit or enable ignoreError to skip unknown units"),
            ParseError::InvalidAmount(_) => None,
        }
    }
}

/// Serializable error shape for JSON consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&ParseError> for ErrorBody {
    fn from(err: &ParseError) -> Self {
        let body = ErrorBody::new(err.code(), err.to_string());
        match err.suggestion() {
            Some(s) => body.with_suggestion(s),
            None => body,
        }
    }
}

impl From<ParseError> for ErrorBody {
    fn from(err: ParseError) -> Self {
        ErrorBody::from(&err)
    }
}
