//! Error types for fintrack-core
//!
//! Provides the error taxonomy of the reporting engine: bad input caught
//! defensively at the facade, collaborator failures passed through
//! unchanged, and data inconsistencies surfaced under the fail-fast policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or out-of-range request parameters
    BadRequest,
    /// Request failed a validation rule
    ValidationError,
    /// Transaction references a category absent from the user's list
    CategoryNotFound,
    /// A persistence collaborator failed
    StoreUnavailable,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::BadRequest => write!(f, "BAD_REQUEST"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::CategoryNotFound => write!(f, "CATEGORY_NOT_FOUND"),
            ErrorCode::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Severity levels for logging and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Debug - diagnostic only
    Debug,
    /// Info - expected condition
    Info,
    /// Warning - request failed, caller mistake
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - engine may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail data
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for fintrack-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: String },

    #[error("Store unavailable: {detail}")]
    StoreUnavailable { detail: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::BadRequest { .. } => ErrorCode::BadRequest,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::CategoryNotFound { .. } => ErrorCode::CategoryNotFound,
            CoreError::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::BadRequest { .. } => ErrorSeverity::Warning,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::CategoryNotFound { .. } => ErrorSeverity::Info,
            CoreError::StoreUnavailable { .. } => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::BadRequest { message } | CoreError::ValidationError { message } => {
                details = details
                    .with_detail(serde_json::json!({ "validation_message": message }));
                details = details.with_suggestion(
                    "Check the timeframe, month (0-11) and date range parameters.".to_string(),
                );
            }
            CoreError::CategoryNotFound { id } => {
                details = details.with_detail(serde_json::json!({ "category_id": id }));
                details = details.with_suggestion(
                    "The transaction references a category missing from the user's category list."
                        .to_string(),
                );
                details = details.with_suggestion(
                    "Set reporting.unknown_category_policy to 'skip' to exclude such rows instead."
                        .to_string(),
                );
            }
            CoreError::StoreUnavailable { detail } => {
                details = details.with_detail(serde_json::json!({ "store_detail": detail }));
                details = details
                    .with_suggestion("Check connectivity to the persistence layer.".to_string());
            }
            _ => {}
        }

        details
    }

    /// Log the error through the `log` facade at its severity level
    pub fn log(&self, operation: &str) {
        match self.severity() {
            ErrorSeverity::Debug => log::debug!(
                target: "fintrack::error",
                "[{}] {} - Operation: {}", self.code(), self, operation
            ),
            ErrorSeverity::Info => log::info!(
                target: "fintrack::error",
                "[{}] {} - Operation: {}", self.code(), self, operation
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "fintrack::error",
                "[{}] {} - Operation: {}", self.code(), self, operation
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => log::error!(
                target: "fintrack::error",
                "[{}] {} - Operation: {}", self.code(), self, operation
            ),
        }
    }
}

// ==================== Tests ====================
