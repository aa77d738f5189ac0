//! Custom error types for certdesk
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for certdesk operations
#[derive(Error, Debug)]
pub enum CertError {
    /// Configuration-related errors (e.g. no prefix configured for a year)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors; all violations are collected before reporting
    #[error("Validation error: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Operation not permitted in the record's current lifecycle state
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Edition increment would leave the 2-digit range
    #[error("Edition range error: {0}")]
    EditionRange(String),

    /// Certificate number sequence for the year prefix is used up
    #[error("Allocation exhausted: {0}")]
    AllocationExhausted(String),

    /// The current user lacks the required role
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Render errors (certificate form output)
    #[error("Render error: {0}")]
    Render(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Audit log write failure; callers report these but never propagate them
    /// past the primary mutation
    #[error("Audit log error: {0}")]
    AuditLog(String),
}

impl CertError {
    /// Create a validation error from a single message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(vec![msg.into()])
    }

    /// Create a "not found" error for certificates
    pub fn certificate_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Certificate",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for year prefixes
    pub fn prefix_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Prefix",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an illegal-state error
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CertError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for certdesk operations
pub type CertResult<T> = Result<T, CertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CertError::Config("no prefix configured for year 2024".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: no prefix configured for year 2024"
        );
    }

    #[test]
    fn test_validation_joins_all_messages() {
        let err = CertError::Validation(vec![
            "Serial Number is required.".into(),
            "Quantity must be between 0 and 99999.".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation error: Serial Number is required. Quantity must be between 0 and 99999."
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_found_error() {
        let err = CertError::certificate_not_found("AB936000");
        assert_eq!(err.to_string(), "Certificate not found: AB936000");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_illegal_state_error() {
        let err = CertError::IllegalState("Cannot update a cancelled certificate".into());
        assert!(err.is_illegal_state());
        assert!(err.to_string().contains("cancelled"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cert_err: CertError = io_err.into();
        assert!(matches!(cert_err, CertError::Io(_)));
    }
}
