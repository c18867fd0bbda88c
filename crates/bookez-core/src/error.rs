//! Unified application error types for BookEZ.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every booking-facing failure carries
//! a kind from the closed taxonomy below plus a stable human-readable reason.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested booking, room, or member was not found.
    NotFound,
    /// Input was malformed at the transport level (missing field, bad shape).
    Validation,
    /// A booking policy was violated (capacity, duration, hours, holiday, buffer).
    Policy,
    /// A time-slot conflict for the room or for a roster member.
    Conflict,
    /// A roster or actor eligibility rule failed (inactive account, admin in
    /// roster, duplicate member, non-leader attempting a leader-only action).
    Eligibility,
    /// The acting or listed member is under an active suspension.
    Blocked,
    /// The booking is not in the required status or time window for the
    /// attempted operation.
    State,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Policy => write!(f, "POLICY_VIOLATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Eligibility => write!(f, "ELIGIBILITY"),
            Self::Blocked => write!(f, "BLOCKED"),
            Self::State => write!(f, "STATE"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout BookEZ.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. Expected business conditions (policy,
/// conflict, eligibility, blocked, state) are ordinary return values, never
/// panics.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a transport-level validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a booking-policy violation error.
    pub fn policy(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Policy, message)
    }

    /// Create a time-slot conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an eligibility error.
    pub fn eligibility(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Eligibility, message)
    }

    /// Create a suspension-block error.
    pub fn blocked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Blocked, message)
    }

    /// Create a lifecycle-state error.
    pub fn state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::State, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error represents an expected business refusal rather
    /// than an infrastructure failure.
    pub fn is_business(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NotFound
                | ErrorKind::Validation
                | ErrorKind::Policy
                | ErrorKind::Conflict
                | ErrorKind::Eligibility
                | ErrorKind::Blocked
                | ErrorKind::State
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_kinds() {
        assert!(AppError::policy("too short").is_business());
        assert!(AppError::conflict("overlap").is_business());
        assert!(AppError::blocked("suspended").is_business());
        assert!(!AppError::database("down").is_business());
        assert!(!AppError::internal("bug").is_business());
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::state("booking is not active");
        assert_eq!(err.to_string(), "STATE: booking is not active");
    }
}
