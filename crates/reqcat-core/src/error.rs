//! Core error types.

use std::fmt;

use thiserror::Error;

use crate::form::Violation;

/// A transport or backend failure reported by a [`Backend`](crate::Backend).
///
/// This is the only error kind that crosses the core boundary as a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkError {
    /// Human-readable message.
    pub message: String,
    /// HTTP-like status code, when the backend answered at all.
    pub status: Option<u16>,
}

impl NetworkError {
    /// Create an error without a status (unreachable backend, timeout).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Create an error carrying a backend status code.
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Every client-side rule violation found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    /// Wrap a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The individual violations, in rule order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consume into the underlying list.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.violations.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Core errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Backend failure during a catalog or submission call.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Client-side validation failed; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The edit session was already submitted or cancelled.
    #[error("edit session is closed")]
    SessionClosed,

    /// JSON encoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::RuleKind;

    #[test]
    fn test_network_error_display() {
        assert_eq!(NetworkError::new("timed out").to_string(), "timed out");
        assert_eq!(
            NetworkError::with_status("unauthorized", 401).to_string(),
            "unauthorized (status 401)"
        );
    }

    #[test]
    fn test_validation_errors_join_messages() {
        let errors = ValidationErrors::new(vec![
            Violation::new("nombre", RuleKind::Required, "nombre is required"),
            Violation::new("descripcion", RuleKind::Required, "descripcion is required"),
        ]);

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "nombre is required; descripcion is required"
        );
    }
}
