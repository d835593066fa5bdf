//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid node path: {0}")]
    InvalidPath(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid run transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Malformed outline response: {0}")]
    MalformedOutline(String),

    #[error("Malformed audio payload: {0}")]
    MalformedAudio(String),
}

impl DomainError {
    /// Check if this error was caused by addressing a node that does not exist
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, DomainError::InvalidPath(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let error = DomainError::InvalidTransition {
            from: "idle".to_string(),
            to: "completed".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid run transition: idle -> completed");
    }

    #[test]
    fn test_is_invalid_path_check() {
        assert!(DomainError::InvalidPath("9-9".to_string()).is_invalid_path());
        assert!(!DomainError::InvalidModel(String::new()).is_invalid_path());
        assert!(!DomainError::MalformedOutline("x".to_string()).is_invalid_path());
    }
}
