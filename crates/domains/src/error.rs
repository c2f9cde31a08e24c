//! # DomainError
//!
//! Centralized error taxonomy for every operation the ports expose.
//! Adapters translate their own failures into these variants at the boundary.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A referenced row does not exist (e.g., Forum, Thread, Reply, User).
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// User-supplied input failed a domain rule (e.g., empty required field).
    #[error("validation error: {0}")]
    Validation(String),

    /// Underlying store failure, including a rolled-back transaction.
    /// Reported generically to callers; never partial, never retried.
    #[error("persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DomainError {
    /// Shorthand for a [`DomainError::NotFound`] with a displayable id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Wraps any adapter error as an opaque persistence failure.
    pub fn persistence(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Persistence(err.into())
    }

    /// True when the error should surface as "not found" rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A specialized Result type for domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_entity_and_id() {
        let err = DomainError::not_found("thread", 42);
        assert_eq!(err.to_string(), "thread 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn persistence_wraps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = DomainError::persistence(io);
        assert!(err.to_string().contains("disk gone"));
        assert!(!err.is_not_found());
    }
}
