use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// The kinds are stable so that the HTTP layer can map them to status codes
/// deterministically. `Unavailable` is the only retryable kind; everything
/// else is terminal for the request that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    /// Transient backend fault. Callers may retry with backoff.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// Malformed caller input, rejected before any backend call.
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A stored item that does not decode back into its entity.
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// Unclassified backend failure.
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl RepositoryError {
    /// Returns true if the operation may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::Unavailable(_))
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Recipe",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Recipe not found: abc-123");
    }

    #[test]
    fn test_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "alice".to_string(),
        };
        assert_eq!(error.to_string(), "User already exists: alice");
    }

    #[test]
    fn test_unavailable_display_and_retryable() {
        let error = RepositoryError::Unavailable("throughput exceeded".to_string());
        assert_eq!(error.to_string(), "Storage unavailable: throughput exceeded");
        assert!(error.is_retryable());
    }

    #[test]
    fn test_terminal_kinds_are_not_retryable() {
        let errors = [
            RepositoryError::NotFound {
                entity_type: "Recipe",
                id: "x".to_string(),
            },
            RepositoryError::Validation("title too short".to_string()),
            RepositoryError::QueryFailed("boom".to_string()),
        ];
        for error in errors {
            assert!(!error.is_retryable());
        }
    }

    #[test]
    fn test_validation_display() {
        let error = RepositoryError::Validation("username: too short".to_string());
        assert_eq!(error.to_string(), "Validation failed: username: too short");
    }
}
