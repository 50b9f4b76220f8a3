//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! The HTTP layer itself is out of scope here; this mapping keeps the
//! error-kind to status-code translation deterministic and in one place.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `Unavailable` -> 503 (Service Unavailable)
/// - `Validation` -> 400 (Bad Request)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 500 (Internal Server Error)
/// - `QueryFailed` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use recipenote_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Recipe",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::Unavailable(_) => 503,
        RepositoryError::Validation(_) => 400,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 500,
        RepositoryError::QueryFailed(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::NotFound {
            entity_type: "Recipe",
            id: "r-123".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "alice".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_unavailable_maps_to_503() {
        let error = RepositoryError::Unavailable("throttled".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let error = RepositoryError::Validation("title too short".to_string());
        assert_eq!(repository_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_backend_faults_map_to_500() {
        for error in [
            RepositoryError::Serialization("bad json".to_string()),
            RepositoryError::InvalidData("missing field".to_string()),
            RepositoryError::QueryFailed("boom".to_string()),
        ] {
            assert_eq!(repository_error_to_status_code(&error), 500);
        }
    }
}
