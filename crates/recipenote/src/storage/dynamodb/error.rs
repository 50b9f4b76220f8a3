//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `recipenote_core::storage`.
//! Transient faults (dispatch failures, timeouts, throttling, request
//! limits, internal server errors) become `Unavailable` so callers can
//! retry with backoff; conditional-check failures become the terminal kind
//! the calling operation expects; nothing is swallowed, and everything
//! unclassified surfaces as `QueryFailed`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;

use recipenote_core::storage::RepositoryError;

/// Classify transport-level faults that never carried a service response.
///
/// A refused connection or a timed-out request is transient and must stay
/// retryable; converting to the service error first would fold these into
/// an unhandled variant and lose the classification.
fn transport_fault<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::DispatchFailure(_) => {
            Some(RepositoryError::Unavailable("Request dispatch failed".to_string()))
        }
        SdkError::TimeoutError(_) => {
            Some(RepositoryError::Unavailable("Request timed out".to_string()))
        }
        _ => None,
    }
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    if let Some(unavailable) = transport_fault(&err) {
        return unavailable;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Unavailable("Throughput exceeded".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            RepositoryError::Unavailable("Request limit exceeded".to_string())
        }
        GetItemError::InternalServerError(_) => {
            RepositoryError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    if let Some(unavailable) = transport_fault(&err) {
        return unavailable;
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Unavailable("Throughput exceeded".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            RepositoryError::Unavailable("Request limit exceeded".to_string())
        }
        QueryError::InternalServerError(_) => {
            RepositoryError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
///
/// A failed conditional check means the exact primary key already exists,
/// reported as `AlreadyExists` against the given entity.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(unavailable) = transport_fault(&err) {
        return unavailable;
    }
    let id_str = id.into();
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => RepositoryError::AlreadyExists {
            entity_type,
            id: id_str,
        },
        PutItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Unavailable("Throughput exceeded".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::Unavailable("Request limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::Unavailable("Transaction conflict".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
///
/// Updates are conditioned on the item existing, so a failed conditional
/// check reports `NotFound`, including updates attempted under the wrong
/// owner's partition, which fail closed here.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(unavailable) = transport_fault(&err) {
        return unavailable;
    }
    let id_str = id.into();
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => RepositoryError::NotFound {
            entity_type,
            id: id_str,
        },
        UpdateItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Unavailable("Throughput exceeded".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            RepositoryError::Unavailable("Request limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            RepositoryError::Unavailable("Transaction conflict".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            RepositoryError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
///
/// Deletes carry no condition expression, so an absent key is not an error
/// at this level; only backend faults surface.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> RepositoryError {
    if let Some(unavailable) = transport_fault(&err) {
        return unavailable;
    }
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Unavailable("Throughput exceeded".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            RepositoryError::Unavailable("Request limit exceeded".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            RepositoryError::Unavailable("Transaction conflict".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            RepositoryError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_item_timeout_is_retryable() {
        let err: SdkError<GetItemError> = SdkError::timeout_error("request timed out");
        let mapped = map_get_item_error(err);
        assert!(matches!(mapped, RepositoryError::Unavailable(_)));
        assert!(mapped.is_retryable());
    }

    #[test]
    fn query_timeout_is_retryable() {
        let err: SdkError<QueryError> = SdkError::timeout_error("request timed out");
        assert!(map_query_error(err).is_retryable());
    }

    #[test]
    fn put_item_timeout_is_retryable_not_already_exists() {
        let err: SdkError<PutItemError> = SdkError::timeout_error("request timed out");
        let mapped = map_put_item_error(err, "User", "alice");
        assert!(matches!(mapped, RepositoryError::Unavailable(_)));
    }

    #[test]
    fn update_item_timeout_is_retryable_not_not_found() {
        let err: SdkError<UpdateItemError> = SdkError::timeout_error("request timed out");
        let mapped = map_update_item_error(err, "Recipe", "r-1");
        assert!(matches!(mapped, RepositoryError::Unavailable(_)));
    }

    #[test]
    fn delete_item_timeout_is_retryable() {
        let err: SdkError<DeleteItemError> = SdkError::timeout_error("request timed out");
        assert!(map_delete_item_error(err).is_retryable());
    }
}
