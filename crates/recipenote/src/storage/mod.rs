//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `recipenote_core::storage`, selected via feature flags.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory` (default): in-memory backend for tests
//!
//! Both backends stamp entities and paginate identically, so tests written
//! against the in-memory backend exercise the same observable contract.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;
