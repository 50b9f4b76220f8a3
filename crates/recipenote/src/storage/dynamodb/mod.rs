//! DynamoDB storage backend.
//!
//! Single-table layout: `PK`/`SK` composite primary key, `GSI1` secondary
//! index. [`keys`] generates the physical keys, [`conversions`] maps
//! entities to and from attribute maps, [`update`] renders partial-update
//! expressions, [`cursor`] encodes opaque pagination tokens, [`gateway`]
//! wraps the client, and [`repository`] implements the core traits.

pub mod conversions;
pub mod cursor;
mod error;
pub mod gateway;
pub mod keys;
mod repository;
pub mod update;

pub use repository::DynamoDbRepository;
