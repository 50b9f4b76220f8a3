//! Storage backends for recipenote.
//!
//! Users and recipes share one physical DynamoDB table: composite `PK`/`SK`
//! keys co-locate a user's recipes under their partition, and the `GSI1`
//! secondary index resolves username and recipe-id lookups. The
//! [`storage::dynamodb`] module implements the repository traits from
//! `recipenote_core::storage` against that layout; [`storage::inmemory`]
//! provides a behavior-equivalent backend for tests.

pub mod storage;

pub use recipenote_core as core;
