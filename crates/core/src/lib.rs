//! Core domain types and storage traits for recipenote.
//!
//! This crate is pure: domain entities, request payloads, input validation
//! and the repository trait contract live here, with no backend or transport
//! dependencies. Concrete storage backends implement the traits from
//! [`storage`] in the `recipenote` crate.

pub mod recipe;
pub mod storage;
