//! Ephemeral storage backend backed by process memory.

mod repository;

pub use repository::InMemoryRepository;
