//! Admin session storage.

mod memory_repository;

pub use memory_repository::InMemorySessionRepository;
