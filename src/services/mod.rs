//! Business logic behind the HTTP handlers.

/// Login credential verification
pub mod credentials;
/// Storage abstraction for items
pub mod item_store;
/// In-memory item backend
pub mod memory_store;
/// PostgreSQL item backend
pub mod pg_store;
