//! Infrastructure Layer
//!
//! PostgreSQL repository implementation.

pub mod postgres;

// Re-exports
pub use postgres::PgCartRepository;
