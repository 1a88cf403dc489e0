//! Infrastructure Layer
//!
//! Database implementation of the session store.

pub mod postgres;

pub use postgres::PgSessionStore;
