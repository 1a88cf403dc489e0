//! Domain Layer
//!
//! Session entity, store trait, and the identity-provider seam.

pub mod entity;
pub mod identity;
pub mod repository;

// Re-exports
pub use entity::session::SessionRecord;
pub use identity::{Identity, IdentityProvider};
pub use repository::SessionStore;
