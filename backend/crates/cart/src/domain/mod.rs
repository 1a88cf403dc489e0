//! Domain Layer
//!
//! Cart and line-item entities, product snapshot, repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::cart::{Cart, CartItem, CartSummary};
pub use entity::product::ProductSnapshot;
pub use repository::{CartRepository, ProductCatalog};
