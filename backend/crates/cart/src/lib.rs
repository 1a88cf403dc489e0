//! Cart Aggregator Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Cart/line-item entities, repository traits
//! - `application/` - One use case per cart operation
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Pricing Model
//! Line items snapshot the product's unit price at add time; a later price
//! change never moves an existing line. Totals are always derived, never
//! stored: `total_items = sum(quantity)`, `total_amount = sum(line total)`.
//!
//! ## Consistency Model
//! A cart holds at most one line item per product; adding an already-present
//! product increments its quantity. Increments are pushed down to the store
//! as atomic row updates, so concurrent adds from two tabs equal their
//! sequential application. Carts are soft-deactivated, never deleted.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CartConfig;
pub use error::{CartError, CartResult};
pub use infra::postgres::PgCartRepository;
pub use presentation::router::cart_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::cart::*;
    pub use crate::domain::entity::product::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgCartRepository as CartStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
