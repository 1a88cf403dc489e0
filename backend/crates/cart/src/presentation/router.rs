//! Cart Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::application::config::CartConfig;
use crate::domain::repository::{CartRepository, ProductCatalog};
use crate::infra::postgres::PgCartRepository;
use crate::presentation::handlers::{self, CartAppState};

/// Create the cart router with PostgreSQL repository
pub fn cart_router(repo: PgCartRepository, config: CartConfig) -> Router {
    cart_router_generic(repo, config)
}

/// Create a generic cart router for any repository implementation
pub fn cart_router_generic<R>(repo: R, config: CartConfig) -> Router
where
    R: CartRepository + ProductCatalog + Send + Sync + 'static,
{
    let state = CartAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/summary", get(handlers::get_summary::<R>))
        .route("/items", post(handlers::add_item::<R>))
        .route("/items/{product_id}", put(handlers::update_quantity::<R>))
        .route("/items/{product_id}", delete(handlers::remove_item::<R>))
        .route("/clear", post(handlers::clear_cart::<R>))
        .with_state(state)
}
