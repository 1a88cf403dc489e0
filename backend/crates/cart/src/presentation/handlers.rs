//! HTTP Handlers
//!
//! Every handler resolves the acting user from the request extensions,
//! where the session layer leaves a [`RequestIdentity`] for reconciled
//! authenticated requests. A missing identity is a 401, never a panic.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use std::sync::Arc;
use uuid::Uuid;

use kernel::context::RequestIdentity;
use kernel::id::ProductId;

use crate::application::config::CartConfig;
use crate::application::{
    AddItemInput, AddItemUseCase, ClearCartUseCase, GetSummaryUseCase, RemoveItemUseCase,
    UpdateQuantityInput, UpdateQuantityUseCase,
};
use crate::domain::repository::{CartRepository, ProductCatalog};
use crate::error::{CartError, CartResult};
use crate::presentation::dto::{AddItemRequest, CartSummaryResponse, UpdateQuantityRequest};

/// Shared state for cart handlers
pub struct CartAppState<R>
where
    R: CartRepository + ProductCatalog + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CartConfig>,
}

impl<R> Clone for CartAppState<R>
where
    R: CartRepository + ProductCatalog + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

fn require_identity(identity: Option<Extension<RequestIdentity>>) -> CartResult<RequestIdentity> {
    identity.map(|Extension(id)| id).ok_or(CartError::SignInRequired)
}

// ============================================================================
// Get Summary
// ============================================================================

/// GET /api/cart/summary
pub async fn get_summary<R>(
    State(state): State<CartAppState<R>>,
    identity: Option<Extension<RequestIdentity>>,
) -> CartResult<Json<CartSummaryResponse>>
where
    R: CartRepository + ProductCatalog + Send + Sync + 'static,
{
    let identity = require_identity(identity)?;

    let use_case = GetSummaryUseCase::new(state.repo.clone());
    let summary = use_case.execute(&identity.user_id).await?;

    Ok(Json(summary.into()))
}

// ============================================================================
// Add Item
// ============================================================================

/// POST /api/cart/items
pub async fn add_item<R>(
    State(state): State<CartAppState<R>>,
    identity: Option<Extension<RequestIdentity>>,
    Json(req): Json<AddItemRequest>,
) -> CartResult<Json<CartSummaryResponse>>
where
    R: CartRepository + ProductCatalog + Send + Sync + 'static,
{
    let identity = require_identity(identity)?;

    let use_case = AddItemUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = AddItemInput {
        product_id: ProductId::from_uuid(req.product_id),
        quantity: req.quantity,
    };

    let summary = use_case.execute(&identity.user_id, input).await?;

    Ok(Json(summary.into()))
}

// ============================================================================
// Update Quantity
// ============================================================================

/// PUT /api/cart/items/{product_id}
pub async fn update_quantity<R>(
    State(state): State<CartAppState<R>>,
    identity: Option<Extension<RequestIdentity>>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<UpdateQuantityRequest>,
) -> CartResult<Json<CartSummaryResponse>>
where
    R: CartRepository + ProductCatalog + Send + Sync + 'static,
{
    let identity = require_identity(identity)?;

    let use_case =
        UpdateQuantityUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = UpdateQuantityInput {
        product_id: ProductId::from_uuid(product_id),
        quantity: req.quantity,
    };

    let summary = use_case.execute(&identity.user_id, input).await?;

    Ok(Json(summary.into()))
}

// ============================================================================
// Remove Item
// ============================================================================

/// DELETE /api/cart/items/{product_id}
pub async fn remove_item<R>(
    State(state): State<CartAppState<R>>,
    identity: Option<Extension<RequestIdentity>>,
    Path(product_id): Path<Uuid>,
) -> CartResult<Json<CartSummaryResponse>>
where
    R: CartRepository + ProductCatalog + Send + Sync + 'static,
{
    let identity = require_identity(identity)?;

    let use_case = RemoveItemUseCase::new(state.repo.clone());
    let summary = use_case
        .execute(&identity.user_id, &ProductId::from_uuid(product_id))
        .await?;

    Ok(Json(summary.into()))
}

// ============================================================================
// Clear Cart
// ============================================================================

/// POST /api/cart/clear
pub async fn clear_cart<R>(
    State(state): State<CartAppState<R>>,
    identity: Option<Extension<RequestIdentity>>,
) -> CartResult<impl IntoResponse>
where
    R: CartRepository + ProductCatalog + Send + Sync + 'static,
{
    let identity = require_identity(identity)?;

    let use_case = ClearCartUseCase::new(state.repo.clone());
    use_case.execute(&identity.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
