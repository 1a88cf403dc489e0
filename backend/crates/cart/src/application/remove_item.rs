//! Remove Item Use Case
//!
//! Deletes a line item outright. Removal is idempotent: removing a product
//! that is not in the cart succeeds with the unchanged summary.

use std::sync::Arc;

use crate::domain::entity::cart::CartSummary;
use crate::domain::repository::CartRepository;
use crate::error::CartResult;
use kernel::id::{ProductId, UserId};

/// Remove item use case
pub struct RemoveItemUseCase<R>
where
    R: CartRepository,
{
    cart_repo: Arc<R>,
}

impl<R> RemoveItemUseCase<R>
where
    R: CartRepository,
{
    pub fn new(cart_repo: Arc<R>) -> Self {
        Self { cart_repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> CartResult<CartSummary> {
        let Some(cart) = self.cart_repo.find_active_by_user(user_id).await? else {
            // No cart is the same as an already-removed item
            return Ok(CartSummary::empty());
        };

        let removed = self.cart_repo.delete_item(&cart.cart_id, product_id).await?;
        if removed {
            tracing::info!(
                cart_id = %cart.cart_id,
                product_id = %product_id,
                "Line item removed"
            );
        }

        let cart = self
            .cart_repo
            .find_active_by_user(user_id)
            .await?
            .map(|c| c.summary())
            .unwrap_or_else(CartSummary::empty);
        Ok(cart)
    }
}
