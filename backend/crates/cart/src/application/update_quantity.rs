//! Update Quantity Use Case
//!
//! Sets a line item to an absolute quantity. Zero or negative removes the
//! line.

use std::sync::Arc;

use crate::application::config::CartConfig;
use crate::domain::entity::cart::CartSummary;
use crate::domain::repository::{CartRepository, ProductCatalog};
use crate::error::{CartError, CartResult};
use kernel::id::{ProductId, UserId};

/// Update quantity input
pub struct UpdateQuantityInput {
    /// Product whose line item to change
    pub product_id: ProductId,
    /// New absolute quantity; zero or negative removes the line
    pub quantity: i32,
}

/// Update quantity use case
pub struct UpdateQuantityUseCase<R, C>
where
    R: CartRepository,
    C: ProductCatalog,
{
    cart_repo: Arc<R>,
    catalog: Arc<C>,
    config: Arc<CartConfig>,
}

impl<R, C> UpdateQuantityUseCase<R, C>
where
    R: CartRepository,
    C: ProductCatalog,
{
    pub fn new(cart_repo: Arc<R>, catalog: Arc<C>, config: Arc<CartConfig>) -> Self {
        Self {
            cart_repo,
            catalog,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: UpdateQuantityInput,
    ) -> CartResult<CartSummary> {
        let cart = self
            .cart_repo
            .find_active_by_user(user_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        if cart.item(&input.product_id).is_none() {
            return Err(CartError::ItemNotFound);
        }

        if input.quantity <= 0 {
            self.cart_repo
                .delete_item(&cart.cart_id, &input.product_id)
                .await?;
            tracing::info!(
                cart_id = %cart.cart_id,
                product_id = %input.product_id,
                "Line item removed via zero quantity"
            );
            return self.refreshed_summary(user_id).await;
        }

        if input.quantity > self.config.max_line_quantity {
            return Err(CartError::InvalidQuantity(input.quantity));
        }

        // Re-validate against current stock; the price stays whatever was
        // captured at add time.
        let product = self
            .catalog
            .snapshot(&input.product_id)
            .await?
            .ok_or(CartError::ProductUnavailable)?;
        if !product.can_supply(input.quantity) {
            return Err(CartError::ProductUnavailable);
        }

        let updated = self
            .cart_repo
            .set_item_quantity(&cart.cart_id, &input.product_id, input.quantity)
            .await?;
        if !updated {
            return Err(CartError::ItemNotFound);
        }

        tracing::info!(
            cart_id = %cart.cart_id,
            product_id = %input.product_id,
            quantity = input.quantity,
            "Line item quantity updated"
        );

        self.refreshed_summary(user_id).await
    }

    async fn refreshed_summary(&self, user_id: &UserId) -> CartResult<CartSummary> {
        let cart = self
            .cart_repo
            .find_active_by_user(user_id)
            .await?
            .ok_or_else(|| CartError::Internal("Cart vanished after write".to_string()))?;
        Ok(cart.summary())
    }
}
