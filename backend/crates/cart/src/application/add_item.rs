//! Add Item Use Case
//!
//! Places a product into the user's active cart, creating the cart if
//! none exists and merging into an existing line item for the same
//! product.

use std::sync::Arc;

use crate::application::config::CartConfig;
use crate::domain::entity::cart::{Cart, CartItem, CartSummary};
use crate::domain::repository::{CartRepository, ProductCatalog};
use crate::error::{CartError, CartResult};
use kernel::id::{ProductId, UserId};

/// Add item input
pub struct AddItemInput {
    /// Product to add
    pub product_id: ProductId,
    /// Units to add; must be at least 1
    pub quantity: i32,
}

/// Add item use case
pub struct AddItemUseCase<R, C>
where
    R: CartRepository,
    C: ProductCatalog,
{
    cart_repo: Arc<R>,
    catalog: Arc<C>,
    config: Arc<CartConfig>,
}

impl<R, C> AddItemUseCase<R, C>
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

    pub async fn execute(&self, user_id: &UserId, input: AddItemInput) -> CartResult<CartSummary> {
        if input.quantity < 1 {
            return Err(CartError::InvalidQuantity(input.quantity));
        }

        let product = self
            .catalog
            .snapshot(&input.product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(CartError::ProductUnavailable)?;

        // Find or create the active cart
        let cart = match self.cart_repo.find_active_by_user(user_id).await? {
            Some(cart) => cart,
            None => {
                let cart = Cart::new(user_id.clone());
                self.cart_repo.create(&cart).await?;
                cart
            }
        };

        // Validate the combined quantity: what the line would hold after
        // the merge, not just the increment.
        let existing = cart.item(&input.product_id);
        let combined = existing
            .map(|i| i.quantity)
            .unwrap_or(0)
            .saturating_add(input.quantity);

        if combined > self.config.max_line_quantity {
            return Err(CartError::InvalidQuantity(combined));
        }
        if !product.can_supply(combined) {
            return Err(CartError::ProductUnavailable);
        }

        // A merged line keeps the price captured when the product first
        // entered the cart; only a brand-new line snapshots the current
        // price.
        let unit_price = existing.map(|i| i.unit_price).unwrap_or(product.price);
        let item = CartItem::new(input.product_id, unit_price, input.quantity);
        self.cart_repo.add_item_quantity(&cart.cart_id, &item).await?;

        tracing::info!(
            cart_id = %cart.cart_id,
            product_id = %input.product_id,
            quantity = input.quantity,
            merged = existing.is_some(),
            "Item added to cart"
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
