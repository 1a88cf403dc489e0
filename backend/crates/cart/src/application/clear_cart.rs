//! Clear Cart Use Case
//!
//! Soft-deactivates the user's active cart, e.g. after checkout. The next
//! add starts a fresh cart; the old rows survive for history.

use std::sync::Arc;

use crate::domain::repository::CartRepository;
use crate::error::CartResult;
use kernel::id::UserId;

/// Clear cart use case
pub struct ClearCartUseCase<R>
where
    R: CartRepository,
{
    cart_repo: Arc<R>,
}

impl<R> ClearCartUseCase<R>
where
    R: CartRepository,
{
    pub fn new(cart_repo: Arc<R>) -> Self {
        Self { cart_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> CartResult<()> {
        let Some(cart) = self.cart_repo.find_active_by_user(user_id).await? else {
            // Nothing to clear
            return Ok(());
        };

        self.cart_repo.deactivate(&cart.cart_id).await?;

        tracing::info!(
            cart_id = %cart.cart_id,
            user_id = %user_id,
            "Cart deactivated"
        );

        Ok(())
    }
}
