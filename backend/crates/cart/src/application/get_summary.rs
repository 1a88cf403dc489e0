//! Get Summary Use Case
//!
//! Reads the user's active cart. Never fails for an absent cart; the
//! empty summary stands in.

use std::sync::Arc;

use crate::domain::entity::cart::CartSummary;
use crate::domain::repository::CartRepository;
use crate::error::CartResult;
use kernel::id::UserId;

/// Get summary use case
pub struct GetSummaryUseCase<R>
where
    R: CartRepository,
{
    cart_repo: Arc<R>,
}

impl<R> GetSummaryUseCase<R>
where
    R: CartRepository,
{
    pub fn new(cart_repo: Arc<R>) -> Self {
        Self { cart_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> CartResult<CartSummary> {
        let summary = self
            .cart_repo
            .find_active_by_user(user_id)
            .await?
            .map(|c| c.summary())
            .unwrap_or_else(CartSummary::empty);
        Ok(summary)
    }
}
