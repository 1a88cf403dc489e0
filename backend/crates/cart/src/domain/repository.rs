//! Repository Traits
//!
//! Interfaces for cart persistence and product lookup. Implementations are
//! in the infrastructure layer.

use crate::domain::entity::cart::{Cart, CartItem};
use crate::domain::entity::product::ProductSnapshot;
use crate::error::CartResult;
use kernel::id::{CartId, ProductId, UserId};

/// Cart repository trait
#[trait_variant::make(CartRepository: Send)]
pub trait LocalCartRepository {
    /// Find a user's active cart with its items, ordered by add time
    async fn find_active_by_user(&self, user_id: &UserId) -> CartResult<Option<Cart>>;

    /// Persist a new cart
    async fn create(&self, cart: &Cart) -> CartResult<()>;

    /// Insert the line item, or atomically increment the quantity of an
    /// existing line for the same product.
    ///
    /// The increment must be a single row-level read-modify-write in the
    /// store: two concurrent calls for the same product must observably
    /// equal their sequential application.
    async fn add_item_quantity(&self, cart_id: &CartId, item: &CartItem) -> CartResult<()>;

    /// Set an existing line's quantity; false when no such line exists
    async fn set_item_quantity(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: i32,
    ) -> CartResult<bool>;

    /// Destroy a line item; false when no such line existed
    async fn delete_item(&self, cart_id: &CartId, product_id: &ProductId) -> CartResult<bool>;

    /// Soft-deactivate a cart (post-checkout)
    async fn deactivate(&self, cart_id: &CartId) -> CartResult<()>;
}

/// Product lookup trait
///
/// The aggregator's only window into the catalog: current price, stock,
/// and availability.
#[trait_variant::make(ProductCatalog: Send)]
pub trait LocalProductCatalog {
    /// Point-in-time view of a product; `None` for unknown IDs
    async fn snapshot(&self, product_id: &ProductId) -> CartResult<Option<ProductSnapshot>>;
}
