//! Product Snapshot
//!
//! The aggregator's read-only view of a product: current price, stock, and
//! availability at the moment of lookup. The catalog itself (names,
//! descriptions, categories) lives outside this crate.

use kernel::id::ProductId;
use kernel::money::Money;

/// Point-in-time view of a product for cart validation and pricing
#[derive(Debug, Clone)]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    /// Current list price; captured into the line item at add time
    pub price: Money,
    /// Units currently in stock
    pub stock_quantity: i32,
    /// Whether the product is purchasable at all
    pub is_active: bool,
}

impl ProductSnapshot {
    /// Whether the product can supply `quantity` units right now.
    ///
    /// Zero stock fails for every quantity, including zero.
    pub fn can_supply(&self, quantity: i32) -> bool {
        self.is_active && self.stock_quantity > 0 && quantity <= self.stock_quantity
    }
}
