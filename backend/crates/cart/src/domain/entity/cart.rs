//! Cart and Line-Item Entities
//!
//! A cart owns an ordered collection of line items, at most one per
//! product. Line items capture the unit price at add time; totals are
//! derived on demand. Carts follow a soft lifecycle: deactivated when
//! superseded, never deleted.

use chrono::{DateTime, Utc};
use kernel::id::{CartId, ProductId, UserId};
use kernel::money::Money;

/// One product-quantity-price record within a cart
#[derive(Debug, Clone)]
pub struct CartItem {
    pub product_id: ProductId,
    /// Price snapshot taken when the product entered the cart
    pub unit_price: Money,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(product_id: ProductId, unit_price: Money, quantity: i32) -> Self {
        Self {
            product_id,
            unit_price,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Derived line total from the captured unit price.
    ///
    /// Quantities are capped far below any overflow point by the
    /// application layer; saturation is a formality.
    pub fn total_price(&self) -> Money {
        self.unit_price
            .checked_mul(self.quantity as i64)
            .unwrap_or(Money::from_cents(i64::MAX))
    }
}

/// A user's active cart
#[derive(Debug, Clone)]
pub struct Cart {
    pub cart_id: CartId,
    pub user_id: UserId,
    pub is_active: bool,
    /// Ordered by add time; the order is part of the summary contract
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create a new empty active cart for `user_id`
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            cart_id: CartId::new(),
            user_id,
            is_active: true,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Line item for a product, if present
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == *product_id)
    }

    /// Total number of units across all line items
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity as i64).sum()
    }

    /// Total amount across all line items
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(|i| i.total_price()).sum()
    }

    /// Soft-deactivate (post-checkout); a later add starts a fresh cart
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Snapshot of the ordered items and derived totals
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.items.clone(),
            total_items: self.total_items(),
            total_amount: self.total_amount(),
        }
    }
}

/// Read model returned by every cart operation
#[derive(Debug, Clone)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_items: i64,
    pub total_amount: Money,
}

impl CartSummary {
    /// Summary of a user with no active cart
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_amount: Money::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new(UserId::new());
        assert!(cart.is_active);
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), Money::ZERO);
    }

    #[test]
    fn test_derived_totals() {
        let mut cart = Cart::new(UserId::new());
        cart.items
            .push(CartItem::new(ProductId::new(), Money::from_cents(2500), 2));
        cart.items
            .push(CartItem::new(ProductId::new(), Money::from_cents(1000), 3));

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_amount(), Money::from_cents(8000));
    }

    #[test]
    fn test_line_total_from_snapshot_price() {
        let item = CartItem::new(ProductId::new(), Money::from_cents(2500), 2);
        assert_eq!(item.total_price(), Money::from_cents(5000));
    }

    #[test]
    fn test_item_lookup() {
        let mut cart = Cart::new(UserId::new());
        let product_id = ProductId::new();
        cart.items
            .push(CartItem::new(product_id, Money::from_cents(500), 1));

        assert!(cart.item(&product_id).is_some());
        assert!(cart.item(&ProductId::new()).is_none());
    }

    #[test]
    fn test_deactivate() {
        let mut cart = Cart::new(UserId::new());
        cart.deactivate();
        assert!(!cart.is_active);
    }
}
