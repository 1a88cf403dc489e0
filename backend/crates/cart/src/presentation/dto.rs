//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::cart::{CartItem, CartSummary};

// ============================================================================
// Add Item
// ============================================================================

/// Add item request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

// ============================================================================
// Update Quantity
// ============================================================================

/// Update quantity request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    /// New absolute quantity; zero removes the line item
    pub quantity: i32,
}

// ============================================================================
// Cart Summary
// ============================================================================

/// One line item in the summary response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price in cents, as captured at add time
    pub unit_price_cents: i64,
    /// quantity x unit price, in cents
    pub total_price_cents: i64,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: *item.product_id.as_uuid(),
            quantity: item.quantity,
            unit_price_cents: item.unit_price.as_cents(),
            total_price_cents: item.total_price().as_cents(),
        }
    }
}

/// Cart summary response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummaryResponse {
    pub items: Vec<CartItemResponse>,
    pub total_items: i64,
    pub total_amount_cents: i64,
}

impl From<CartSummary> for CartSummaryResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            items: summary.items.iter().map(CartItemResponse::from).collect(),
            total_items: summary.total_items,
            total_amount_cents: summary.total_amount.as_cents(),
        }
    }
}
