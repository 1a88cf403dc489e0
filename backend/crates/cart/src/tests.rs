//! Unit tests for the cart crate
//!
//! The use cases run against an in-memory repository and catalog so the
//! pricing and merge rules can be exercised without a database.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::config::CartConfig;
use crate::application::{
    AddItemInput, AddItemUseCase, ClearCartUseCase, GetSummaryUseCase, RemoveItemUseCase,
    UpdateQuantityInput, UpdateQuantityUseCase,
};
use crate::domain::entity::cart::{Cart, CartItem};
use crate::domain::entity::product::ProductSnapshot;
use crate::domain::repository::{CartRepository, ProductCatalog};
use crate::error::{CartError, CartResult};
use kernel::id::{CartId, ProductId, UserId};
use kernel::money::Money;

/// In-memory cart repository and product catalog
#[derive(Default, Clone)]
struct MemCart {
    inner: Arc<Mutex<MemCartInner>>,
}

#[derive(Default)]
struct MemCartInner {
    carts: Vec<Cart>,
    products: HashMap<ProductId, ProductSnapshot>,
}

impl MemCart {
    fn add_product(&self, product_id: ProductId, price_cents: i64, stock: i32, active: bool) {
        self.inner.lock().unwrap().products.insert(
            product_id,
            ProductSnapshot {
                product_id,
                price: Money::from_cents(price_cents),
                stock_quantity: stock,
                is_active: active,
            },
        );
    }

    fn set_price(&self, product_id: &ProductId, price_cents: i64) {
        if let Some(p) = self.inner.lock().unwrap().products.get_mut(product_id) {
            p.price = Money::from_cents(price_cents);
        }
    }

    fn active_cart_count(&self, user_id: &UserId) -> usize {
        self.inner
            .lock()
            .unwrap()
            .carts
            .iter()
            .filter(|c| c.user_id == *user_id && c.is_active)
            .count()
    }
}

impl CartRepository for MemCart {
    async fn find_active_by_user(&self, user_id: &UserId) -> CartResult<Option<Cart>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .carts
            .iter()
            .find(|c| c.user_id == *user_id && c.is_active)
            .cloned())
    }

    async fn create(&self, cart: &Cart) -> CartResult<()> {
        self.inner.lock().unwrap().carts.push(cart.clone());
        Ok(())
    }

    async fn add_item_quantity(&self, cart_id: &CartId, item: &CartItem) -> CartResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let cart = inner
            .carts
            .iter_mut()
            .find(|c| c.cart_id == *cart_id)
            .ok_or_else(|| CartError::Internal("no such cart".to_string()))?;

        match cart
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => cart.items.push(item.clone()),
        }
        Ok(())
    }

    async fn set_item_quantity(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: i32,
    ) -> CartResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        let Some(cart) = inner.carts.iter_mut().find(|c| c.cart_id == *cart_id) else {
            return Ok(false);
        };
        match cart.items.iter_mut().find(|i| i.product_id == *product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_item(&self, cart_id: &CartId, product_id: &ProductId) -> CartResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        let Some(cart) = inner.carts.iter_mut().find(|c| c.cart_id == *cart_id) else {
            return Ok(false);
        };
        let before = cart.items.len();
        cart.items.retain(|i| i.product_id != *product_id);
        Ok(cart.items.len() < before)
    }

    async fn deactivate(&self, cart_id: &CartId) -> CartResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(cart) = inner.carts.iter_mut().find(|c| c.cart_id == *cart_id) {
            cart.is_active = false;
        }
        Ok(())
    }
}

impl ProductCatalog for MemCart {
    async fn snapshot(&self, product_id: &ProductId) -> CartResult<Option<ProductSnapshot>> {
        Ok(self.inner.lock().unwrap().products.get(product_id).cloned())
    }
}

fn config() -> Arc<CartConfig> {
    Arc::new(CartConfig::default())
}

fn add_use_case(repo: &MemCart) -> AddItemUseCase<MemCart, MemCart> {
    AddItemUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()), config())
}

fn update_use_case(repo: &MemCart) -> UpdateQuantityUseCase<MemCart, MemCart> {
    UpdateQuantityUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()), config())
}

async fn add(repo: &MemCart, user: &UserId, product: ProductId, qty: i32) -> CartResult<crate::domain::entity::cart::CartSummary> {
    add_use_case(repo)
        .execute(
            user,
            AddItemInput {
                product_id: product,
                quantity: qty,
            },
        )
        .await
}

// ============================================================================
// Add / merge
// ============================================================================

mod add_item_tests {
    use super::*;

    #[tokio::test]
    async fn test_add_creates_cart_and_line() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);

        let summary = add(&repo, &user, product, 2).await.unwrap();

        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].quantity, 2);
        assert_eq!(summary.items[0].unit_price, Money::from_cents(2500));
        assert_eq!(summary.items[0].total_price(), Money::from_cents(5000));
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_amount, Money::from_cents(5000));
    }

    #[tokio::test]
    async fn test_add_same_product_merges_into_one_line() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);

        add(&repo, &user, product, 2).await.unwrap();
        let summary = add(&repo, &user, product, 3).await.unwrap();

        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].quantity, 5);
        assert_eq!(summary.total_items, 5);
        assert_eq!(summary.total_amount, Money::from_cents(12500));
        assert_eq!(repo.active_cart_count(&user), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_nonpositive_quantity() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);

        let err = add(&repo, &user, product, 0).await.unwrap_err();
        assert!(matches!(err, CartError::InvalidQuantity(0)));

        let err = add(&repo, &user, product, -1).await.unwrap_err();
        assert!(matches!(err, CartError::InvalidQuantity(-1)));
    }

    #[tokio::test]
    async fn test_add_rejects_unknown_product() {
        let repo = MemCart::default();
        let err = add(&repo, &UserId::new(), ProductId::new(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::ProductUnavailable));
    }

    #[tokio::test]
    async fn test_add_rejects_inactive_product() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, false);

        let err = add(&repo, &user, product, 1).await.unwrap_err();
        assert!(matches!(err, CartError::ProductUnavailable));
    }

    #[tokio::test]
    async fn test_zero_stock_rejects_every_quantity() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 0, true);

        let err = add(&repo, &user, product, 1).await.unwrap_err();
        assert!(matches!(err, CartError::ProductUnavailable));
    }

    #[tokio::test]
    async fn test_merge_past_stock_rejected() {
        // 3 on hand, 2 already in the cart: adding 2 more would need 4
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 3, true);

        add(&repo, &user, product, 2).await.unwrap();
        let err = add(&repo, &user, product, 2).await.unwrap_err();
        assert!(matches!(err, CartError::ProductUnavailable));

        // The cart is untouched by the failed add
        let summary = GetSummaryUseCase::new(Arc::new(repo.clone()))
            .execute(&user)
            .await
            .unwrap();
        assert_eq!(summary.total_items, 2);
    }

    #[tokio::test]
    async fn test_merge_past_line_cap_rejected() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 100, 500, true);

        add(&repo, &user, product, 60).await.unwrap();
        let err = add(&repo, &user, product, 60).await.unwrap_err();
        assert!(matches!(err, CartError::InvalidQuantity(120)));
    }
}

// ============================================================================
// Price snapshot
// ============================================================================

mod pricing_tests {
    use super::*;

    #[tokio::test]
    async fn test_price_change_does_not_move_existing_line() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);

        add(&repo, &user, product, 1).await.unwrap();
        repo.set_price(&product, 9900);

        // The merge keeps the captured price, not the new list price
        let summary = add(&repo, &user, product, 1).await.unwrap();
        assert_eq!(summary.items[0].unit_price, Money::from_cents(2500));
        assert_eq!(summary.total_amount, Money::from_cents(5000));
    }

    #[tokio::test]
    async fn test_fresh_line_snapshots_current_price() {
        let repo = MemCart::default();
        let user = UserId::new();
        let first = ProductId::new();
        let second = ProductId::new();
        repo.add_product(first, 2500, 10, true);
        repo.add_product(second, 2500, 10, true);

        add(&repo, &user, first, 1).await.unwrap();
        repo.set_price(&second, 3000);

        let summary = add(&repo, &user, second, 1).await.unwrap();
        let line = summary
            .items
            .iter()
            .find(|i| i.product_id == second)
            .unwrap();
        assert_eq!(line.unit_price, Money::from_cents(3000));
    }
}

// ============================================================================
// Update quantity
// ============================================================================

mod update_quantity_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_sets_absolute_quantity() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);
        add(&repo, &user, product, 2).await.unwrap();

        let summary = update_use_case(&repo)
            .execute(
                &user,
                UpdateQuantityInput {
                    product_id: product,
                    quantity: 7,
                },
            )
            .await
            .unwrap();

        assert_eq!(summary.items[0].quantity, 7);
        assert_eq!(summary.total_amount, Money::from_cents(17500));
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_line() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);
        add(&repo, &user, product, 2).await.unwrap();

        let summary = update_use_case(&repo)
            .execute(
                &user,
                UpdateQuantityInput {
                    product_id: product,
                    quantity: 0,
                },
            )
            .await
            .unwrap();

        assert!(summary.items.is_empty());
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.total_amount, Money::ZERO);
    }

    #[tokio::test]
    async fn test_update_missing_line_is_not_found() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);
        add(&repo, &user, product, 1).await.unwrap();

        let err = update_use_case(&repo)
            .execute(
                &user,
                UpdateQuantityInput {
                    product_id: ProductId::new(),
                    quantity: 3,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::ItemNotFound));
    }

    #[tokio::test]
    async fn test_update_without_cart_is_not_found() {
        let repo = MemCart::default();
        let err = update_use_case(&repo)
            .execute(
                &UserId::new(),
                UpdateQuantityInput {
                    product_id: ProductId::new(),
                    quantity: 3,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::ItemNotFound));
    }

    #[tokio::test]
    async fn test_update_past_stock_rejected() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 5, true);
        add(&repo, &user, product, 2).await.unwrap();

        let err = update_use_case(&repo)
            .execute(
                &user,
                UpdateQuantityInput {
                    product_id: product,
                    quantity: 6,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::ProductUnavailable));
    }
}

// ============================================================================
// Remove / clear
// ============================================================================

mod remove_and_clear_tests {
    use super::*;

    #[tokio::test]
    async fn test_remove_deletes_line() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);
        add(&repo, &user, product, 2).await.unwrap();

        let summary = RemoveItemUseCase::new(Arc::new(repo.clone()))
            .execute(&user, &product)
            .await
            .unwrap();
        assert!(summary.items.is_empty());
    }

    #[tokio::test]
    async fn test_remove_never_added_product_succeeds() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);
        add(&repo, &user, product, 2).await.unwrap();

        // Removing something that was never in the cart is a quiet success
        let summary = RemoveItemUseCase::new(Arc::new(repo.clone()))
            .execute(&user, &ProductId::new())
            .await
            .unwrap();
        assert_eq!(summary.total_items, 2);
    }

    #[tokio::test]
    async fn test_remove_without_cart_returns_empty_summary() {
        let repo = MemCart::default();
        let summary = RemoveItemUseCase::new(Arc::new(repo.clone()))
            .execute(&UserId::new(), &ProductId::new())
            .await
            .unwrap();
        assert!(summary.items.is_empty());
        assert_eq!(summary.total_amount, Money::ZERO);
    }

    #[tokio::test]
    async fn test_clear_then_add_starts_fresh_cart() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);
        add(&repo, &user, product, 5).await.unwrap();

        ClearCartUseCase::new(Arc::new(repo.clone()))
            .execute(&user)
            .await
            .unwrap();

        // Old cart is deactivated; the next add gets a fresh one
        let summary = add(&repo, &user, product, 1).await.unwrap();
        assert_eq!(summary.total_items, 1);
        assert_eq!(repo.active_cart_count(&user), 1);
    }

    #[tokio::test]
    async fn test_clear_without_cart_is_noop() {
        let repo = MemCart::default();
        ClearCartUseCase::new(Arc::new(repo.clone()))
            .execute(&UserId::new())
            .await
            .unwrap();
    }
}

// ============================================================================
// Get summary
// ============================================================================

mod summary_tests {
    use super::*;

    #[tokio::test]
    async fn test_summary_without_cart_is_empty() {
        let repo = MemCart::default();
        let summary = GetSummaryUseCase::new(Arc::new(repo.clone()))
            .execute(&UserId::new())
            .await
            .unwrap();
        assert!(summary.items.is_empty());
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.total_amount, Money::ZERO);
    }
}

// ============================================================================
// HTTP surface
// ============================================================================

mod handler_tests {
    use super::*;

    use axum::Extension;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::presentation::router::cart_router_generic;
    use kernel::context::RequestIdentity;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let repo = MemCart::default();
        let app = cart_router_generic(repo, CartConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_add_then_summary_worked_example() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 10, true);

        let app = cart_router_generic(repo, CartConfig::default())
            .layer(Extension(RequestIdentity::new(user)));

        let body = serde_json::json!({
            "productId": product.as_uuid(),
            "quantity": 2,
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["totalAmountCents"], 5000);
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["unitPriceCents"], 2500);
        assert_eq!(json["items"][0]["totalPriceCents"], 5000);
    }

    #[tokio::test]
    async fn test_unavailable_product_maps_to_conflict() {
        let repo = MemCart::default();
        let user = UserId::new();
        let product = ProductId::new();
        repo.add_product(product, 2500, 0, true);

        let app = cart_router_generic(repo, CartConfig::default())
            .layer(Extension(RequestIdentity::new(user)));

        let body = serde_json::json!({
            "productId": product.as_uuid(),
            "quantity": 1,
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
