//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::cart::{Cart, CartItem};
use crate::domain::entity::product::ProductSnapshot;
use crate::domain::repository::{CartRepository, ProductCatalog};
use crate::error::CartResult;
use kernel::id::{CartId, ProductId, UserId};
use kernel::money::Money;

/// PostgreSQL-backed cart repository and product catalog
#[derive(Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CartRow {
    cart_id: Uuid,
    user_id: Uuid,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    product_id: Uuid,
    unit_price_cents: i64,
    quantity: i32,
    added_at: DateTime<Utc>,
}

impl CartItemRow {
    fn into_item(self) -> CartItem {
        CartItem {
            product_id: ProductId::from_uuid(self.product_id),
            unit_price: Money::from_cents(self.unit_price_cents),
            quantity: self.quantity,
            added_at: self.added_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    price_cents: i64,
    stock_quantity: i32,
    is_active: bool,
}

// ============================================================================
// Cart Repository Implementation
// ============================================================================

impl CartRepository for PgCartRepository {
    async fn find_active_by_user(&self, user_id: &UserId) -> CartResult<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT cart_id, user_id, is_active, created_at, updated_at
            FROM carts
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT product_id, unit_price_cents, quantity, added_at
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY added_at ASC
            "#,
        )
        .bind(row.cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Cart {
            cart_id: CartId::from_uuid(row.cart_id),
            user_id: UserId::from_uuid(row.user_id),
            is_active: row.is_active,
            items: items.into_iter().map(CartItemRow::into_item).collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    async fn create(&self, cart: &Cart) -> CartResult<()> {
        sqlx::query(
            r#"
            INSERT INTO carts (cart_id, user_id, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(cart.cart_id.as_uuid())
        .bind(cart.user_id.as_uuid())
        .bind(cart.is_active)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_item_quantity(&self, cart_id: &CartId, item: &CartItem) -> CartResult<()> {
        // The increment happens inside the database, so two concurrent adds
        // for the same product both land. A merged line keeps its original
        // unit price.
        sqlx::query(
            r#"
            INSERT INTO cart_items (cart_id, product_id, unit_price_cents, quantity, added_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(cart_id.as_uuid())
        .bind(item.product_id.as_uuid())
        .bind(item.unit_price.as_cents())
        .bind(item.quantity)
        .bind(item.added_at)
        .execute(&self.pool)
        .await?;

        self.touch_cart(cart_id).await
    }

    async fn set_item_quantity(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: i32,
    ) -> CartResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE cart_items
            SET quantity = $3
            WHERE cart_id = $1 AND product_id = $2
            "#,
        )
        .bind(cart_id.as_uuid())
        .bind(product_id.as_uuid())
        .bind(quantity)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated > 0 {
            self.touch_cart(cart_id).await?;
        }

        Ok(updated > 0)
    }

    async fn delete_item(&self, cart_id: &CartId, product_id: &ProductId) -> CartResult<bool> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM cart_items
            WHERE cart_id = $1 AND product_id = $2
            "#,
        )
        .bind(cart_id.as_uuid())
        .bind(product_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted > 0 {
            self.touch_cart(cart_id).await?;
        }

        Ok(deleted > 0)
    }

    async fn deactivate(&self, cart_id: &CartId) -> CartResult<()> {
        // Soft lifecycle: the rows stay for history, the cart just stops
        // being the active one.
        sqlx::query(
            r#"
            UPDATE carts
            SET is_active = FALSE, updated_at = $2
            WHERE cart_id = $1
            "#,
        )
        .bind(cart_id.as_uuid())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl PgCartRepository {
    async fn touch_cart(&self, cart_id: &CartId) -> CartResult<()> {
        sqlx::query("UPDATE carts SET updated_at = $2 WHERE cart_id = $1")
            .bind(cart_id.as_uuid())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Product Catalog Implementation
// ============================================================================

impl ProductCatalog for PgCartRepository {
    async fn snapshot(&self, product_id: &ProductId) -> CartResult<Option<ProductSnapshot>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product_id, price_cents, stock_quantity, is_active
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| ProductSnapshot {
            product_id: ProductId::from_uuid(r.product_id),
            price: Money::from_cents(r.price_cents),
            stock_quantity: r.stock_quantity,
            is_active: r.is_active,
        }))
    }
}
