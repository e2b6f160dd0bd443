use async_trait::async_trait;
use common::{CartId, CategoryId, OrderId, ProductId, UserId};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::{Cart, Category, Entity, Order, Product, Repository, Result, StoreError};

const SELECT_CART: &str = "SELECT cart_id, user_id FROM carts";

const SELECT_ORDER: &str = r#"
    SELECT o.order_id, o.order_date, o.order_desc, o.order_fee, c.cart_id, c.user_id
    FROM orders o
    JOIN carts c ON c.cart_id = o.cart_id
"#;

const SELECT_CATEGORY: &str = "SELECT category_id, category_title, image_url FROM categories";

const SELECT_PRODUCT: &str = r#"
    SELECT p.product_id, p.product_title, p.image_url, p.sku, p.price_unit, p.quantity,
           c.category_id, c.category_title, c.image_url AS category_image_url
    FROM products p
    LEFT JOIN categories c ON c.category_id = p.category_id
"#;

/// PostgreSQL-backed entity store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL entity store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the cart and order tables.
    ///
    /// The two services keep separate, non-overlapping migration versions so
    /// both sets can be applied to one database.
    pub async fn run_order_migrations(&self) -> Result<()> {
        let mut migrator = sqlx::migrate!("../../migrations/orders");
        migrator.set_ignore_missing(true);
        migrator.run(&self.pool).await?;
        Ok(())
    }

    /// Creates the category and product tables.
    pub async fn run_product_migrations(&self) -> Result<()> {
        let mut migrator = sqlx::migrate!("../../migrations/products");
        migrator.set_ignore_missing(true);
        migrator.run(&self.pool).await?;
        Ok(())
    }

    fn row_to_cart(row: &PgRow) -> Result<Cart> {
        Ok(Cart {
            cart_id: Some(CartId::new(row.try_get("cart_id")?)),
            user_id: Some(UserId::new(row.try_get("user_id")?)),
        })
    }

    fn row_to_order(row: &PgRow) -> Result<Order> {
        Ok(Order {
            order_id: Some(OrderId::new(row.try_get("order_id")?)),
            order_date: row.try_get("order_date")?,
            order_desc: row.try_get("order_desc")?,
            order_fee: row.try_get("order_fee")?,
            cart: Some(Self::row_to_cart(row)?),
        })
    }

    fn row_to_category(row: &PgRow) -> Result<Category> {
        Ok(Category {
            category_id: Some(CategoryId::new(row.try_get("category_id")?)),
            category_title: row.try_get("category_title")?,
            image_url: row.try_get("image_url")?,
        })
    }

    fn row_to_product(row: &PgRow) -> Result<Product> {
        let category_id: Option<i32> = row.try_get("category_id")?;
        let category = match category_id {
            Some(id) => Some(Category {
                category_id: Some(CategoryId::new(id)),
                category_title: row.try_get("category_title")?,
                image_url: row.try_get("category_image_url")?,
            }),
            None => None,
        };

        Ok(Product {
            product_id: Some(ProductId::new(row.try_get("product_id")?)),
            product_title: row.try_get("product_title")?,
            image_url: row.try_get("image_url")?,
            sku: row.try_get("sku")?,
            price_unit: row.try_get("price_unit")?,
            quantity: row.try_get("quantity")?,
            category,
        })
    }

    async fn fetch_order(tx: &mut Transaction<'_, Postgres>, id: i32) -> Result<Order> {
        let row = sqlx::query(&format!("{SELECT_ORDER} WHERE o.order_id = $1"))
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;
        Self::row_to_order(&row)
    }

    async fn fetch_product(tx: &mut Transaction<'_, Postgres>, id: i32) -> Result<Product> {
        let row = sqlx::query(&format!("{SELECT_PRODUCT} WHERE p.product_id = $1"))
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;
        Self::row_to_product(&row)
    }
}

/// SQLSTATE raised when a value does not fit a `NUMERIC(12, 2)` column.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Maps schema rule violations to `ConstraintViolation`; everything else stays
/// a database error.
fn map_write_error(table: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
            return StoreError::constraint(table, db_err.message());
        }
        match db_err.kind() {
            sqlx::error::ErrorKind::ForeignKeyViolation
            | sqlx::error::ErrorKind::NotNullViolation
            | sqlx::error::ErrorKind::UniqueViolation
            | sqlx::error::ErrorKind::CheckViolation => {
                return StoreError::constraint(table, db_err.message());
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Repository<Cart> for PostgresStore {
    async fn find_all(&self) -> Result<Vec<Cart>> {
        let rows = sqlx::query(&format!("{SELECT_CART} ORDER BY cart_id ASC"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_cart).collect()
    }

    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>> {
        let row = sqlx::query(&format!("{SELECT_CART} WHERE cart_id = $1"))
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_cart).transpose()
    }

    async fn save(&self, cart: Cart) -> Result<Cart> {
        let user_id = cart.user_id.map(UserId::as_i32);
        let mut tx = self.pool.begin().await?;

        let mut row = None;
        if let Some(id) = cart.cart_id {
            row = sqlx::query(
                r#"
                UPDATE carts SET user_id = $2, updated_at = NOW()
                WHERE cart_id = $1
                RETURNING cart_id, user_id
                "#,
            )
            .bind(id.as_i32())
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_write_error(Cart::TABLE, e))?;
        }

        let row = match row {
            Some(row) => row,
            None => sqlx::query("INSERT INTO carts (user_id) VALUES ($1) RETURNING cart_id, user_id")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_write_error(Cart::TABLE, e))?,
        };

        let saved = Self::row_to_cart(&row)?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, cart: &Cart) -> Result<()> {
        match cart.id() {
            Some(id) => Repository::<Cart>::delete_by_id(self, id).await,
            None => Ok(()),
        }
    }

    async fn delete_by_id(&self, id: CartId) -> Result<()> {
        sqlx::query("DELETE FROM carts WHERE cart_id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Order> for PostgresStore {
    async fn find_all(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!("{SELECT_ORDER} ORDER BY o.order_id ASC"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_order).collect()
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(&format!("{SELECT_ORDER} WHERE o.order_id = $1"))
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_order).transpose()
    }

    async fn save(&self, order: Order) -> Result<Order> {
        let cart_id = order
            .cart
            .as_ref()
            .and_then(|cart| cart.cart_id)
            .map(CartId::as_i32);
        let mut tx = self.pool.begin().await?;

        let mut saved_id: Option<i32> = None;
        if let Some(id) = order.order_id {
            saved_id = sqlx::query_scalar(
                r#"
                UPDATE orders
                SET order_date = $2, order_desc = $3, order_fee = $4, cart_id = $5,
                    updated_at = NOW()
                WHERE order_id = $1
                RETURNING order_id
                "#,
            )
            .bind(id.as_i32())
            .bind(order.order_date)
            .bind(&order.order_desc)
            .bind(order.order_fee)
            .bind(cart_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_write_error(Order::TABLE, e))?;
        }

        let saved_id = match saved_id {
            Some(id) => id,
            None => sqlx::query_scalar(
                r#"
                INSERT INTO orders (order_date, order_desc, order_fee, cart_id)
                VALUES ($1, $2, $3, $4)
                RETURNING order_id
                "#,
            )
            .bind(order.order_date)
            .bind(&order.order_desc)
            .bind(order.order_fee)
            .bind(cart_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_write_error(Order::TABLE, e))?,
        };

        let saved = Self::fetch_order(&mut tx, saved_id).await?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, order: &Order) -> Result<()> {
        match order.id() {
            Some(id) => Repository::<Order>::delete_by_id(self, id).await,
            None => Ok(()),
        }
    }

    async fn delete_by_id(&self, id: OrderId) -> Result<()> {
        sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Category> for PostgresStore {
    async fn find_all(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query(&format!("{SELECT_CATEGORY} ORDER BY category_id ASC"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_category).collect()
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query(&format!("{SELECT_CATEGORY} WHERE category_id = $1"))
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_category).transpose()
    }

    async fn save(&self, category: Category) -> Result<Category> {
        let mut tx = self.pool.begin().await?;

        let mut row = None;
        if let Some(id) = category.category_id {
            row = sqlx::query(
                r#"
                UPDATE categories
                SET category_title = $2, image_url = $3, updated_at = NOW()
                WHERE category_id = $1
                RETURNING category_id, category_title, image_url
                "#,
            )
            .bind(id.as_i32())
            .bind(&category.category_title)
            .bind(&category.image_url)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_write_error(Category::TABLE, e))?;
        }

        let row = match row {
            Some(row) => row,
            None => sqlx::query(
                r#"
                INSERT INTO categories (category_title, image_url)
                VALUES ($1, $2)
                RETURNING category_id, category_title, image_url
                "#,
            )
            .bind(&category.category_title)
            .bind(&category.image_url)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_write_error(Category::TABLE, e))?,
        };

        let saved = Self::row_to_category(&row)?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, category: &Category) -> Result<()> {
        match category.id() {
            Some(id) => Repository::<Category>::delete_by_id(self, id).await,
            None => Ok(()),
        }
    }

    async fn delete_by_id(&self, id: CategoryId) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Product> for PostgresStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!("{SELECT_PRODUCT} ORDER BY p.product_id ASC"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_product).collect()
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(&format!("{SELECT_PRODUCT} WHERE p.product_id = $1"))
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn save(&self, product: Product) -> Result<Product> {
        let category_id = product
            .category
            .as_ref()
            .and_then(|category| category.category_id)
            .map(CategoryId::as_i32);
        let mut tx = self.pool.begin().await?;

        let mut saved_id: Option<i32> = None;
        if let Some(id) = product.product_id {
            saved_id = sqlx::query_scalar(
                r#"
                UPDATE products
                SET product_title = $2, image_url = $3, sku = $4, price_unit = $5,
                    quantity = $6, category_id = $7, updated_at = NOW()
                WHERE product_id = $1
                RETURNING product_id
                "#,
            )
            .bind(id.as_i32())
            .bind(&product.product_title)
            .bind(&product.image_url)
            .bind(&product.sku)
            .bind(product.price_unit)
            .bind(product.quantity)
            .bind(category_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_write_error(Product::TABLE, e))?;
        }

        let saved_id = match saved_id {
            Some(id) => id,
            None => sqlx::query_scalar(
                r#"
                INSERT INTO products (product_title, image_url, sku, price_unit, quantity, category_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING product_id
                "#,
            )
            .bind(&product.product_title)
            .bind(&product.image_url)
            .bind(&product.sku)
            .bind(product.price_unit)
            .bind(product.quantity)
            .bind(category_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_write_error(Product::TABLE, e))?,
        };

        let saved = Self::fetch_product(&mut tx, saved_id).await?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, product: &Product) -> Result<()> {
        match product.id() {
            Some(id) => Repository::<Product>::delete_by_id(self, id).await,
            None => Ok(()),
        }
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
