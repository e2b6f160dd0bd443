use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use common::{CartId, CategoryId, OrderId, ProductId, UserId};
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::RwLock;

use crate::{Cart, Category, Entity, Order, Product, Repository, Result, StoreError};

/// In-memory entity store.
///
/// Stores rows the way the PostgreSQL schema does: relations are kept as
/// foreign keys and joined on read, identities come from per-table sequences
/// that never reuse a value, decimals are held as `NUMERIC(12, 2)`, and deletes
/// cascade from carts to orders and from categories to products.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    carts: BTreeMap<CartId, CartRow>,
    orders: BTreeMap<OrderId, OrderRow>,
    categories: BTreeMap<CategoryId, CategoryRow>,
    products: BTreeMap<ProductId, ProductRow>,
    sequences: Sequences,
}

#[derive(Debug, Default)]
struct Sequences {
    carts: i32,
    orders: i32,
    categories: i32,
    products: i32,
}

#[derive(Debug, Clone)]
struct CartRow {
    user_id: UserId,
}

#[derive(Debug, Clone)]
struct OrderRow {
    order_date: Option<NaiveDateTime>,
    order_desc: Option<String>,
    order_fee: Option<Decimal>,
    cart_id: CartId,
}

#[derive(Debug, Clone)]
struct CategoryRow {
    category_title: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Clone)]
struct ProductRow {
    product_title: Option<String>,
    image_url: Option<String>,
    sku: Option<String>,
    price_unit: Option<Decimal>,
    quantity: Option<i32>,
    category_id: Option<CategoryId>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Digits allowed before the decimal point of a `NUMERIC(12, 2)` column.
const NUMERIC_INTEGER_DIGITS: u32 = 10;

/// Rounds `value` to two decimal places the way a `NUMERIC(12, 2)` column
/// does, rejecting values with more than ten integer digits.
fn to_numeric(
    table: &'static str,
    column: &str,
    value: Option<Decimal>,
) -> Result<Option<Decimal>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= Decimal::from(10_i64.pow(NUMERIC_INTEGER_DIGITS)) {
        return Err(StoreError::constraint(
            table,
            format!("numeric field overflow in column \"{column}\""),
        ));
    }
    Ok(Some(rounded))
}

/// Picks the key a save writes to: the requested identity when it is already
/// stored, otherwise the next value of the table's sequence.
fn key_for_save<K: Ord + Copy, V>(
    rows: &BTreeMap<K, V>,
    requested: Option<K>,
    sequence: &mut i32,
    wrap: impl FnOnce(i32) -> K,
) -> K {
    match requested {
        Some(id) if rows.contains_key(&id) => id,
        _ => {
            *sequence += 1;
            wrap(*sequence)
        }
    }
}

impl Tables {
    fn cart(&self, id: CartId) -> Option<Cart> {
        self.carts.get(&id).map(|row| Cart {
            cart_id: Some(id),
            user_id: Some(row.user_id),
        })
    }

    fn order(&self, id: OrderId) -> Option<Order> {
        self.orders.get(&id).map(|row| Order {
            order_id: Some(id),
            order_date: row.order_date,
            order_desc: row.order_desc.clone(),
            order_fee: row.order_fee,
            cart: self.cart(row.cart_id),
        })
    }

    fn category(&self, id: CategoryId) -> Option<Category> {
        self.categories.get(&id).map(|row| Category {
            category_id: Some(id),
            category_title: row.category_title.clone(),
            image_url: row.image_url.clone(),
        })
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).map(|row| Product {
            product_id: Some(id),
            product_title: row.product_title.clone(),
            image_url: row.image_url.clone(),
            sku: row.sku.clone(),
            price_unit: row.price_unit,
            quantity: row.quantity,
            category: row.category_id.and_then(|id| self.category(id)),
        })
    }

    fn remove_cart(&mut self, id: CartId) {
        if self.carts.remove(&id).is_some() {
            self.orders.retain(|_, row| row.cart_id != id);
        }
    }

    fn remove_category(&mut self, id: CategoryId) {
        if self.categories.remove(&id).is_some() {
            self.products.retain(|_, row| row.category_id != Some(id));
        }
    }
}

#[async_trait]
impl Repository<Cart> for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Cart>> {
        let tables = self.tables.read().await;
        Ok(tables.carts.keys().filter_map(|id| tables.cart(*id)).collect())
    }

    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>> {
        Ok(self.tables.read().await.cart(id))
    }

    async fn save(&self, cart: Cart) -> Result<Cart> {
        let user_id = cart.user_id.ok_or_else(|| {
            StoreError::constraint(Cart::TABLE, "null value in column \"user_id\"")
        })?;

        let mut tables = self.tables.write().await;
        let tables = &mut *tables;
        let id = key_for_save(
            &tables.carts,
            cart.cart_id,
            &mut tables.sequences.carts,
            CartId::new,
        );
        tables.carts.insert(id, CartRow { user_id });
        tracing::debug!(table = Cart::TABLE, %id, "row saved");

        Ok(Cart {
            cart_id: Some(id),
            user_id: Some(user_id),
        })
    }

    async fn delete(&self, cart: &Cart) -> Result<()> {
        if let Some(id) = cart.id() {
            self.tables.write().await.remove_cart(id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: CartId) -> Result<()> {
        self.tables.write().await.remove_cart(id);
        Ok(())
    }
}

#[async_trait]
impl Repository<Order> for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .keys()
            .filter_map(|id| tables.order(*id))
            .collect())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.tables.read().await.order(id))
    }

    async fn save(&self, order: Order) -> Result<Order> {
        let cart_id = order
            .cart
            .as_ref()
            .and_then(|cart| cart.cart_id)
            .ok_or_else(|| {
                StoreError::constraint(Order::TABLE, "null value in column \"cart_id\"")
            })?;
        let order_fee = to_numeric(Order::TABLE, "order_fee", order.order_fee)?;

        let mut tables = self.tables.write().await;
        let tables = &mut *tables;
        if !tables.carts.contains_key(&cart_id) {
            return Err(StoreError::constraint(
                Order::TABLE,
                format!("cart_id {cart_id} is not present in table \"carts\""),
            ));
        }

        let id = key_for_save(
            &tables.orders,
            order.order_id,
            &mut tables.sequences.orders,
            OrderId::new,
        );
        tables.orders.insert(
            id,
            OrderRow {
                order_date: order.order_date,
                order_desc: order.order_desc,
                order_fee,
                cart_id,
            },
        );
        tracing::debug!(table = Order::TABLE, %id, "row saved");

        tables
            .order(id)
            .ok_or_else(|| StoreError::constraint(Order::TABLE, "saved row vanished"))
    }

    async fn delete(&self, order: &Order) -> Result<()> {
        if let Some(id) = order.id() {
            self.tables.write().await.orders.remove(&id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: OrderId) -> Result<()> {
        self.tables.write().await.orders.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl Repository<Category> for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .keys()
            .filter_map(|id| tables.category(*id))
            .collect())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.tables.read().await.category(id))
    }

    async fn save(&self, category: Category) -> Result<Category> {
        let mut tables = self.tables.write().await;
        let tables = &mut *tables;
        let id = key_for_save(
            &tables.categories,
            category.category_id,
            &mut tables.sequences.categories,
            CategoryId::new,
        );
        let row = CategoryRow {
            category_title: category.category_title,
            image_url: category.image_url,
        };
        tables.categories.insert(id, row.clone());
        tracing::debug!(table = Category::TABLE, %id, "row saved");

        Ok(Category {
            category_id: Some(id),
            category_title: row.category_title,
            image_url: row.image_url,
        })
    }

    async fn delete(&self, category: &Category) -> Result<()> {
        if let Some(id) = category.id() {
            self.tables.write().await.remove_category(id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: CategoryId) -> Result<()> {
        self.tables.write().await.remove_category(id);
        Ok(())
    }
}

#[async_trait]
impl Repository<Product> for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .keys()
            .filter_map(|id| tables.product(*id))
            .collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.tables.read().await.product(id))
    }

    async fn save(&self, product: Product) -> Result<Product> {
        let category_id = product.category.as_ref().and_then(|c| c.category_id);
        let price_unit = to_numeric(Product::TABLE, "price_unit", product.price_unit)?;

        let mut tables = self.tables.write().await;
        let tables = &mut *tables;
        if let Some(category_id) = category_id
            && !tables.categories.contains_key(&category_id)
        {
            return Err(StoreError::constraint(
                Product::TABLE,
                format!("category_id {category_id} is not present in table \"categories\""),
            ));
        }

        let id = key_for_save(
            &tables.products,
            product.product_id,
            &mut tables.sequences.products,
            ProductId::new,
        );
        tables.products.insert(
            id,
            ProductRow {
                product_title: product.product_title,
                image_url: product.image_url,
                sku: product.sku,
                price_unit,
                quantity: product.quantity,
                category_id,
            },
        );
        tracing::debug!(table = Product::TABLE, %id, "row saved");

        tables
            .product(id)
            .ok_or_else(|| StoreError::constraint(Product::TABLE, "saved row vanished"))
    }

    async fn delete(&self, product: &Product) -> Result<()> {
        if let Some(id) = product.id() {
            self.tables.write().await.products.remove(&id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<()> {
        self.tables.write().await.products.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_cart(user_id: i32) -> Cart {
        Cart {
            cart_id: None,
            user_id: Some(UserId::new(user_id)),
        }
    }

    fn new_order(cart_id: CartId, desc: &str) -> Order {
        Order {
            order_desc: Some(desc.to_string()),
            order_fee: Some(Decimal::new(10000, 2)),
            cart: Some(Cart::reference(Some(cart_id))),
            ..Order::default()
        }
    }

    fn new_category(title: &str) -> Category {
        Category {
            category_id: None,
            category_title: Some(title.to_string()),
            image_url: Some(format!("{}.jpg", title.to_lowercase())),
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_identities() {
        let store = InMemoryStore::new();

        let first = store.save(new_cart(1)).await.unwrap();
        let second = store.save(new_cart(2)).await.unwrap();

        assert_eq!(first.cart_id, Some(CartId::new(1)));
        assert_eq!(second.cart_id, Some(CartId::new(2)));
    }

    #[tokio::test]
    async fn save_with_stored_identity_replaces_row() {
        let store = InMemoryStore::new();
        let saved = store.save(new_cart(1)).await.unwrap();

        let replaced = store
            .save(Cart {
                cart_id: saved.cart_id,
                user_id: Some(UserId::new(3)),
            })
            .await
            .unwrap();

        assert_eq!(replaced.cart_id, saved.cart_id);
        let all = Repository::<Cart>::find_all(&store).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user_id, Some(UserId::new(3)));
    }

    #[tokio::test]
    async fn save_with_unknown_identity_inserts_under_new_identity() {
        let store = InMemoryStore::new();
        store.save(new_cart(1)).await.unwrap();

        let saved = store
            .save(Cart {
                cart_id: Some(CartId::new(99)),
                user_id: Some(UserId::new(2)),
            })
            .await
            .unwrap();

        assert_eq!(saved.cart_id, Some(CartId::new(2)));
    }

    #[tokio::test]
    async fn identities_are_not_reused_after_delete() {
        let store = InMemoryStore::new();
        let first = store.save(new_cart(1)).await.unwrap();
        Repository::<Cart>::delete_by_id(&store, first.cart_id.unwrap())
            .await
            .unwrap();

        let next = store.save(new_cart(1)).await.unwrap();
        assert_eq!(next.cart_id, Some(CartId::new(2)));
    }

    #[tokio::test]
    async fn cart_without_user_is_rejected() {
        let store = InMemoryStore::new();
        let result = store.save(Cart::default()).await;
        assert!(matches!(
            result,
            Err(StoreError::ConstraintViolation { table: "carts", .. })
        ));
    }

    #[tokio::test]
    async fn find_all_returns_identity_order() {
        let store = InMemoryStore::new();
        for user in [5, 3, 4] {
            store.save(new_cart(user)).await.unwrap();
        }

        let users: Vec<_> = Repository::<Cart>::find_all(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.user_id.unwrap().as_i32())
            .collect();
        assert_eq!(users, vec![5, 3, 4]);
    }

    #[tokio::test]
    async fn delete_by_id_on_missing_identity_is_noop() {
        let store = InMemoryStore::new();
        let result = Repository::<Category>::delete_by_id(&store, CategoryId::new(7)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn order_read_joins_cart() {
        let store = InMemoryStore::new();
        let cart = store.save(new_cart(8)).await.unwrap();

        let order = store
            .save(new_order(cart.cart_id.unwrap(), "First"))
            .await
            .unwrap();

        let cart_ref = order.cart.unwrap();
        assert_eq!(cart_ref.cart_id, cart.cart_id);
        assert_eq!(cart_ref.user_id, Some(UserId::new(8)));
    }

    #[tokio::test]
    async fn order_requires_cart_reference() {
        let store = InMemoryStore::new();
        let result = store
            .save(Order {
                order_desc: Some("Orphan".to_string()),
                ..Order::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(StoreError::ConstraintViolation { table: "orders", .. })
        ));
    }

    #[tokio::test]
    async fn order_rejects_unknown_cart() {
        let store = InMemoryStore::new();
        let result = store.save(new_order(CartId::new(404), "Lost")).await;
        assert!(matches!(
            result,
            Err(StoreError::ConstraintViolation { table: "orders", .. })
        ));
    }

    #[tokio::test]
    async fn deleting_cart_cascades_to_orders() {
        let store = InMemoryStore::new();
        let cart = store.save(new_cart(1)).await.unwrap();
        let cart_id = cart.cart_id.unwrap();
        store.save(new_order(cart_id, "One")).await.unwrap();
        store.save(new_order(cart_id, "Two")).await.unwrap();

        Repository::<Cart>::delete(&store, &cart).await.unwrap();

        let orders = Repository::<Order>::find_all(&store).await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn product_read_joins_category() {
        let store = InMemoryStore::new();
        let category = store.save(new_category("Electronics")).await.unwrap();

        let product = store
            .save(Product {
                product_title: Some("Smartphone".to_string()),
                sku: Some("SKU-001".to_string()),
                price_unit: Some(Decimal::new(59999, 2)),
                quantity: Some(50),
                category: Some(Category::reference(category.category_id)),
                ..Product::default()
            })
            .await
            .unwrap();

        let joined = product.category.unwrap();
        assert_eq!(joined.category_title.as_deref(), Some("Electronics"));
        assert_eq!(joined.image_url.as_deref(), Some("electronics.jpg"));
    }

    #[tokio::test]
    async fn product_without_category_is_allowed() {
        let store = InMemoryStore::new();
        let product = store
            .save(Product {
                product_title: Some("Loose item".to_string()),
                ..Product::default()
            })
            .await
            .unwrap();
        assert!(product.category.is_none());
    }

    #[tokio::test]
    async fn product_rejects_unknown_category() {
        let store = InMemoryStore::new();
        let result = store
            .save(Product {
                category: Some(Category::reference(Some(CategoryId::new(9)))),
                ..Product::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(StoreError::ConstraintViolation {
                table: "products",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn deleting_category_cascades_to_products() {
        let store = InMemoryStore::new();
        let category = store.save(new_category("Clothing")).await.unwrap();
        store
            .save(Product {
                product_title: Some("Shirt".to_string()),
                category: Some(Category::reference(category.category_id)),
                ..Product::default()
            })
            .await
            .unwrap();

        Repository::<Category>::delete_by_id(&store, category.category_id.unwrap())
            .await
            .unwrap();

        assert!(Repository::<Product>::find_all(&store)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn decimals_are_rounded_to_two_places() {
        let store = InMemoryStore::new();
        let cart = store.save(new_cart(1)).await.unwrap();

        let order = store
            .save(Order {
                order_fee: Some(Decimal::new(1235, 3)),
                ..new_order(cart.cart_id.unwrap(), "Rounded")
            })
            .await
            .unwrap();
        let product = store
            .save(Product {
                price_unit: Some(Decimal::new(-19_995, 3)),
                ..Product::default()
            })
            .await
            .unwrap();

        assert_eq!(order.order_fee, Some(Decimal::new(124, 2)));
        assert_eq!(product.price_unit, Some(Decimal::new(-2000, 2)));
    }

    #[tokio::test]
    async fn decimal_overflow_violates_constraint() {
        let store = InMemoryStore::new();
        let cart = store.save(new_cart(1)).await.unwrap();

        let result = store
            .save(Order {
                order_fee: Some(Decimal::new(10_000_000_000, 0)),
                ..new_order(cart.cart_id.unwrap(), "Too expensive")
            })
            .await;
        assert!(matches!(
            result,
            Err(StoreError::ConstraintViolation { table: "orders", .. })
        ));

        let largest = store
            .save(Product {
                price_unit: Some(Decimal::new(999_999_999_999, 2)),
                ..Product::default()
            })
            .await
            .unwrap();
        assert_eq!(largest.price_unit, Some(Decimal::new(999_999_999_999, 2)));
        assert!(Repository::<Order>::find_all(&store).await.unwrap().is_empty());
    }
}
