//! Persisted forms of the stored entities.
//!
//! An entity without an identity has not been written yet; the store assigns
//! one on first save. Relations are carried as the related entity as it was
//! read by the store. On write only the related identity is used.

use chrono::NaiveDateTime;
use common::{CartId, CategoryId, OrderId, ProductId, UserId};
use rust_decimal::Decimal;

/// An identity-keyed record the store can persist.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The identity type assigned by the store.
    type Id: Copy + Eq + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static;

    /// Name of the backing table, used in constraint diagnostics.
    const TABLE: &'static str;

    /// Returns the identity, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;
}

/// A shopping cart owned by a user of the remote user directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    pub cart_id: Option<CartId>,
    /// Required by the schema; a save without it is rejected.
    pub user_id: Option<UserId>,
}

impl Cart {
    /// A cart known only by identity, as used for relation references.
    pub fn reference(cart_id: Option<CartId>) -> Self {
        Self {
            cart_id,
            user_id: None,
        }
    }
}

impl Entity for Cart {
    type Id = CartId;
    const TABLE: &'static str = "carts";

    fn id(&self) -> Option<CartId> {
        self.cart_id
    }
}

/// An order placed against exactly one cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    pub order_id: Option<OrderId>,
    pub order_date: Option<NaiveDateTime>,
    pub order_desc: Option<String>,
    pub order_fee: Option<Decimal>,
    pub cart: Option<Cart>,
}

impl Entity for Order {
    type Id = OrderId;
    const TABLE: &'static str = "orders";

    fn id(&self) -> Option<OrderId> {
        self.order_id
    }
}

/// A product category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub category_id: Option<CategoryId>,
    pub category_title: Option<String>,
    pub image_url: Option<String>,
}

impl Category {
    /// A category known only by identity, as used for relation references.
    pub fn reference(category_id: Option<CategoryId>) -> Self {
        Self {
            category_id,
            ..Self::default()
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;
    const TABLE: &'static str = "categories";

    fn id(&self) -> Option<CategoryId> {
        self.category_id
    }
}

/// A sellable product, optionally filed under a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub product_id: Option<ProductId>,
    pub product_title: Option<String>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub price_unit: Option<Decimal>,
    pub quantity: Option<i32>,
    pub category: Option<Category>,
}

impl Entity for Product {
    type Id = ProductId;
    const TABLE: &'static str = "products";

    fn id(&self) -> Option<ProductId> {
        self.product_id
    }
}
