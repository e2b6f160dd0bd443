//! Shared application state.

use std::sync::Arc;

use domain::{
    CartService, CategoryService, DirectoryFailurePolicy, OrderService, ProductService,
};
use entity_store::{CatalogStore, OrderStore};
use user_directory::UserDirectory;

/// State of the order service: carts and orders over one store.
pub struct OrderAppState<S, D> {
    pub carts: CartService<S, D>,
    pub orders: OrderService<S>,
}

impl<S: OrderStore + Clone, D: UserDirectory> OrderAppState<S, D> {
    pub fn new(store: S, directory: D, failure_policy: DirectoryFailurePolicy) -> Arc<Self> {
        Arc::new(Self {
            carts: CartService::new(store.clone(), directory).with_failure_policy(failure_policy),
            orders: OrderService::new(store),
        })
    }
}

/// State of the product service: categories and products over one store.
pub struct CatalogAppState<S> {
    pub categories: CategoryService<S>,
    pub products: ProductService<S>,
}

impl<S: CatalogStore + Clone> CatalogAppState<S> {
    pub fn new(store: S) -> Arc<Self> {
        Arc::new(Self {
            categories: CategoryService::new(store.clone()),
            products: ProductService::new(store),
        })
    }
}
