//! HTTP resource layer for the order and product services.
//!
//! The order service serves carts and orders, the product service serves
//! categories and products. Both expose `/health` and Prometheus `/metrics`.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use entity_store::{CatalogStore, OrderStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use user_directory::UserDirectory;

pub use state::{CatalogAppState, OrderAppState};

/// Creates the order service router.
pub fn create_order_app<S, D>(
    state: Arc<OrderAppState<S, D>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    S: OrderStore + 'static,
    D: UserDirectory + 'static,
{
    use routes::{carts, orders};

    let api = Router::new()
        .route(
            "/api/carts",
            get(carts::find_all::<S, D>)
                .post(carts::save::<S, D>)
                .put(carts::update::<S, D>),
        )
        .route(
            "/api/carts/{id}",
            get(carts::find_by_id::<S, D>)
                .put(carts::update_by_id::<S, D>)
                .delete(carts::delete_by_id::<S, D>),
        )
        .route(
            "/api/orders",
            get(orders::find_all::<S, D>)
                .post(orders::save::<S, D>)
                .put(orders::update::<S, D>),
        )
        .route(
            "/api/orders/{id}",
            get(orders::find_by_id::<S, D>)
                .put(orders::update_by_id::<S, D>)
                .delete(orders::delete_by_id::<S, D>),
        )
        .with_state(state);

    with_service_routes(api, metrics_handle)
}

/// Creates the product service router.
pub fn create_product_app<S>(state: Arc<CatalogAppState<S>>, metrics_handle: PrometheusHandle) -> Router
where
    S: CatalogStore + 'static,
{
    use routes::{categories, products};

    let api = Router::new()
        .route(
            "/api/categories",
            get(categories::find_all::<S>)
                .post(categories::save::<S>)
                .put(categories::update::<S>),
        )
        .route(
            "/api/categories/{id}",
            get(categories::find_by_id::<S>)
                .put(categories::update_by_id::<S>)
                .delete(categories::delete_by_id::<S>),
        )
        .route(
            "/api/products",
            get(products::find_all::<S>)
                .post(products::save::<S>)
                .put(products::update::<S>),
        )
        .route(
            "/api/products/{id}",
            get(products::find_by_id::<S>)
                .put(products::update_by_id::<S>)
                .delete(products::delete_by_id::<S>),
        )
        .with_state(state);

    with_service_routes(api, metrics_handle)
}

/// Adds health and metrics endpoints plus the shared middleware.
fn with_service_routes(api: Router, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    api.route("/health", get(routes::ops::health))
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
