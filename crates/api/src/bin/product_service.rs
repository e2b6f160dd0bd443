//! Product service entry point: categories and products.

use api::CatalogAppState;
use api::config::{Config, PRODUCT_SERVICE_PORT};
use entity_store::{InMemoryStore, PostgresStore};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env(PRODUCT_SERVICE_PORT);
    api::telemetry::init_tracing(&config);
    config.warn_rejected();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = api::telemetry::install_metrics()
        .expect("failed to install Prometheus recorder");

    // 3. Create the store and application
    let app = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await
                .expect("failed to connect to database");
            let store = PostgresStore::new(pool);
            store
                .run_product_migrations()
                .await
                .expect("failed to run migrations");
            tracing::info!("using PostgreSQL store");

            api::create_product_app(CatalogAppState::new(store), metrics_handle)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            api::create_product_app(CatalogAppState::new(InMemoryStore::new()), metrics_handle)
        }
    };

    // 4. Start server
    tracing::info!(addr = %config.addr(), "starting product service");
    api::server::serve(app, &config.addr())
        .await
        .expect("server error");
}
