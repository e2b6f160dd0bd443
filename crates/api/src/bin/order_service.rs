//! Order service entry point: carts and orders.

use api::OrderAppState;
use api::config::{Config, ORDER_SERVICE_PORT};
use entity_store::{InMemoryStore, PostgresStore};
use sqlx::postgres::PgPoolOptions;
use user_directory::HttpUserDirectory;

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env(ORDER_SERVICE_PORT);
    api::telemetry::init_tracing(&config);
    config.warn_rejected();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = api::telemetry::install_metrics()
        .expect("failed to install Prometheus recorder");

    // 3. Create the user directory client
    let directory =
        HttpUserDirectory::new(config.user_service_url.clone(), config.user_service_timeout)
            .expect("failed to build user directory client");
    tracing::info!(
        user_service_url = %config.user_service_url,
        fallback = ?config.user_fallback,
        "using user directory"
    );

    // 4. Create the store and application
    let app = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await
                .expect("failed to connect to database");
            let store = PostgresStore::new(pool);
            store
                .run_order_migrations()
                .await
                .expect("failed to run migrations");
            tracing::info!("using PostgreSQL store");

            let state = OrderAppState::new(store, directory, config.user_fallback);
            api::create_order_app(state, metrics_handle)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            let state = OrderAppState::new(InMemoryStore::new(), directory, config.user_fallback);
            api::create_order_app(state, metrics_handle)
        }
    };

    // 5. Start server
    tracing::info!(addr = %config.addr(), "starting order service");
    api::server::serve(app, &config.addr())
        .await
        .expect("server error");
}
