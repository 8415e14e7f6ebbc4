//! fundi marketplace API
//!
//! A local-services marketplace backend built with Axum. Accounts span an
//! external identity provider and the PostgreSQL profile store; the auth
//! routes orchestrate the two, the catalog routes serve public browsing
//! with read-time rating aggregation, and the admin routes moderate the
//! platform behind a role guard.

mod config;
mod logging;
mod openapi;

use axum::{routing::get, Json, Router};
use config::{Config, ProviderMode};
use fundi_api_admin::{admin_router, AdminState};
use fundi_api_auth::{auth_router, AuthState};
use fundi_api_catalog::{catalog_router, CatalogState};
use fundi_identity::{HttpIdentityProvider, HttpProviderConfig, IdentityProvider, MockIdentityProvider};
use openapi::swagger_routes;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting fundi API"
    );

    // Create database connection pool
    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            info!("Database connection established");
            pool
        }
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    // Apply pending migrations before serving traffic
    if let Err(e) = fundi_db::run_migrations(&pool).await {
        eprintln!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    // Build the identity provider adapter
    let provider: Arc<dyn IdentityProvider> = match &config.provider {
        ProviderMode::Http { base_url, api_key } => {
            let provider_config = HttpProviderConfig::new(base_url.clone(), api_key.clone());
            match HttpIdentityProvider::new(&provider_config) {
                Ok(p) => Arc::new(p),
                Err(e) => {
                    eprintln!("Failed to create identity provider adapter: {e}");
                    std::process::exit(1);
                }
            }
        }
        ProviderMode::Mock => {
            tracing::warn!("Running with the in-memory mock identity provider; accounts will not survive a restart");
            Arc::new(MockIdentityProvider::new())
        }
    };

    info!(provider = provider.provider_type(), "Identity provider ready");

    // Assemble routes
    let auth_state = AuthState::new(pool.clone(), provider.clone());
    let catalog_state = CatalogState::new(pool.clone());
    let admin_state = AdminState::new(pool.clone(), provider.clone());

    let cors = build_cors_layer(&config.cors_origins);

    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(swagger_routes())
        .merge(catalog_router(catalog_state))
        .nest("/auth", auth_router(auth_state))
        .nest("/admin", admin_router(admin_state))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(1_048_576))
        .layer(cors);

    // Bind and serve
    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Liveness endpoint.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    use tower_http::cors::AllowOrigin;

    let is_wildcard = origins.len() == 1 && origins[0] == "*";

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(3600));

    if is_wildcard {
        layer = layer
            .allow_origin(AllowOrigin::any())
            .allow_methods(Any)
            .allow_headers(Any);
    } else {
        use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
        use axum::http::Method;

        let allowed: Vec<axum::http::HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer = layer
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT, ORIGIN])
            .allow_credentials(true);
    }

    layer
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
