// Library exports for the Loka backend

pub mod app;
pub mod app_config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schema;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-export commonly used types
pub use app::AppState;
pub use app_config::{AppConfig, CONFIG};
pub use db::{DieselPool, MIGRATIONS};
pub use middleware::{auth_middleware, AuthenticatedUser, OptionalUser};
pub use models::auth::{AccessTokenClaims, RefreshTokenClaims};
pub use services::{JwtConfig, JwtError, JwtService};
pub use utils::{ApiError, ApiSuccess};

/// Initialize configuration, pool and services for the HTTP server.
pub async fn initialize_app_state() -> Result<AppState, Box<dyn std::error::Error>> {
    use tracing::info;

    dotenv::dotenv().ok();

    let config = app_config::config();

    info!("Initializing database pool...");
    info!(
        "Database: {}",
        db::mask_connection_string(&config.database_url)
    );
    let db_config = db::DieselDatabaseConfig::default();
    let db_pool = db::create_diesel_pool(db_config).await?;

    if migrations::should_run_migrations() {
        info!("Running embedded migrations...");
        let applied = migrations::run_migrations()
            .await
            .map_err(|e| format!("Migration failed: {}", e))?;
        info!("Applied {} migrations", applied);
    }

    let jwt_service = Arc::new(JwtService::from_env());

    Ok(AppState {
        db_pool,
        jwt_service,
    })
}

/// Assemble the full application router under `/api`.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::routing::get;

    let config = app_config::config();

    let cors = if config.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::PUT,
                Method::DELETE,
            ])
            .allow_headers(Any)
    };

    let api = axum::Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/auth", handlers::auth_routes())
        .nest("/businesses", handlers::business_routes())
        .nest("/jobs", handlers::job_routes())
        .nest("/job-applications", handlers::job_application_routes())
        .nest("/contributors", handlers::contributor_routes())
        .nest("/articles", handlers::article_routes(state.clone()))
        .nest("/events", handlers::event_routes())
        .nest("/payments", handlers::payment_routes(state.clone()))
        .nest("/admin", handlers::admin_routes(state.clone()));

    axum::Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
