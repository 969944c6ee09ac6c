//! Mautic Marketplace Backend
//!
//! A REST backend serving the plugin/theme marketplace: package listing and
//! detail from the Supabase catalog, review submission gated by Auth0.

mod api;
mod auth;
mod config;
mod errors;
mod marketplace;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::Auth0Client;
use config::Config;
use marketplace::{transport::SupabaseTransport, MarketplaceApiClient};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub marketplace: Arc<MarketplaceApiClient>,
    pub auth0: Arc<Auth0Client>,
}

impl AppState {
    /// Wire the upstream clients from configuration. One `reqwest::Client`
    /// backs both; connection pooling is shared.
    pub fn from_config(config: Config) -> Self {
        let http = reqwest::Client::new();

        let transport = SupabaseTransport::new(
            http.clone(),
            config.supabase_api_base.clone(),
            config.supabase_anon_key.clone(),
            config.supabase_service_role_key.clone(),
        );

        Self {
            marketplace: Arc::new(MarketplaceApiClient::new(transport)),
            auth0: Arc::new(Auth0Client::new(http, &config.auth0_domain)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mautic Marketplace Backend");
    tracing::info!("Supabase base: {}", config.supabase_api_base);
    tracing::info!("Auth0 domain: {}", config.auth0_domain);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.supabase_api_base.is_empty() || config.supabase_anon_key.is_empty() {
        tracing::warn!("Supabase credentials not configured (SUPABASE_API_BASE / SUPABASE_ANON_KEY). Catalog queries will fail!");
    }
    if config.supabase_service_role_key.is_empty() {
        tracing::warn!("No service role key configured (SUPABASE_SERVICE_ROLE_KEY). Review writes will fail!");
    }
    if config.auth0_domain.is_empty() {
        tracing::warn!("No Auth0 domain configured (AUTH0_DOMAIN). Review submission will reject all tokens!");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::from_config(config);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Catalog
        .route("/packages", get(api::list_packages))
        .route("/packages/{vendor}/{package}", get(api::get_package))
        // Reviews
        .route("/reviews/{vendor}/{package}", post(api::submit_review));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
