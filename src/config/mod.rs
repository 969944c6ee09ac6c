//! Configuration module for the marketplace backend.
//!
//! All configuration is loaded from environment variables once at startup;
//! the clients own their settings immutably from then on.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Supabase project REST API
    pub supabase_api_base: String,
    /// Read-tier key for catalog queries
    pub supabase_anon_key: String,
    /// Privileged key for review writes
    pub supabase_service_role_key: String,
    /// Auth0 tenant domain hosting the userinfo endpoint
    pub auth0_domain: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let supabase_api_base = env::var("SUPABASE_API_BASE")
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();
        let supabase_anon_key = env::var("SUPABASE_ANON_KEY").unwrap_or_default();
        let supabase_service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default();
        let auth0_domain = env::var("AUTH0_DOMAIN").unwrap_or_default();

        let bind_addr = env::var("MARKETPLACE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid MARKETPLACE_BIND_ADDR format");

        let log_level = env::var("MARKETPLACE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            supabase_api_base,
            supabase_anon_key,
            supabase_service_role_key,
            auth0_domain,
            bind_addr,
            log_level,
        }
    }
}
