//! Auth0 token validation.
//!
//! Bearer tokens are opaque to this service; they are proven by calling the
//! tenant's `/userinfo` endpoint. Any rejection surfaces as the same generic
//! message so provider internals never leak to API clients.

use axum::http::{header, HeaderMap};
use reqwest::Client;
use serde::Deserialize;

use crate::errors::AppError;

const INVALID_TOKEN: &str = "Invalid or expired token.";

/// Identity attributes returned by `/userinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserInfo {
    /// Name shown next to a review: profile name, else email, else a fixed
    /// placeholder.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Anonymous")
    }
}

/// Client for the Auth0 userinfo endpoint.
#[derive(Debug, Clone)]
pub struct Auth0Client {
    http: Client,
    userinfo_url: String,
}

impl Auth0Client {
    /// `domain` is the bare tenant domain (`tenant.eu.auth0.com`); a full
    /// `http(s)://` base is also accepted so tests can point at a local stub.
    pub fn new(http: Client, domain: &str) -> Self {
        let base = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", domain)
        };

        Self {
            http,
            userinfo_url: format!("{}/userinfo", base),
        }
    }

    /// Prove a bearer token against `/userinfo`.
    ///
    /// Non-200 responses, transport failures and bodies without a `sub`
    /// all collapse into the same `Unauthorized` outcome.
    pub async fn validate_token(&self, token: &str) -> Result<UserInfo, AppError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Auth0 userinfo request failed: {:?}", err);
                AppError::Unauthorized(INVALID_TOKEN.to_string())
            })?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        }

        response.json::<UserInfo>().await.map_err(|err| {
            tracing::error!("Undecodable Auth0 userinfo response: {:?}", err);
            AppError::Unauthorized(INVALID_TOKEN.to_string())
        })
    }
}

/// Extract the token from an `Authorization: Bearer …` header.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}
