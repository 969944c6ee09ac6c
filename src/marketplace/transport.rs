//! Single-attempt HTTP transport for the Supabase REST/RPC surface.
//!
//! One outbound request per call, no retries. Supabase expects the same
//! secret twice on every request (`apikey` header and bearer token); which
//! secret is attached depends on the credential tier.

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;

/// Credential level attached to an upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialTier {
    /// Anon key; all read-side queries.
    Read,
    /// Service-role key; row-mutating writes only.
    Privileged,
}

/// Stateless invoker for the Supabase API. Cheap to clone, safe to share
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct SupabaseTransport {
    http: Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl SupabaseTransport {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        service_role_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            service_role_key: service_role_key.into(),
        }
    }

    /// Execute a read-tier GET and decode the JSON body.
    pub async fn query(&self, path: &str, params: &[(&str, String)]) -> Result<Value, AppError> {
        let request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(params);

        let (status, body) = self
            .send(self.with_credentials(request, CredentialTier::Read))
            .await?;

        if status >= 400 {
            return Err(upstream_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::error!("Undecodable Supabase response from {}: {:?}", path, err);
            AppError::Upstream(format!("Supabase API error (undecodable response: {}).", err))
        })
    }

    /// Execute a privileged-tier write. Success is any status below 400;
    /// the body is not required (`Prefer: return=minimal`).
    pub async fn mutate<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("Prefer", "return=minimal")
            .json(body);

        let (status, body) = self
            .send(self.with_credentials(request, CredentialTier::Privileged))
            .await?;

        if status >= 400 {
            return Err(upstream_error(status, &body));
        }

        Ok(())
    }

    fn with_credentials(&self, request: RequestBuilder, tier: CredentialTier) -> RequestBuilder {
        let key = match tier {
            CredentialTier::Read => &self.anon_key,
            CredentialTier::Privileged => &self.service_role_key,
        };

        request
            .header("Accept", "application/json")
            .header("apikey", key)
            .bearer_auth(key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(u16, String), AppError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Build the error for a non-2xx upstream status. The body is decoded as
/// JSON when possible so a structured `message`/`error` field can be
/// surfaced; otherwise the bare status code stands in.
fn upstream_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|payload| extract_error_message(&payload))
        .unwrap_or_else(|| format!("HTTP {}", status));

    AppError::Upstream(format!("Supabase API error ({}).", message))
}

fn extract_error_message(payload: &Value) -> Option<String> {
    if let Some(message) = payload.get("message").and_then(Value::as_str) {
        return Some(message.to_owned());
    }

    payload
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_owned)
}
