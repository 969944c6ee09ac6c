//! Marketplace API client.
//!
//! Orchestrates the Supabase transport, envelope normalization and value
//! coercion into the three operations the rest of the service consumes:
//! list packages, get package detail, submit review.

pub mod coerce;
pub mod envelope;
pub mod identity;
pub mod transport;

use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{PackageDetail, PackageListResult, PackageSummary, ReviewRequest};
use transport::SupabaseTransport;

/// Parameters for a catalog list query. Ordering and filtering are executed
/// by the backend; this layer only forwards them.
#[derive(Debug, Clone)]
pub struct ListPackagesQuery {
    pub limit: i64,
    pub offset: i64,
    pub order_by: String,
    pub order_dir: String,
    pub package_type: Option<String>,
    pub query: Option<String>,
    pub mautic_version: Option<String>,
}

/// Client for the marketplace's Supabase backend. Holds only immutable
/// configuration; a single instance serves unlimited concurrent requests.
#[derive(Debug, Clone)]
pub struct MarketplaceApiClient {
    transport: SupabaseTransport,
}

impl MarketplaceApiClient {
    pub fn new(transport: SupabaseTransport) -> Self {
        Self { transport }
    }

    /// List catalog packages via the `get_view` RPC.
    ///
    /// Rows without a `name` are skipped rather than failing the page; they
    /// are half-crawled catalog entries, not client errors. Items keep the
    /// backend's ordering.
    pub async fn list_packages(
        &self,
        query: &ListPackagesQuery,
    ) -> Result<PackageListResult, AppError> {
        let mut params: Vec<(&str, String)> = vec![
            ("_limit", query.limit.to_string()),
            ("_offset", query.offset.to_string()),
            ("_orderby", query.order_by.clone()),
            ("_orderdir", query.order_dir.clone()),
        ];

        if let Some(text) = non_empty(&query.query) {
            params.push(("_query", text));
        }
        if let Some(package_type) = non_empty(&query.package_type) {
            params.push(("_type", package_type));
        }
        if let Some(version) = non_empty(&query.mautic_version) {
            params.push(("_smv", version));
        }

        let data = self.transport.query("/rest/v1/rpc/get_view", &params).await?;
        let normalized = envelope::normalize_list(data);

        let items: Vec<PackageSummary> = normalized
            .rows
            .iter()
            .filter_map(|row| row.as_object())
            .filter_map(PackageSummary::from_row)
            .collect();

        Ok(PackageListResult {
            items,
            limit: query.limit,
            offset: query.offset,
            total: normalized.total,
        })
    }

    /// Fetch one package via the `get_pack` RPC.
    ///
    /// An empty response is the normal not-found outcome. A non-empty
    /// response without a proper `package` object is an upstream defect.
    pub async fn get_package(&self, package_name: &str) -> Result<Option<PackageDetail>, AppError> {
        let params = [("packag_name", package_name.to_string())];
        let data = self.transport.query("/rest/v1/rpc/get_pack", &params).await?;

        let is_empty = match &data {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if is_empty {
            return Ok(None);
        }

        data.get("package")
            .and_then(|pack| pack.as_object())
            .and_then(PackageDetail::from_row)
            .map(Some)
            .ok_or_else(|| {
                AppError::Upstream("Unexpected response from Supabase get_pack.".to_string())
            })
    }

    /// Store a review against a package on the privileged tier.
    ///
    /// The reviewer is attributed by the stable pseudo-identifier derived
    /// from the identity-provider subject; the raw subject is never sent.
    pub async fn submit_review(
        &self,
        package_name: &str,
        subject: &str,
        display_name: &str,
        picture: Option<&str>,
        review: &ReviewRequest,
    ) -> Result<(), AppError> {
        let body = json!({
            "objectId": package_name,
            "user_id": identity::derive_stable_id(subject),
            "user": display_name,
            "picture": picture,
            "rating": review.rating(),
            "review": review.review(),
        });

        self.transport.mutate("/rest/v1/reviews", &body).await
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
