//! Package catalog API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::marketplace::ListPackagesQuery;
use crate::models::{PackageDetail, PackageListResult};
use crate::AppState;

/// Catalog list query parameters, all optional. Numeric parameters arrive
/// as strings and fall back to their defaults when unparsable.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub orderby: Option<String>,
    #[serde(default)]
    pub orderdir: Option<String>,
    #[serde(rename = "type", default)]
    pub package_type: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    /// Mautic version constraint, e.g. `^4.4`
    #[serde(default)]
    pub mautic: Option<String>,
}

/// GET /api/packages - List catalog packages.
pub async fn list_packages(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<PackageListResult> {
    let query = ListPackagesQuery {
        limit: parse_int_or(params.limit.as_deref(), 10),
        offset: parse_int_or(params.offset.as_deref(), 0),
        order_by: params.orderby.unwrap_or_else(|| "name".to_string()),
        order_dir: params.orderdir.unwrap_or_else(|| "asc".to_string()),
        package_type: params.package_type,
        query: params.query,
        mautic_version: params.mautic,
    };

    let result = state.marketplace.list_packages(&query).await?;
    success(result)
}

/// GET /api/packages/{vendor}/{package} - Get one package's detail.
pub async fn get_package(
    State(state): State<AppState>,
    Path((vendor, package)): Path<(String, String)>,
) -> ApiResult<PackageDetail> {
    let name = format!("{}/{}", vendor, package);

    match state.marketplace.get_package(&name).await? {
        Some(detail) => success(detail),
        None => Err(AppError::NotFound("Package not found.".to_string())),
    }
}

/// Lenient integer parse for query parameters: missing, empty or
/// non-numeric input falls back to the default.
fn parse_int_or(value: Option<&str>, default: i64) -> i64 {
    match value {
        None | Some("") => default,
        Some(text) => text
            .parse::<i64>()
            .ok()
            .or_else(|| text.parse::<f64>().ok().map(|f| f as i64))
            .unwrap_or(default),
    }
}
