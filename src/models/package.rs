//! Package models produced by the marketplace API client.
//!
//! Each DTO is built once from an upstream row and never mutated. Every
//! field except `name` is optional: the catalog views expose whatever
//! metadata the crawler managed to collect, and "unknown" must stay
//! distinguishable from zero.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::marketplace::coerce;

/// One row of the package catalog list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    /// Unique `vendor/package` key.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_stars: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_forks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_open_issues: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_reviews: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_mautic_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PackageSummary {
    /// Build a summary from a catalog row. Rows without a `name` carry
    /// nothing to list and yield `None`.
    pub(crate) fn from_row(row: &Map<String, Value>) -> Option<Self> {
        let name = coerce::to_text(row.get("name"))?;

        Some(Self {
            name,
            display_name: coerce::to_text(row.get("displayname")),
            description: coerce::to_text(row.get("description")),
            package_type: coerce::to_text(row.get("type")),
            repository: coerce::to_text(row.get("repository")),
            github_stars: coerce::to_int(row.get("github_stars")),
            github_forks: coerce::to_int(row.get("github_forks")),
            github_open_issues: coerce::to_int(row.get("github_open_issues")),
            language: coerce::to_text(row.get("language")),
            favers: coerce::to_int(row.get("favers")),
            downloads: coerce::to_int(row.get("downloads")),
            average_rating: coerce::to_float(row.get("average_rating")),
            total_reviews: coerce::to_int(row.get("total_review")),
            latest_mautic_support: coerce::to_bool(row.get("latest_mautic_support")),
            updated_at: coerce::to_datetime(row.get("time")),
        })
    }
}

/// Full package detail as served by the `get_pack` RPC.
///
/// `downloads`, `maintainers`, `reviews` and `versions` are nested upstream
/// structures this layer passes through untouched. The `time` field stays a
/// raw string here; only the list view parses it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_stars: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_watchers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_forks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_open_issues: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggesters: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_reviewed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_mautic_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<Value>>,
}

impl PackageDetail {
    pub(crate) fn from_row(row: &Map<String, Value>) -> Option<Self> {
        let name = coerce::to_text(row.get("name"))?;

        Some(Self {
            name,
            display_name: coerce::to_text(row.get("displayname")),
            description: coerce::to_text(row.get("description")),
            package_type: coerce::to_text(row.get("type")),
            repository: coerce::to_text(row.get("repository")),
            github_stars: coerce::to_int(row.get("github_stars")),
            github_watchers: coerce::to_int(row.get("github_watchers")),
            github_forks: coerce::to_int(row.get("github_forks")),
            github_open_issues: coerce::to_int(row.get("github_open_issues")),
            language: coerce::to_text(row.get("language")),
            dependents: coerce::to_int(row.get("dependents")),
            suggesters: coerce::to_int(row.get("suggesters")),
            downloads: row.get("downloads").cloned(),
            favers: coerce::to_int(row.get("favers")),
            url: coerce::to_text(row.get("url")),
            is_reviewed: coerce::to_bool(row.get("isreviewed")),
            latest_mautic_support: coerce::to_bool(row.get("latest_mautic_support")),
            maintainers: coerce::to_array(row.get("maintainers")),
            time: coerce::to_text(row.get("time")),
            reviews: coerce::to_array(row.get("reviews")),
            versions: coerce::to_array(row.get("versions")),
        })
    }
}

/// Result page for a catalog list request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageListResult {
    pub items: Vec<PackageSummary>,
    pub limit: i64,
    pub offset: i64,
    /// Total row count; `None` when the backend did not report one.
    pub total: Option<i64>,
}
