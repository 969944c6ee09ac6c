//! Review submission API endpoint.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::ApiResponse;
use crate::auth::extract_bearer;
use crate::errors::{codes, AppError, ErrorDetails, ErrorResponse};
use crate::models::ReviewRequest;
use crate::AppState;

/// POST /api/reviews/{vendor}/{package} - Submit a star rating and review.
///
/// Outcomes: 201 on success, 400 on payload validation failure, 401 on
/// missing/invalid bearer token, 500 when the upstream write fails.
pub async fn submit_review(
    State(state): State<AppState>,
    Path((vendor, package)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let Some(token) = extract_bearer(&headers) else {
        return Err(AppError::Unauthorized(
            "Missing or invalid Authorization header.".to_string(),
        ));
    };

    let user = state.auth0.validate_token(token).await?;

    let payload: Value = serde_json::from_slice(&body).map_err(|_| {
        AppError::Validation("Could not decode request body.".to_string())
    })?;
    let review = ReviewRequest::from_payload(&payload)?;

    let name = format!("{}/{}", vendor, package);
    if let Err(err) = state
        .marketplace
        .submit_review(
            &name,
            &user.sub,
            user.display_name(),
            user.picture.as_deref(),
            &review,
        )
        .await
    {
        tracing::error!("Review submission for {} failed: {}", name, err);
        let body = ErrorResponse {
            success: false,
            error: ErrorDetails {
                code: codes::INTERNAL_ERROR.to_string(),
                message: "Failed to submit review.".to_string(),
            },
        };
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response());
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::new(json!({})))).into_response())
}
