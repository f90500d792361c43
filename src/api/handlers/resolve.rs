//! Handler for admin code resolution.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::links::ResolveResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a code to its link, counting the visit.
///
/// # Endpoint
///
/// `GET /api/resolve/{code}`
///
/// # Response
///
/// ```json
/// {
///   "code": "Ab12",
///   "longUrl": "https://example.com",
///   "clicks": 3,
///   "createdAt": 1735689600000
/// }
/// ```
///
/// `clicks` already includes this request.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ResolveResponse>, AppError> {
    match state.link_service.resolve(&code).await? {
        Some(link) => Ok(Json(link.into())),
        None => Err(AppError::not_found(
            "Link not found",
            json!({ "code": code }),
        )),
    }
}
