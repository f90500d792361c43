//! Handlers for listing and deleting links.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::links::{DeleteLinkResponse, LinkItem, ListLinksParams, ListLinksResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recently created links.
///
/// # Endpoint
///
/// `GET /api/shorten/links?limit=50`
///
/// # Query Parameters
///
/// - `limit` - Maximum number of links, 1..=500 (default: 50)
///
/// # Errors
///
/// Returns `400` if `limit` is out of range.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<ListLinksParams>,
) -> Result<Json<ListLinksResponse>, AppError> {
    let limit = params
        .validated_limit()
        .map_err(|msg| AppError::bad_request(msg, json!({ "field": "limit" })))?;

    let links = state
        .link_service
        .list(limit)
        .await?
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkItem::new(link, short_url)
        })
        .collect();

    Ok(Json(ListLinksResponse { links }))
}

/// Deletes a link by code.
///
/// # Endpoint
///
/// `DELETE /api/shorten/{code}`
///
/// # Errors
///
/// Returns `404` if no link with this code exists.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    if !state.link_service.delete(&code).await? {
        return Err(AppError::not_found(
            "Link not found",
            json!({ "code": code }),
        ));
    }

    tracing::info!(code = %code, "Short link deleted");

    Ok(Json(DeleteLinkResponse {
        success: true,
        message: format!("Link {code} deleted"),
    }))
}
