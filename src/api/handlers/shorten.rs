//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_safety::check_url_safety;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/some/long/path",
///   "code": "Ab12"
/// }
/// ```
///
/// `code` is optional; when absent a random 4-character code is generated.
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "code": "Ab12",
///   "shortUrl": "https://go.example.com/s/Ab12",
///   "longUrl": "https://example.com/some/long/path",
///   "createdAt": 1735689600000
/// }
/// ```
///
/// # Errors
///
/// - `400` if `longUrl` is missing, unsafe, or `code` is malformed
/// - `409` if the custom code is already in use
/// - `500` if no free code was found or storage failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;
    check_url_safety(&payload.long_url)?;

    let desired_code = payload.desired_code();
    let link = state
        .link_service
        .create(payload.long_url, desired_code)
        .await?;

    tracing::info!(code = %link.code, "Short link created");

    let short_url = state.link_service.short_url(&link.code);
    Ok(Json(ShortenResponse::new(link, short_url)))
}
