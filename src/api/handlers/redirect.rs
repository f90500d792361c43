//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// Each successful redirect increments the link's click counter before the
/// response is sent.
///
/// # Errors
///
/// Returns `404 Not Found` if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let Some(link) = state.link_service.resolve(&code).await? else {
        return Err(AppError::not_found(
            "Link not found",
            json!({ "code": code }),
        ));
    };

    debug!(code = %link.code, clicks = link.clicks, "Redirecting");

    Ok(Redirect::temporary(&link.long_url))
}
