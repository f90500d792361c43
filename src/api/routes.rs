//! API route configuration.
//!
//! Every route here sits behind the admin guard in
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    delete_link_handler, list_links_handler, resolve_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Admin API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Create a short link
/// - `GET    /shorten/links`  - List recent links
/// - `DELETE /shorten/{code}` - Delete a link
/// - `GET    /resolve/{code}` - Resolve a code and count the visit
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/links", get(list_links_handler))
        .route("/shorten/{code}", delete(delete_link_handler))
        .route("/resolve/{code}", get(resolve_handler))
}
