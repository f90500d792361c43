//! Admin guard middleware: IP allowlist plus shared password.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState, utils::client_ip::client_ip};

/// Header carrying the admin password.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Guards admin routes using the configured IP allowlist and password.
///
/// # Checks
///
/// 1. If `ALLOWED_IPS` is set, the client IP must match an entry, else `403`
/// 2. If `ADMIN_PASSWORD` is set, the request must carry it, else `401`
///
/// The password is read from `X-Admin-Password`, falling back to
/// `Authorization: Bearer <password>`.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let guard = &st.admin_guard;

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(req.headers(), peer, guard.behind_proxy);

    if !guard.allows_ip(ip.as_deref()) {
        tracing::warn!(client_ip = ?ip, "Admin request from IP outside allowlist");
        return Err(AppError::forbidden(
            "Access denied. IP not in allowlist.",
            json!({}),
        ));
    }

    if guard.password.is_none() {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let provided = match parts
        .headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(password) => Some(password.to_string()),
        None => AuthBearer::from_request_parts(&mut parts, &())
            .await
            .ok()
            .map(|AuthBearer(token)| token),
    };

    if !guard.accepts_password(provided.as_deref()) {
        tracing::warn!(client_ip = ?ip, "Admin request with missing or invalid password");
        return Err(AppError::unauthorized(
            "Invalid or missing authentication credentials.",
            json!({}),
        ));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
