//! Client IP extraction from HTTP requests.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Determines the client IP for a request.
///
/// When `behind_proxy` is set, the first entry of `X-Forwarded-For` wins,
/// then `X-Real-IP`. Otherwise, or when neither header is usable, the peer
/// socket address is used.
///
/// Returns `None` only when no header is trusted and no peer address is known.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = client_ip(&headers, None, true).unwrap();
/// assert_eq!(ip, "203.0.113.7");
/// ```
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> Option<String> {
    if behind_proxy {
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return Some(ip.to_owned());
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return Some(ip.to_owned());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("198.51.100.4:51000".parse().unwrap())
    }

    #[test]
    fn test_peer_address_without_proxy() {
        let headers = HeaderMap::new();
        assert_eq!(
            client_ip(&headers, peer(), false).as_deref(),
            Some("198.51.100.4")
        );
    }

    #[test]
    fn test_forwarded_for_ignored_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(
            client_ip(&headers, peer(), false).as_deref(),
            Some("198.51.100.4")
        );
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1"),
        );

        assert_eq!(
            client_ip(&headers, peer(), true).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.9"));

        assert_eq!(
            client_ip(&headers, peer(), true).as_deref(),
            Some("203.0.113.9")
        );
    }

    #[test]
    fn test_empty_headers_fall_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));

        assert_eq!(
            client_ip(&headers, peer(), true).as_deref(),
            Some("198.51.100.4")
        );
    }

    #[test]
    fn test_no_source_available() {
        assert!(client_ip(&HeaderMap::new(), None, false).is_none());
    }
}
