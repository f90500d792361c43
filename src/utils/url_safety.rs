//! Safety policy for redirect targets.
//!
//! Only public `http`/`https` destinations may be shortened. Hosts that point
//! back into the machine or the local network are rejected so a short link
//! can never be used to reach internal services.

use std::net::{Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

/// Reasons a URL is refused as a redirect target.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UnsafeUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL contains control characters")]
    ControlCharacter,

    #[error("Only HTTP and HTTPS protocols are allowed, got '{0}'")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("Host '{0}' points to a local or private network")]
    PrivateHost(String),
}

/// Checks that `input` is a public `http(s)` URL.
///
/// # Rules
///
/// 1. **Format**: Must be free of control characters and parse as an absolute URL
/// 2. **Scheme**: Only `http` and `https` (rejects `file:`, `javascript:`, `data:`, `ftp:` ...)
/// 3. **Host**: Rejects `localhost`, loopback, private, link-local,
///    unspecified and broadcast IPv4, and loopback, unspecified, unique-local
///    and link-local IPv6 (including IPv4-mapped forms)
///
/// Hostnames are not resolved through DNS.
///
/// # Errors
///
/// Returns the first [`UnsafeUrlError`] rule the URL violates.
///
/// # Examples
///
/// ```ignore
/// assert!(check_url_safety("https://example.com/path").is_ok());
/// assert!(check_url_safety("http://192.168.1.1").is_err());
/// assert!(check_url_safety("javascript:alert(1)").is_err());
/// ```
pub fn check_url_safety(input: &str) -> Result<(), UnsafeUrlError> {
    // The parser silently drops tabs and newlines, but the raw input is what gets stored.
    if input.chars().any(char::is_control) {
        return Err(UnsafeUrlError::ControlCharacter);
    }

    let url = Url::parse(input).map_err(|e| UnsafeUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UnsafeUrlError::UnsupportedScheme(other.to_string())),
    }

    let host = url.host().ok_or(UnsafeUrlError::MissingHost)?;

    let blocked = match &host {
        Host::Domain(name) => is_local_hostname(name),
        Host::Ipv4(ip) => is_blocked_ipv4(ip),
        Host::Ipv6(ip) => is_blocked_ipv6(ip),
    };

    if blocked {
        return Err(UnsafeUrlError::PrivateHost(host.to_string()));
    }

    Ok(())
}

fn is_local_hostname(name: &str) -> bool {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    name == "localhost" || name.ends_with(".localhost")
}

fn is_blocked_ipv4(ip: &Ipv4Addr) -> bool {
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
}

fn is_blocked_ipv6(ip: &Ipv6Addr) -> bool {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_blocked_ipv4(&mapped);
    }

    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7
        || (first & 0xfe00) == 0xfc00
        // fe80::/10
        || (first & 0xffc0) == 0xfe80
}
