//! Shared application state injected into every handler.

use std::net::IpAddr;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::SqliteLinkRepository;

/// Settings consulted by the admin guard on every protected request.
#[derive(Debug, Clone, Default)]
pub struct AdminGuard {
    pub password: Option<String>,
    pub allowed_ips: Vec<String>,
    pub behind_proxy: bool,
}

impl AdminGuard {
    /// Returns true when the allowlist is empty or `client_ip` matches an entry.
    ///
    /// Addresses are compared after canonicalization, so `127.0.0.1` also
    /// admits the IPv4-mapped `::ffff:127.0.0.1`. `::1` and `127.0.0.1`
    /// admit each other. Entries that are not IP addresses match only
    /// the identical string.
    pub fn allows_ip(&self, client_ip: Option<&str>) -> bool {
        if self.allowed_ips.is_empty() {
            return true;
        }
        let Some(client_ip) = client_ip else {
            return false;
        };
        let client = canonical_ip(client_ip);

        self.allowed_ips.iter().any(|allowed| {
            match (canonical_ip(allowed), client) {
                (Some(allowed), Some(client)) => {
                    allowed == client || (allowed.is_loopback() && client.is_loopback())
                }
                _ => allowed == client_ip,
            }
        })
    }

    /// Returns true when no password is configured or `provided` equals it.
    ///
    /// The comparison runs in constant time for equal-length inputs.
    pub fn accepts_password(&self, provided: Option<&str>) -> bool {
        match (&self.password, provided) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(expected), Some(provided)) => {
                expected.as_bytes().ct_eq(provided.as_bytes()).into()
            }
        }
    }
}

fn canonical_ip(raw: &str) -> Option<IpAddr> {
    raw.trim().parse::<IpAddr>().ok().map(|ip| ip.to_canonical())
}

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<SqliteLinkRepository>>,
    pub admin_guard: Arc<AdminGuard>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService<SqliteLinkRepository>>, admin_guard: AdminGuard) -> Self {
        Self {
            link_service,
            admin_guard: Arc::new(admin_guard),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(ips: &[&str], password: Option<&str>) -> AdminGuard {
        AdminGuard {
            password: password.map(str::to_string),
            allowed_ips: ips.iter().map(|ip| ip.to_string()).collect(),
            behind_proxy: false,
        }
    }

    #[test]
    fn test_empty_allowlist_admits_everyone() {
        let g = guard(&[], None);
        assert!(g.allows_ip(Some("203.0.113.7")));
        assert!(g.allows_ip(None));
    }

    #[test]
    fn test_allowlist_exact_and_mapped() {
        let g = guard(&["203.0.113.7", "10.0.0.5"], None);
        assert!(g.allows_ip(Some("203.0.113.7")));
        assert!(g.allows_ip(Some("::ffff:10.0.0.5")));
        assert!(!g.allows_ip(Some("203.0.113.8")));
        assert!(!g.allows_ip(None));
    }

    #[test]
    fn test_allowlist_is_not_a_string_suffix() {
        let g = guard(&["1.2.3.4"], None);
        assert!(g.allows_ip(Some("1.2.3.4")));
        assert!(!g.allows_ip(Some("11.2.3.4")));
        assert!(!g.allows_ip(Some("201.2.3.4")));
        assert!(!g.allows_ip(Some("::ffff:11.2.3.4")));
    }

    #[test]
    fn test_allowlist_non_ip_entry_matches_exactly() {
        let g = guard(&["gateway"], None);
        assert!(g.allows_ip(Some("gateway")));
        assert!(!g.allows_ip(Some("10.0.0.1")));
    }

    #[test]
    fn test_loopback_forms_are_equivalent() {
        assert!(guard(&["::1"], None).allows_ip(Some("127.0.0.1")));
        assert!(guard(&["127.0.0.1"], None).allows_ip(Some("::1")));
        assert!(!guard(&["::1"], None).allows_ip(Some("10.0.0.1")));
    }

    #[test]
    fn test_password_check() {
        assert!(guard(&[], None).accepts_password(None));
        assert!(guard(&[], None).accepts_password(Some("anything")));

        let g = guard(&[], Some("hunter2"));
        assert!(g.accepts_password(Some("hunter2")));
        assert!(!g.accepts_password(Some("hunter3")));
        assert!(!g.accepts_password(None));
        assert!(!g.accepts_password(Some("hunter22")));
        assert!(!g.accepts_password(Some("")));
    }
}
