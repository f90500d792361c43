//! DTOs for link listing, resolution and deletion.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::DEFAULT_LIST_LIMIT;
use crate::domain::entities::Link;

/// Largest page the listing endpoint will return.
pub const MAX_LIST_LIMIT: u32 = 500;

/// Query parameters for `GET /api/shorten/links`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListLinksParams {
    /// Returns the effective limit.
    ///
    /// # Defaults
    ///
    /// - `limit`: 50
    ///
    /// # Validation
    ///
    /// - Limit must be between 1 and 500
    pub fn validated_limit(&self) -> Result<i64, String> {
        match self.limit {
            None => Ok(DEFAULT_LIST_LIMIT),
            Some(limit) if (1..=MAX_LIST_LIMIT).contains(&limit) => Ok(i64::from(limit)),
            Some(_) => Err(format!("Limit must be between 1 and {MAX_LIST_LIMIT}")),
        }
    }
}

/// A link as shown to admins.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    pub code: String,
    pub long_url: String,
    pub created_at: i64,
    pub clicks: i64,
    pub short_url: String,
}

impl LinkItem {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            long_url: link.long_url,
            created_at: link.created_at,
            clicks: link.clicks,
            short_url,
        }
    }
}

/// Response for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListLinksResponse {
    pub links: Vec<LinkItem>,
}

/// Response for `GET /api/resolve/{code}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub code: String,
    pub long_url: String,
    pub clicks: i64,
    pub created_at: i64,
}

impl From<Link> for ResolveResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            long_url: link.long_url,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub success: bool,
    pub message: String,
}
