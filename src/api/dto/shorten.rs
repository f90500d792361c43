//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL to shorten. Missing and empty values are both rejected.
    #[serde(default)]
    #[validate(length(min = 1, max = 8192, message = "longUrl is required"))]
    pub long_url: String,

    /// Optional custom 4-character code. An empty string counts as absent.
    pub code: Option<String>,
}

impl ShortenRequest {
    /// The custom code, treating an empty string as "not provided".
    pub fn desired_code(&self) -> Option<String> {
        self.code.clone().filter(|c| !c.is_empty())
    }
}

/// Response for a created link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub success: bool,
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: i64,
}

impl ShortenResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            success: true,
            code: link.code,
            short_url,
            long_url: link.long_url,
            created_at: link.created_at,
        }
    }
}
