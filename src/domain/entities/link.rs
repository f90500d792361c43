//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// Once created, only `clicks` changes, and it only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub long_url: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
    pub clicks: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(code: String, long_url: String, created_at: i64, clicks: i64) -> Self {
        Self {
            code,
            long_url,
            created_at,
            clicks,
        }
    }

    /// Creation time as a UTC timestamp, if it is representable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }
}

/// Input data for inserting a new link.
///
/// `clicks` is not part of the input: every link starts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub created_at: i64,
}

impl NewLink {
    /// Builds an insert request stamped with the current time.
    pub fn now(code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            long_url: long_url.into(),
            created_at: Utc::now().timestamp_millis(),
        }
    }
}
