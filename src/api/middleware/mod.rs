//! HTTP middleware for request processing and protection.
//!
//! Provides the admin guard, rate limiting, and observability middleware.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
