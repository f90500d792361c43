//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation input lives in a separate
//! struct ([`NewLink`]) so the persisted shape ([`Link`]) always carries the
//! storage-assigned fields.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a long URL with its click counter

pub mod link;

pub use link::{Link, NewLink};
