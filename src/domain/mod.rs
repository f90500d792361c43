//! Domain layer containing business entities and storage contracts.
//!
//! The domain layer has no knowledge of HTTP. It defines what a [`Link`](entities::Link)
//! is, which storage primitives the registry relies on, and the errors those
//! primitives and the registry can produce.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`errors`] - Registry and storage error taxonomy
//!
//! # Storage Primitives
//!
//! Every mutation is a single atomic storage call:
//!
//! 1. insert-if-absent, reporting a uniqueness collision as a distinct outcome
//! 2. increment-if-present, returning the post-increment row
//! 3. delete, reporting whether a row was removed

pub mod entities;
pub mod errors;
pub mod repositories;
