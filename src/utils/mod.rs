//! Utility functions for code generation, URL checks, and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_safety`] - Redirect target safety policy
//! - [`client_ip`] - Client IP extraction from HTTP requests
//! - [`db_error`] - Classification of database errors

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
pub mod url_safety;
