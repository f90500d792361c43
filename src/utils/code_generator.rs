//! Short code generation and validation utilities.
//!
//! Codes are exactly [`CODE_LENGTH`] characters drawn from the 62-symbol
//! alphabet `A-Z`, `a-z`, `0-9`, giving 62^4 (about 14.7 million) possible codes.

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Number of characters in every short code.
pub const CODE_LENGTH: usize = 4;

/// Compiled pattern every stored code satisfies.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{4}$").expect("short code regex is valid"));

/// Generates a random short code.
///
/// Uses the thread-local CSPRNG and samples each character uniformly from the
/// alphanumeric alphabet.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 4);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns `true` if `code` is exactly four ASCII alphanumeric characters.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_code("ABCD"));
/// assert!(is_valid_code("a1B2"));
///
/// assert!(!is_valid_code("AB"));     // Too short
/// assert!(!is_valid_code("ABCDE"));  // Too long
/// assert!(!is_valid_code("AB@D"));   // Special character
/// ```
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}
