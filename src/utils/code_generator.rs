//! Short code generation.
//!
//! Codes are drawn fresh on every call and never derived from the URL, so
//! uniqueness is left to the storage constraint and the retry loop in
//! [`crate::application::services::ShortUrlService::create`].

use rand::Rng;
use rand::distr::Alphanumeric;

/// Number of characters in a generated short code.
///
/// 62^5 is roughly 916 million codes.
pub const SHORT_CODE_LENGTH: usize = 5;

/// Generates a random short code of [`SHORT_CODE_LENGTH`] characters.
///
/// Characters are sampled uniformly from `[A-Za-z0-9]` using the thread-local
/// CSPRNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 5);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    generate_code_with_length(SHORT_CODE_LENGTH)
}

/// Generates a random alphanumeric code of the given length.
pub fn generate_code_with_length(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
}
