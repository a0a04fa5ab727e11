//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w-]+@([\w-]+\.)+[\w]+$").unwrap());

/// Check that an email address is well formed
///
/// Rules:
/// - Local part of word characters and hyphens (no dots, no plus)
/// - At least one dotted domain label after the `@`
pub fn email_is_valid(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
