use std::sync::OnceLock;

use regex::Regex;

static EMAIL: OnceLock<Regex> = OnceLock::new();

/// Syntactic sanity check: one `@`, no whitespace, and a dot somewhere in the domain.
///
/// Accepts plenty of addresses a mail server would reject. Use it to catch
/// typos in forms, not to validate deliverability.
#[must_use]
pub fn is_valid_email(text: &str) -> bool {
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
        .is_match(text)
}
