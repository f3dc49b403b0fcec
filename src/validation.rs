use once_cell::sync::Lazy;
use regex::Regex;

// local-part "@" domain "." tld, no whitespace anywhere
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// The transform applied to user input before validation and before the
/// payload goes over the wire. Applying it twice changes nothing.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Shared acceptance check used by both the relay endpoint and the signup
/// form, so the two sides can never drift apart.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_PATTERN.is_match(email)
}
