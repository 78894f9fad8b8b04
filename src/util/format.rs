//! Display formatting helpers.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Date portion of an RFC 3339 timestamp, e.g. `"2026-03-01"`.
#[must_use]
pub fn created_date(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// Uppercase first character of an email for the avatar chip.
#[must_use]
pub fn avatar_initial(email: &str) -> String {
    email
        .chars()
        .next()
        .map_or_else(|| "?".to_owned(), |c| c.to_uppercase().to_string())
}
