//! String normalization applied before membership and length checks.

/// Trims surrounding whitespace, then lowercases.
///
/// ```rust
/// assert_eq!(classroll::normalize_scalar("  Computer_Science "), "computer_science");
/// ```
pub fn normalize_scalar(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalizes each element, keeping order and duplicates.
pub fn normalize_list<S: AsRef<str>>(xs: &[S]) -> Vec<String> {
    xs.iter().map(|x| normalize_scalar(x.as_ref())).collect()
}
