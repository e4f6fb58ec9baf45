//! ULID-backed unique values so seeded rows never collide on unique columns.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("game");
/// let b = unique_str("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Username short enough for the 64-char `players.username` column.
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let name = unique_username("alice");
/// assert!(name.len() <= 64);
/// assert!(name.starts_with("alice_"));
/// ```
pub fn unique_username(prefix: &str) -> String {
    let suffix = Ulid::new().to_string().to_lowercase();
    let mut name = format!("{prefix}_{suffix}");
    name.truncate(64);
    name
}

/// Lexeme form for a seeded word, unique across the test run.
pub fn unique_lexeme(prefix: &str) -> String {
    format!("{}{}", prefix, Ulid::new().to_string().to_lowercase())
}
