//! Environment variable parsing utilities
//!
//! Small helpers for reading typed values from the process environment
//! without unwrap() calls.

use std::str::FromStr;

/// Parse an environment variable with a default fallback
///
/// # Example
/// ```ignore
/// let max: u32 = parse_env_with_default("DB_MAX_CONNECTIONS", 10);
/// ```
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

/// Parse an environment variable, returning None if missing, empty or invalid
pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| v.trim().parse().ok())
}

/// Read the first non-empty variable among `keys`
///
/// Used for settings that historically shipped under more than one name
/// (e.g. `TRUSTED_CONNECTION` and `Trusted_Connection`).
pub fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|v| !v.trim().is_empty())
}

/// Read a required, non-empty environment variable
pub fn require_env(key: &str) -> Result<String, String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("{} environment variable not set", key))
}

/// Interpret common boolean spellings ("yes", "true", "1", "on")
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_parse_env_with_default() {
        let result: u32 = parse_env_with_default("DB_POOL_NONEXISTENT_VAR", 42);
        assert_eq!(result, 42);

        std::env::set_var("DB_POOL_TEST_PORT", "8080");
        let result: u16 = parse_env_with_default("DB_POOL_TEST_PORT", 3000);
        assert_eq!(result, 8080);
        std::env::remove_var("DB_POOL_TEST_PORT");
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_env_optional_rejects_garbage() {
        std::env::set_var("DB_POOL_TEST_OPT", "not-a-number");
        assert_eq!(parse_env_optional::<u32>("DB_POOL_TEST_OPT"), None);
        std::env::remove_var("DB_POOL_TEST_OPT");
    }

    #[test]
    #[serial_test::serial]
    fn test_first_env_prefers_earlier_keys() {
        std::env::set_var("DB_POOL_TEST_A", "first");
        std::env::set_var("DB_POOL_TEST_B", "second");
        assert_eq!(
            first_env(&["DB_POOL_TEST_A", "DB_POOL_TEST_B"]).as_deref(),
            Some("first")
        );

        std::env::set_var("DB_POOL_TEST_A", "");
        assert_eq!(
            first_env(&["DB_POOL_TEST_A", "DB_POOL_TEST_B"]).as_deref(),
            Some("second")
        );

        std::env::remove_var("DB_POOL_TEST_A");
        std::env::remove_var("DB_POOL_TEST_B");
    }

    #[test]
    #[serial_test::serial]
    fn test_require_env() {
        assert!(require_env("DB_POOL_NONEXISTENT_VAR").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("yes"));
        assert!(parse_flag("True"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("no"));
        assert!(!parse_flag(""));
    }
}
