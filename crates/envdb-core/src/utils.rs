//! Display helpers: secret masking and truncation.

/// Key fragments that mark a value as secret.
const SECRET_MARKERS: &[&str] = &["PASSWORD", "SECRET", "TOKEN", "KEY"];

/// Whether a key's value should be hidden in listings.
pub fn is_secret_key(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|m| upper.contains(m))
}

/// Mask a secret, keeping the last 4 characters when the value is long enough.
pub fn mask_value(value: &str) -> String {
    let len = value.chars().count();
    if len <= 8 {
        return "*".repeat(len.max(4));
    }
    let tail: String = value.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), tail)
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_keys() {
        assert!(is_secret_key("DB_PASSWORD"));
        assert!(is_secret_key("app_secret"));
        assert!(is_secret_key("API_KEY"));
        assert!(is_secret_key("GITHUB_TOKEN"));
        assert!(!is_secret_key("DB_DATABASE"));
        assert!(!is_secret_key("APP_PORT"));
    }

    #[test]
    fn test_mask_short_value() {
        assert_eq!(mask_value("abc"), "****");
        assert_eq!(mask_value(""), "****");
        assert_eq!(mask_value("12345678"), "********");
    }

    #[test]
    fn test_mask_long_value_keeps_tail() {
        assert_eq!(mask_value("supersecret99"), "*********et99");
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate_string("hello world, this is a long string", 15);
        assert_eq!(result, "hello world,...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate_string("こんにちは世界です", 5), "こん...");
    }
}
