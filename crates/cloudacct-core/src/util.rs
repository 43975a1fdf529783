//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Current Unix timestamp in milliseconds.
pub fn unix_timestamp_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_blank_account_names() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some(" \t\n ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_keeps_inner_whitespace() {
        assert_eq!(
            normalize_text_option(Some(" john doe@cloud.example.com\n".to_string())),
            Some("john doe@cloud.example.com".to_string())
        );
    }

    #[test]
    fn is_http_url_accepts_server_urls() {
        assert!(is_http_url("http://192.168.1.10:8080"));
        assert!(is_http_url("https://cloud.example.com/owncloud"));
        assert!(!is_http_url("webdav://cloud.example.com"));
        assert!(!is_http_url("alice@cloud.example.com"));
    }

    #[test]
    fn timestamps_are_unix_millis() {
        let before = chrono::Utc::now().timestamp_millis();
        let now = unix_timestamp_millis_now();
        assert!(now >= before);
        assert!(now > 1_600_000_000_000);
    }
}
