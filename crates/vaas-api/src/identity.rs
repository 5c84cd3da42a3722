//! Request identity extraction
//!
//! The client IP keys the anonymous rate limit; the session email, set
//! by the authenticated-session layer in front of this service, keys
//! the subscriber quota. Both degrade gracefully when absent.

use axum::http::HeaderMap;

/// First hop of `x-forwarded-for`, or `unknown`
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Session-bound subscriber email, when the auth layer attached one
pub fn session_email(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-session-email")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| v.contains('@'))
        .map(|v| v.to_lowercase())
}

/// User agent string, empty when absent
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_falls_back_to_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        assert_eq!(client_ip(&headers), "unknown");
    }

    #[test]
    fn test_session_email_requires_at_sign() {
        let mut headers = HeaderMap::new();
        headers.insert("x-session-email", HeaderValue::from_static("not-an-email"));
        assert_eq!(session_email(&headers), None);

        headers.insert(
            "x-session-email",
            HeaderValue::from_static("Founder@Example.com"),
        );
        assert_eq!(
            session_email(&headers),
            Some("founder@example.com".to_string())
        );
    }
}
