//! Anonymous request fingerprinting
//!
//! Salted hash of client IP + user agent, used for deduplication and
//! analytics when no email is supplied. Raw PII never reaches the
//! submissions log.

use sha2::{Digest, Sha256};

/// Hex chars kept from the digest
const FINGERPRINT_CHARS: usize = 16;

/// Compute the anonymized fingerprint for one request
pub fn fingerprint(salt: &str, ip: &str, user_agent: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(ip.as_bytes());
    hasher.update(b":");
    hasher.update(user_agent.as_bytes());
    let digest = hasher.finalize();
    let mut hexed = hex::encode(digest);
    hexed.truncate(FINGERPRINT_CHARS);
    hexed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = fingerprint("salt", "1.2.3.4", "curl/8.0");
        let b = fingerprint("salt", "1.2.3.4", "curl/8.0");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_fingerprint_varies_with_inputs() {
        let base = fingerprint("salt", "1.2.3.4", "curl/8.0");
        assert_ne!(base, fingerprint("salt", "1.2.3.5", "curl/8.0"));
        assert_ne!(base, fingerprint("salt", "1.2.3.4", "firefox"));
        assert_ne!(base, fingerprint("pepper", "1.2.3.4", "curl/8.0"));
    }

    #[test]
    fn test_fingerprint_contains_no_raw_ip() {
        let fp = fingerprint("salt", "203.0.113.77", "curl/8.0");
        assert!(!fp.contains("203.0.113.77"));
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
