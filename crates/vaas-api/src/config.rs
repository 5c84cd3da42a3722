//! Environment-driven configuration
//!
//! Everything has a sane default so the service boots with no env at
//! all; production sets the orchestrator secret and a real salt.

/// Anonymous rate limit for the validate endpoint
pub const VALIDATE_LIMIT_PER_HOUR: u32 = 5;

/// How often expired rate/quota windows are swept, in seconds
pub const SWEEP_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address
    pub addr: String,
    /// Base URL of the Guardian orchestrator
    pub orchestrator_url: String,
    /// Shared secret for the orchestrator's async challenge endpoint
    pub orchestrator_secret: String,
    /// Salt for anonymous request fingerprints
    pub fingerprint_salt: String,
    /// Validate-endpoint requests per hour per IP
    pub validate_limit: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            addr: env_or("VAAS_ADDR", "0.0.0.0:8080"),
            orchestrator_url: env_or("ORCHESTRATOR_URL", "https://projectgreenbelt.com"),
            orchestrator_secret: env_or("ORCHESTRATOR_SECRET", ""),
            fingerprint_salt: env_or("FINGERPRINT_SALT", "vaas-dev-salt"),
            validate_limit: std::env::var("VAAS_VALIDATE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(VALIDATE_LIMIT_PER_HOUR),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            orchestrator_url: "https://projectgreenbelt.com".to_string(),
            orchestrator_secret: String::new(),
            fingerprint_salt: "vaas-dev-salt".to_string(),
            validate_limit: VALIDATE_LIMIT_PER_HOUR,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
