//! Prometheus registry for the API surface
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    pub validations: IntCounter,
    pub rate_limited: IntCounter,
    pub triggers_sent: IntCounter,
    pub rollbacks: IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let validations =
            IntCounter::new("vaas_validations_total", "Instant validations served")?;
        let rate_limited =
            IntCounter::new("vaas_rate_limited_total", "Requests rejected by the rate gate")?;
        let triggers_sent =
            IntCounter::new("vaas_triggers_sent_total", "Guardian debates dispatched")?;
        let rollbacks = IntCounter::new(
            "vaas_trigger_rollbacks_total",
            "Usage increments rolled back after trigger failures",
        )?;
        registry.register(Box::new(validations.clone()))?;
        registry.register(Box::new(rate_limited.clone()))?;
        registry.register(Box::new(triggers_sent.clone()))?;
        registry.register(Box::new(rollbacks.clone()))?;
        Ok(Self {
            registry,
            validations,
            rate_limited,
            triggers_sent,
            rollbacks,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
