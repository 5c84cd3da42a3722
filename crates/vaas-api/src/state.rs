//! Shared application state

use std::sync::Arc;

use vaas_core::{
    DebateTrigger, InMemorySubmissionStore, InMemorySubscriberStore, SubmissionStore,
    SubscriberStore, VaasError,
};
use vaas_gate::{QuotaTracker, RateLimiter};
use vaas_guardian::GuardianClient;

use crate::config::Config;
use crate::metrics::ApiMetrics;

/// Everything a handler needs, behind cheap clones
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rate: Arc<RateLimiter>,
    pub quota: Arc<QuotaTracker>,
    pub subscribers: Arc<dyn SubscriberStore>,
    pub submissions: Arc<dyn SubmissionStore>,
    pub trigger: Arc<dyn DebateTrigger>,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    /// Default wiring: in-memory stores plus the real orchestrator client
    pub fn from_config(config: Config) -> Result<Self, VaasError> {
        let trigger = GuardianClient::new(
            config.orchestrator_url.clone(),
            config.orchestrator_secret.clone(),
        )?;
        let metrics = ApiMetrics::new().map_err(|err| VaasError::Config(err.to_string()))?;
        Ok(Self {
            rate: Arc::new(RateLimiter::per_hour(config.validate_limit)),
            quota: Arc::new(QuotaTracker::new()),
            subscribers: Arc::new(InMemorySubscriberStore::new()),
            submissions: Arc::new(InMemorySubmissionStore::new()),
            trigger: Arc::new(trigger),
            metrics: Arc::new(metrics),
            config: Arc::new(config),
        })
    }
}
