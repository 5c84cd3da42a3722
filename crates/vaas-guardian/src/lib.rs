//! VaaS Guardian: client for the external debate orchestrator
//!
//! The orchestrator runs the long adversarial debate and emails results
//! out-of-band; this client only dispatches the job. The whole call is
//! time-boxed and every failure mode collapses to `None` so nothing
//! here can take a validation request down. Dispatch is at-least-once:
//! a timed-out call may still complete remotely, and duplicate external
//! jobs are accepted.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vaas_core::{DebateRequest, DebateTrigger, TriggerReceipt, VaasError};

/// Upper bound on the whole trigger call
pub const TRIGGER_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the async debate endpoint on the orchestrator
const CHALLENGE_PATH: &str = "/challenge/async";

/// Wire payload: the debate request plus the shared secret
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChallengePayload<'a> {
    secret: &'a str,
    #[serde(flatten)]
    request: &'a DebateRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeReply {
    job_id: String,
}

/// HTTP client for the Guardian orchestrator
#[derive(Clone)]
pub struct GuardianClient {
    base_url: String,
    secret: String,
    http: reqwest::Client,
}

impl GuardianClient {
    pub fn new(
        base_url: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, VaasError> {
        let http = reqwest::Client::builder()
            .timeout(TRIGGER_TIMEOUT)
            .build()
            .map_err(|err| VaasError::Config(err.to_string()))?;
        Ok(Self {
            base_url: trim_trailing_slash(base_url.into()),
            secret: secret.into(),
            http,
        })
    }

    fn challenge_url(&self) -> String {
        format!("{}{}", self.base_url, CHALLENGE_PATH)
    }
}

fn trim_trailing_slash(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

#[async_trait]
impl DebateTrigger for GuardianClient {
    async fn trigger(&self, request: &DebateRequest) -> Option<TriggerReceipt> {
        let payload = ChallengePayload {
            secret: &self.secret,
            request,
        };
        let response = match self.http.post(self.challenge_url()).json(&payload).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "guardian trigger transport failure");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "guardian trigger rejected");
            return None;
        }

        match response.json::<ChallengeReply>().await {
            Ok(reply) => Some(TriggerReceipt {
                job_id: reply.job_id,
            }),
            Err(err) => {
                tracing::warn!(error = %err, "guardian trigger reply malformed");
                None
            }
        }
    }
}
