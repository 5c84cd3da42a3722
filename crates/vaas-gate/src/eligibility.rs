//! Deep-analysis eligibility and the optimistic usage increment
//!
//! Per paid request the state machine is:
//!
//! ```text
//! NOT_ELIGIBLE (free / unknown / inactive)
//! ELIGIBLE (paid, under both caps) → increment usage →
//!     TRIGGER_SENT (orchestrator acknowledged)
//!   | ROLLED_BACK  (trigger failed; usage decremented back)
//! LIMIT_REACHED (either cap hit; instant score unaffected)
//! ```
//!
//! Failure policy: a billing-store read error degrades the request to
//! free tier (fail closed on privilege, fail open on the instant
//! score). A failed trigger is compensated with an inverse write so a
//! triggered-but-failed debate leaves `validations_used` untouched.

use chrono::{DateTime, Utc};
use vaas_core::{DebateRequest, DebateTrigger, IdeaSubmission, SubscriberStore, VaasError};

use crate::quota::{QuotaAdmission, QuotaTracker};

/// Max chars of the idea used as the debate job name
const JOB_NAME_CHARS: usize = 80;

/// Which cap stopped an otherwise eligible request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitScope {
    Daily,
    Monthly,
}

/// Terminal state of the deep-analysis attempt for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepAnalysisOutcome {
    /// Free tier, unknown subscriber, inactive subscription, or a
    /// billing lookup failure
    NotEligible,
    /// Paid and active, but over the daily or monthly cap
    LimitReached { scope: LimitScope },
    /// Orchestrator accepted the job; usage increment committed
    TriggerSent { job_id: String },
    /// Trigger failed or timed out; usage increment compensated
    RolledBack,
}

impl DeepAnalysisOutcome {
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, DeepAnalysisOutcome::TriggerSent { .. })
    }
}

/// Run the full eligibility check and, when admitted, the optimistic
/// increment + trigger + conditional rollback sequence.
pub async fn run_deep_analysis(
    subscribers: &dyn SubscriberStore,
    trigger: &dyn DebateTrigger,
    quota: &QuotaTracker,
    email: Option<&str>,
    submission: &IdeaSubmission,
    now: DateTime<Utc>,
) -> DeepAnalysisOutcome {
    let Some(email) = email else {
        return DeepAnalysisOutcome::NotEligible;
    };

    let account = match subscribers.get_active_subscriber(email).await {
        Ok(Some(account)) => account,
        Ok(None) => return DeepAnalysisOutcome::NotEligible,
        Err(err) => {
            // Degrade to free tier; never grant quota on a store error
            tracing::warn!(error = %err, "billing lookup failed, treating as free tier");
            return DeepAnalysisOutcome::NotEligible;
        }
    };
    if !account.plan.is_paid() || !account.is_active() {
        return DeepAnalysisOutcome::NotEligible;
    }

    match quota.admit(&account, now) {
        QuotaAdmission::MonthlyExhausted { used, cap } => {
            let err = VaasError::QuotaExceeded(format!("monthly cap {used}/{cap}"));
            tracing::debug!(email, error = %err, "deep analysis withheld");
            return DeepAnalysisOutcome::LimitReached {
                scope: LimitScope::Monthly,
            };
        }
        QuotaAdmission::DailyExhausted { cap } => {
            let err = VaasError::QuotaExceeded(format!("daily cap {cap}"));
            tracing::debug!(email, error = %err, "deep analysis withheld");
            return DeepAnalysisOutcome::LimitReached {
                scope: LimitScope::Daily,
            };
        }
        QuotaAdmission::Admitted { .. } => {}
    }

    // Optimistic increment before the risky outbound call
    if let Err(err) = subscribers.increment_usage(email, 1).await {
        tracing::warn!(error = %err, "usage increment failed, withholding trigger");
        return DeepAnalysisOutcome::NotEligible;
    }

    let request = debate_request(submission, email, &account.plan.to_string());
    match trigger.trigger(&request).await {
        Some(receipt) => DeepAnalysisOutcome::TriggerSent {
            job_id: receipt.job_id,
        },
        None => {
            // Compensating write; best-effort, the billing record is
            // reconciled out-of-band if even this fails
            if let Err(err) = subscribers.increment_usage(email, -1).await {
                tracing::error!(error = %err, "usage rollback failed");
            }
            DeepAnalysisOutcome::RolledBack
        }
    }
}

fn debate_request(submission: &IdeaSubmission, email: &str, tier: &str) -> DebateRequest {
    let name: String = submission.idea.trim().chars().take(JOB_NAME_CHARS).collect();
    DebateRequest {
        name,
        description: submission.idea.trim().to_string(),
        target_market: submission.audience_text().to_string(),
        notify_email: email.to_string(),
        tier: tier.to_string(),
    }
}
