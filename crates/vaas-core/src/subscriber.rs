//! Subscriber billing types
//!
//! The billing subsystem owns these records; the core reads them and
//! performs one optimistic increment/rollback write per paid request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

impl Plan {
    /// Monthly deep-validation cap, durable in the billing record
    pub fn monthly_cap(&self) -> u32 {
        match self {
            Plan::Free => 0,
            Plan::Pro => 30,
            Plan::Enterprise => 50,
        }
    }

    /// Daily deep-validation cap, tracked in-process
    pub fn daily_cap(&self) -> u32 {
        match self {
            Plan::Free => 0,
            Plan::Pro => 5,
            Plan::Enterprise => 10,
        }
    }

    /// Whether this plan is eligible for the Guardian debate at all
    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Enterprise => "enterprise",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Billing status of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Cancelled,
}

/// One subscriber record as read from the billing store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberAccount {
    pub email: String,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    /// Validations consumed in the current billing period
    pub validations_used: u32,
    /// End of the current billing period; usage resets after this instant
    pub current_period_end: DateTime<Utc>,
}

impl SubscriberAccount {
    /// Only active subscriptions grant deep-validation quota
    pub fn is_active(&self) -> bool {
        matches!(self.status, SubscriptionStatus::Active)
    }

    /// Usage counted against the monthly cap at `now`. A rolled-over
    /// period reads as zero even before the billing store resets it.
    pub fn usage_at(&self, now: DateTime<Utc>) -> u32 {
        if now > self.current_period_end {
            0
        } else {
            self.validations_used
        }
    }

    /// In-process quota key, shared with the daily window
    pub fn quota_key(&self) -> String {
        format!("{}:{}", self.email, self.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn account(used: u32, period_end: DateTime<Utc>) -> SubscriberAccount {
        SubscriberAccount {
            email: "founder@example.com".to_string(),
            plan: Plan::Pro,
            status: SubscriptionStatus::Active,
            validations_used: used,
            current_period_end: period_end,
        }
    }

    #[test]
    fn test_plan_caps() {
        assert_eq!(Plan::Pro.monthly_cap(), 30);
        assert_eq!(Plan::Enterprise.monthly_cap(), 50);
        assert_eq!(Plan::Pro.daily_cap(), 5);
        assert_eq!(Plan::Enterprise.daily_cap(), 10);
        assert!(!Plan::Free.is_paid());
        assert!(Plan::Pro.is_paid());
    }

    #[test]
    fn test_usage_resets_after_period_end() {
        let now = Utc::now();
        let live = account(29, now + Duration::days(3));
        assert_eq!(live.usage_at(now), 29);

        let rolled = account(29, now - Duration::hours(1));
        assert_eq!(rolled.usage_at(now), 0);
    }

    #[test]
    fn test_quota_key_includes_plan() {
        let acct = account(0, Utc::now());
        assert_eq!(acct.quota_key(), "founder@example.com:pro");
    }
}
