//! Subscriber quota tracking
//!
//! Two nested caps per paid subscriber: a monthly cap read from the
//! durable billing record (resets with the billing period) and a daily
//! cap tracked in an in-process fixed window keyed by `email:plan`.
//! Exhausting either cap withholds the Guardian trigger only; the
//! instant heuristic score is never blocked here.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use vaas_core::SubscriberAccount;

use crate::rate::DAY_MS;

#[derive(Debug, Clone, Copy)]
struct DayWindow {
    count: u32,
    reset_at: i64,
}

/// Result of a quota admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaAdmission {
    /// Under both caps; one daily slot has been consumed
    Admitted {
        monthly_used: u32,
        monthly_cap: u32,
        daily_remaining: u32,
    },
    /// Monthly billing-period cap reached
    MonthlyExhausted { used: u32, cap: u32 },
    /// In-process daily window cap reached
    DailyExhausted { cap: u32 },
}

impl QuotaAdmission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, QuotaAdmission::Admitted { .. })
    }
}

/// In-process daily window over the durable monthly counter
#[derive(Default)]
pub struct QuotaTracker {
    daily: Mutex<HashMap<String, DayWindow>>,
}

impl QuotaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check both caps for `account` at `now`, consuming one daily slot
    /// when admitted. The monthly counter itself is incremented by the
    /// caller only after admission (optimistic increment, see the
    /// eligibility module).
    pub fn admit(&self, account: &SubscriberAccount, now: DateTime<Utc>) -> QuotaAdmission {
        let monthly_cap = account.plan.monthly_cap();
        let monthly_used = account.usage_at(now);
        if monthly_used >= monthly_cap {
            return QuotaAdmission::MonthlyExhausted {
                used: monthly_used,
                cap: monthly_cap,
            };
        }

        let daily_cap = account.plan.daily_cap();
        let key = account.quota_key();
        let now_ms = now.timestamp_millis();

        let mut daily = self.daily.lock().expect("quota window map poisoned");
        let window = daily.get(&key).copied();
        let consumed = match window {
            Some(w) if now_ms <= w.reset_at => {
                if w.count >= daily_cap {
                    return QuotaAdmission::DailyExhausted { cap: daily_cap };
                }
                let count = w.count + 1;
                daily.insert(
                    key,
                    DayWindow {
                        count,
                        reset_at: w.reset_at,
                    },
                );
                count
            }
            _ => {
                daily.insert(
                    key,
                    DayWindow {
                        count: 1,
                        reset_at: now_ms + DAY_MS,
                    },
                );
                1
            }
        };

        QuotaAdmission::Admitted {
            monthly_used,
            monthly_cap,
            daily_remaining: daily_cap.saturating_sub(consumed),
        }
    }

    /// Drop expired daily windows
    pub fn sweep_at(&self, now_ms: i64) {
        let mut daily = self.daily.lock().expect("quota window map poisoned");
        daily.retain(|_, w| now_ms <= w.reset_at);
    }

    pub fn sweep(&self) {
        self.sweep_at(crate::rate::now_ms())
    }
}
