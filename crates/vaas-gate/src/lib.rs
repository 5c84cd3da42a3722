//! VaaS Gate: rate limiting, subscriber quotas, and deep-analysis eligibility
//!
//! Two independent mechanisms composed in front of the scorer:
//!
//! - an anonymous fixed-window rate limit keyed by client IP, which
//!   rejects a request outright, and
//! - a subscriber quota (durable monthly cap + in-process daily window)
//!   that never blocks the instant score, only the Guardian trigger.
//!
//! All window state is best-effort, in-memory, and scoped to one
//! instance's lifetime. The billing record remains the durable source
//! of truth for monthly caps.

pub mod eligibility;
pub mod quota;
pub mod rate;

pub use eligibility::{run_deep_analysis, DeepAnalysisOutcome, LimitScope};
pub use quota::{QuotaAdmission, QuotaTracker};
pub use rate::{now_ms, RateDecision, RateLimiter};
