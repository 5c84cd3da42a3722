//! VaaS Engine: pattern library, classifier, and confidence scorer
//!
//! The deterministic heart of the service. Everything in this crate is
//! a total, pure function over the submission text: same input, same
//! verdict, no I/O, no shared state.
//!
//! ```
//! use vaas_core::{IdeaSubmission, RevenueModel, Verdict};
//! use vaas_engine::score;
//!
//! let submission = IdeaSubmission::new(
//!     "A HIPAA compliance monitoring dashboard for small dental clinics",
//!     Some("Office managers at 1-10 seat dental practices".to_string()),
//!     Some(RevenueModel::Subscription),
//! );
//! let result = score(&submission);
//! assert!(result.confidence >= 5 && result.confidence <= 95);
//! assert_eq!(result.patterns_matched, result.risks.len() + result.strengths.len());
//! ```

pub mod classify;
pub mod patterns;
pub mod score;

pub use classify::{classify, FALLBACK_CATEGORY, FALLBACK_ECOSYSTEM};
pub use patterns::{FailurePattern, MatchedRisk, StrengthIndicator};
pub use score::score;
