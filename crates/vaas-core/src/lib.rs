//! VaaS Core: data model, unified error model, and collaborator seams
//!
//! Shared types for the idea validation pipeline. The scoring engine,
//! the gate, and the API crate all speak these types; the store traits
//! are the narrow seams behind which durable backends can be swapped in.

pub mod error;
pub mod result;
pub mod stores;
pub mod submission;
pub mod subscriber;

pub use error::VaasError;
pub use result::{ScoreResult, Verdict, MAX_CONFIDENCE, MIN_CONFIDENCE};
pub use stores::{
    DebateRequest, DebateTrigger, InMemorySubmissionStore, InMemorySubscriberStore,
    SubmissionRecord, SubmissionStore, SubscriberStore, TriggerReceipt,
};
pub use submission::{IdeaSubmission, RevenueModel};
pub use subscriber::{Plan, SubscriberAccount, SubscriptionStatus};

/// Engine version reported by the health endpoint
pub const VAAS_VERSION: &str = "1.0.0";
