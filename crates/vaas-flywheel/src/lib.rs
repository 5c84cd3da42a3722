//! VaaS Flywheel: best-effort submission capture and its read side
//!
//! Every scoring result is appended to the submissions log for market
//! analytics. The capture is dispatched after the response value exists
//! and is never awaited by the response path; a store failure is logged
//! and swallowed. The trends module aggregates the same log for the
//! public analytics endpoints.

pub mod fingerprint;
pub mod recorder;
pub mod trends;

pub use fingerprint::fingerprint;
pub use recorder::{build_record, spawn_capture, CAPTURE_AUDIENCE_CHARS, CAPTURE_IDEA_CHARS};
pub use trends::{showcase, trends_summary, IdeaDigest, TrendsSummary};
