//! Non-blocking submission capture
//!
//! The recorder runs after the synchronous response value is computed,
//! inside its own error boundary. Nothing here can change the response
//! shown to the user.

use std::sync::Arc;

use vaas_core::{IdeaSubmission, ScoreResult, SubmissionRecord, SubmissionStore};

/// Stored idea text is truncated to this many chars
pub const CAPTURE_IDEA_CHARS: usize = 2000;
/// Stored audience text is truncated to this many chars
pub const CAPTURE_AUDIENCE_CHARS: usize = 500;

/// Assemble the capture record for one scored submission
pub fn build_record(
    submission: &IdeaSubmission,
    score: &ScoreResult,
    fingerprint: &str,
    email: Option<&str>,
) -> SubmissionRecord {
    let mut record = SubmissionRecord::from_score(score, fingerprint);
    record.idea = truncate(submission.idea.trim(), CAPTURE_IDEA_CHARS);
    record.audience = submission
        .audience
        .as_deref()
        .map(|a| truncate(a.trim(), CAPTURE_AUDIENCE_CHARS))
        .filter(|a| !a.is_empty());
    record.revenue_model = submission.revenue_model.map(|m| m.as_str().to_string());
    record.email = email.map(str::to_string);
    record
}

/// Fire-and-forget append; failures are logged, never surfaced
pub fn spawn_capture(store: Arc<dyn SubmissionStore>, record: SubmissionRecord) {
    tokio::spawn(async move {
        if let Err(err) = store.append(record).await {
            tracing::warn!(error = %err, "submission capture failed");
        }
    });
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
