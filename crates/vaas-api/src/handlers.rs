//! HTTP handlers
//!
//! Only two conditions change the HTTP status of a validate request:
//! bad input (400) and the rate gate (429). Everything past the scorer
//! degrades to a partial 200 body instead of failing the request.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use vaas_core::{IdeaSubmission, VaasError, VAAS_VERSION};
use vaas_engine::patterns::PATTERN_LIBRARY_VERSION;
use vaas_flywheel::{build_record, fingerprint, spawn_capture};
use vaas_gate::DeepAnalysisOutcome;

use crate::identity;
use crate::response::{BuildCta, DeepValidation, ValidateResponse};
use crate::state::AppState;

const RATE_LIMIT_MESSAGE: &str = "Rate limited. Free tier: 5 validations/hour.";
const UPGRADE_HINT: &str = "Upgrade to Pro for 30 deep validations per month.";

/// POST /v1/validate
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<IdeaSubmission>, JsonRejection>,
) -> Response {
    let ip = identity::client_ip(&headers);
    let decision = state.rate.check(&ip);
    if !decision.allowed {
        state.metrics.rate_limited.inc();
        let err = VaasError::RateLimited(RATE_LIMIT_MESSAGE.to_string());
        tracing::debug!(ip = %ip, error = %err, "validate rejected");
        let retry_after_secs = (decision.retry_after_ms + 999) / 1000;
        return (
            status_for(&err),
            Json(json!({
                "error": err.message(),
                "upgrade": UPGRADE_HINT,
                "retryAfterSeconds": retry_after_secs,
            })),
        )
            .into_response();
    }

    let Json(submission) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "malformed validate body");
            return error_response(&VaasError::Validation("Invalid JSON body".to_string()));
        }
    };

    if let Err(err) = submission.validate() {
        return error_response(&err);
    }

    let score = vaas_engine::score(&submission);
    state.metrics.validations.inc();

    let email = identity::session_email(&headers);
    let outcome = vaas_gate::run_deep_analysis(
        state.subscribers.as_ref(),
        state.trigger.as_ref(),
        &state.quota,
        email.as_deref(),
        &submission,
        Utc::now(),
    )
    .await;
    match &outcome {
        DeepAnalysisOutcome::TriggerSent { .. } => state.metrics.triggers_sent.inc(),
        DeepAnalysisOutcome::RolledBack => state.metrics.rollbacks.inc(),
        _ => {}
    }

    // Capture runs after the response value exists; it cannot fail the
    // request or delay it
    let print = fingerprint(
        &state.config.fingerprint_salt,
        &ip,
        &identity::user_agent(&headers),
    );
    let record = build_record(&submission, &score, &print, email.as_deref());
    spawn_capture(state.submissions.clone(), record);

    let body = ValidateResponse {
        build_cta: BuildCta::for_confidence(score.confidence),
        deep_validation: DeepValidation::from_outcome(&outcome),
        validated_at: Utc::now().to_rfc3339(),
        score,
    };

    let mut response = (StatusCode::OK, Json(body)).into_response();
    response
        .headers_mut()
        .insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    response
}

/// GET /v1/health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": VAAS_VERSION,
        "patterns": PATTERN_LIBRARY_VERSION,
    }))
}

/// GET /v1/trends
pub async fn trends(State(state): State<AppState>) -> Json<vaas_flywheel::TrendsSummary> {
    Json(vaas_flywheel::trends_summary(state.submissions.as_ref()).await)
}

/// GET /v1/ideas
pub async fn ideas(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ideas = vaas_flywheel::showcase(state.submissions.as_ref()).await;
    Json(json!({ "count": ideas.len(), "ideas": ideas }))
}

/// GET /v1/metrics
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "metrics encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response()
        }
    }
}

fn status_for(err: &VaasError) -> StatusCode {
    match err {
        VaasError::Validation(_) => StatusCode::BAD_REQUEST,
        VaasError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &VaasError) -> Response {
    (status_for(err), Json(json!({ "error": err.message() }))).into_response()
}
