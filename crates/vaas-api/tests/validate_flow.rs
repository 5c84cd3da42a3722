//! End-to-end round-trips through the router with fixture stores

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;
use vaas_api::metrics::ApiMetrics;
use vaas_api::{AppState, Config};
use vaas_core::{
    DebateRequest, DebateTrigger, InMemorySubmissionStore, InMemorySubscriberStore, Plan,
    SubscriberAccount, SubscriptionStatus, TriggerReceipt,
};
use vaas_gate::{QuotaTracker, RateLimiter};

struct FixedTrigger {
    receipt: Option<TriggerReceipt>,
}

impl FixedTrigger {
    fn ok(job_id: &str) -> Self {
        Self {
            receipt: Some(TriggerReceipt {
                job_id: job_id.to_string(),
            }),
        }
    }

    fn failing() -> Self {
        Self { receipt: None }
    }
}

#[async_trait]
impl DebateTrigger for FixedTrigger {
    async fn trigger(&self, _request: &DebateRequest) -> Option<TriggerReceipt> {
        self.receipt.clone()
    }
}

struct Fixture {
    app: Router,
    subscribers: Arc<InMemorySubscriberStore>,
    submissions: Arc<InMemorySubmissionStore>,
}

fn fixture(trigger: Arc<dyn DebateTrigger>) -> Fixture {
    let subscribers = Arc::new(InMemorySubscriberStore::new());
    let submissions = Arc::new(InMemorySubmissionStore::new());
    let state = AppState {
        config: Arc::new(Config::default()),
        rate: Arc::new(RateLimiter::per_hour(5)),
        quota: Arc::new(QuotaTracker::new()),
        subscribers: subscribers.clone(),
        submissions: submissions.clone(),
        trigger,
        metrics: Arc::new(ApiMetrics::new().unwrap()),
    };
    Fixture {
        app: vaas_api::create_app(state),
        subscribers,
        submissions,
    }
}

fn pro_subscriber(used: u32) -> SubscriberAccount {
    SubscriberAccount {
        email: "founder@example.com".to_string(),
        plan: Plan::Pro,
        status: SubscriptionStatus::Active,
        validations_used: used,
        current_period_end: Utc::now() + Duration::days(10),
    }
}

fn validate_request(body: &str, ip: &str, email: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/validate")
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip);
    if let Some(email) = email {
        builder = builder.header("x-session-email", email);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const IDEA_BODY: &str =
    r#"{"idea":"A todo app for remote teams","audience":"remote startups","model":"one_time"}"#;

#[tokio::test]
async fn test_validate_returns_score_and_remaining_header() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));
    let response = f
        .app
        .oneshot(validate_request(IDEA_BODY, "203.0.113.1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-ratelimit-remaining").unwrap(),
        "4"
    );

    let body = body_json(response).await;
    assert!(body["confidence"].is_u64());
    assert!(body["verdict"].is_string());
    assert!(body["validatedAt"].is_string());
    assert!(body["risks"].is_array());
    assert!(body["patternsMatched"].is_u64());
    // Anonymous requests never carry a deep-validation block
    assert!(body.get("deepValidation").is_none());
}

#[tokio::test]
async fn test_short_idea_rejected_with_400() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));
    let response = f
        .app
        .oneshot(validate_request(
            r#"{"idea":"too short"}"#,
            "203.0.113.1",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Please describe your idea in at least 10 characters."
    );
}

#[tokio::test]
async fn test_malformed_json_rejected_with_400() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));
    let response = f
        .app
        .oneshot(validate_request("{not json", "203.0.113.1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn test_sixth_request_from_same_ip_rate_limited() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));
    for _ in 0..5 {
        let response = f
            .app
            .clone()
            .oneshot(validate_request(IDEA_BODY, "203.0.113.7", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let sixth = f
        .app
        .clone()
        .oneshot(validate_request(IDEA_BODY, "203.0.113.7", None))
        .await
        .unwrap();
    assert_eq!(sixth.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(sixth).await;
    assert_eq!(body["error"], "Rate limited. Free tier: 5 validations/hour.");
    assert!(body["upgrade"].is_string());
    assert!(body["retryAfterSeconds"].as_i64().unwrap() > 0);

    // Another IP is unaffected
    let other = f
        .app
        .oneshot(validate_request(IDEA_BODY, "203.0.113.8", None))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_subscriber_trigger_commits_usage() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-42")));
    f.subscribers.upsert(pro_subscriber(3));

    let response = f
        .app
        .oneshot(validate_request(
            IDEA_BODY,
            "203.0.113.1",
            Some("founder@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deepValidation"]["status"], "running");
    assert_eq!(body["deepValidation"]["jobId"], "job-42");
    assert_eq!(
        f.subscribers
            .snapshot("founder@example.com")
            .unwrap()
            .validations_used,
        4
    );
}

#[tokio::test]
async fn test_failed_trigger_reports_error_and_rolls_back() {
    let f = fixture(Arc::new(FixedTrigger::failing()));
    f.subscribers.upsert(pro_subscriber(29));

    let response = f
        .app
        .oneshot(validate_request(
            IDEA_BODY,
            "203.0.113.1",
            Some("founder@example.com"),
        ))
        .await
        .unwrap();

    // The instant score still comes back with a 200
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deepValidation"]["status"], "error");
    assert!(body["deepValidation"].get("jobId").is_none());
    assert_eq!(
        f.subscribers
            .snapshot("founder@example.com")
            .unwrap()
            .validations_used,
        29
    );
}

#[tokio::test]
async fn test_exhausted_monthly_quota_reports_limit_reached() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));
    f.subscribers.upsert(pro_subscriber(30));

    let response = f
        .app
        .oneshot(validate_request(
            IDEA_BODY,
            "203.0.113.1",
            Some("founder@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deepValidation"]["status"], "limit_reached");
}

#[tokio::test]
async fn test_submission_captured_after_response() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));
    let response = f
        .app
        .oneshot(validate_request(IDEA_BODY, "203.0.113.1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for _ in 0..100 {
        if f.submissions.len() == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(f.submissions.len(), 1);
    let records = f.submissions.records();
    assert_eq!(records[0].source, "web");
    assert_eq!(records[0].fingerprint.len(), 16);
    assert!(records[0].email.is_none());
}

#[tokio::test]
async fn test_health_reports_version() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));
    let response = f
        .app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], vaas_core::VAAS_VERSION);
    assert!(body["patterns"].is_string());
}

const STRONG_IDEA_BODY: &str = r#"{"idea":"A HIPAA compliance monitoring dashboard for small dental clinics","audience":"Office managers at dental practices","model":"subscription"}"#;

async fn get_json(app: &Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_trends_and_ideas_reflect_captured_submissions() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));

    for ip in ["203.0.113.1", "203.0.113.2"] {
        let response = f
            .app
            .clone()
            .oneshot(validate_request(STRONG_IDEA_BODY, ip, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    for _ in 0..100 {
        if f.submissions.len() == 2 {
            break;
        }
        tokio::task::yield_now().await;
    }

    let trends = get_json(&f.app, "/v1/trends").await;
    assert_eq!(trends["totalSubmissions"], 2);
    assert_eq!(trends["topCategories"][0]["category"], "healthtech");
    assert!(trends["avgConfidence"].as_u64().unwrap() >= 60);

    let ideas = get_json(&f.app, "/v1/ideas").await;
    assert_eq!(ideas["count"], 2);
    assert_eq!(ideas["ideas"][0]["category"], "healthtech");
    // Showcase entries are anonymized
    let raw = ideas.to_string();
    assert!(!raw.contains("fingerprint"));
    assert!(!raw.contains("email"));
}

#[tokio::test]
async fn test_trends_empty_before_any_submission() {
    let f = fixture(Arc::new(FixedTrigger::ok("job-1")));
    let trends = get_json(&f.app, "/v1/trends").await;
    assert_eq!(trends["totalSubmissions"], 0);
    assert_eq!(trends["recentHighScoring"].as_array().unwrap().len(), 0);

    let ideas = get_json(&f.app, "/v1/ideas").await;
    assert_eq!(ideas["count"], 0);
}
