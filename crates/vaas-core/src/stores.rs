//! Collaborator seams
//!
//! Narrow async traits for the billing store, the submissions log, and
//! the external debate orchestrator. The in-memory implementations are
//! the default fast path and the test doubles; a durable backend slots
//! in behind the same traits without touching the scorer or the gate.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VaasError;
use crate::result::{ScoreResult, Verdict};
use crate::subscriber::SubscriberAccount;

/// Read/write access to subscriber billing records
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Look up a subscriber by email. `Ok(None)` means no active
    /// subscription; errors are treated as "free tier" by callers.
    async fn get_active_subscriber(
        &self,
        email: &str,
    ) -> Result<Option<SubscriberAccount>, VaasError>;

    /// Adjust the usage counter. Negative deltas are the rollback half
    /// of the optimistic increment and must never underflow past zero.
    async fn increment_usage(&self, email: &str, delta: i32) -> Result<(), VaasError>;
}

/// Submissions log (the flywheel): append on the write side, full read
/// for the aggregate endpoints. Aggregation itself happens above this
/// seam so a durable backend may push it into queries instead.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn append(&self, record: SubmissionRecord) -> Result<(), VaasError>;

    async fn all(&self) -> Result<Vec<SubmissionRecord>, VaasError>;
}

/// One captured scoring result plus request metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub idea: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_model: Option<String>,
    pub confidence: u8,
    pub verdict: Verdict,
    pub risks: Vec<String>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
    pub patterns_matched: usize,
    pub category: String,
    pub ecosystem: String,
    /// Salted hash of IP + user agent; no raw PII
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Pull the scored fields out of a [`ScoreResult`]
    pub fn from_score(score: &ScoreResult, fingerprint: impl Into<String>) -> Self {
        Self {
            idea: String::new(),
            audience: None,
            revenue_model: None,
            confidence: score.confidence,
            verdict: score.verdict,
            risks: score.risks.clone(),
            strengths: score.strengths.clone(),
            recommendations: score.recommendations.clone(),
            patterns_matched: score.patterns_matched,
            category: score.category.clone(),
            ecosystem: score.ecosystem.clone(),
            fingerprint: fingerprint.into(),
            email: None,
            source: "web".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// What the core hands to the orchestrator for one debate job. The
/// shared secret is the trigger implementation's concern, not part of
/// this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateRequest {
    pub name: String,
    pub description: String,
    pub target_market: String,
    pub notify_email: String,
    pub tier: String,
}

/// Acknowledgement from the orchestrator; results arrive out-of-band
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerReceipt {
    pub job_id: String,
}

/// Fire-and-forget dispatch to the external debate orchestrator.
///
/// Implementations must never fail past this boundary: `None` covers
/// timeouts, transport errors, non-2xx statuses, and malformed replies.
#[async_trait]
pub trait DebateTrigger: Send + Sync {
    async fn trigger(&self, request: &DebateRequest) -> Option<TriggerReceipt>;
}

/// Process-local subscriber store
#[derive(Default)]
pub struct InMemorySubscriberStore {
    accounts: Mutex<HashMap<String, SubscriberAccount>>,
}

impl InMemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a subscriber record, replacing any existing one
    pub fn upsert(&self, account: SubscriberAccount) {
        let mut accounts = self.accounts.lock().expect("subscriber store poisoned");
        accounts.insert(account.email.clone(), account);
    }

    /// Read back a record, mostly for assertions in tests
    pub fn snapshot(&self, email: &str) -> Option<SubscriberAccount> {
        let accounts = self.accounts.lock().expect("subscriber store poisoned");
        accounts.get(email).cloned()
    }
}

#[async_trait]
impl SubscriberStore for InMemorySubscriberStore {
    async fn get_active_subscriber(
        &self,
        email: &str,
    ) -> Result<Option<SubscriberAccount>, VaasError> {
        let accounts = self.accounts.lock().expect("subscriber store poisoned");
        Ok(accounts.get(email).cloned())
    }

    async fn increment_usage(&self, email: &str, delta: i32) -> Result<(), VaasError> {
        let mut accounts = self.accounts.lock().expect("subscriber store poisoned");
        let account = accounts
            .get_mut(email)
            .ok_or_else(|| VaasError::Store(format!("no subscriber record for {}", email)))?;
        if delta.is_negative() {
            account.validations_used = account
                .validations_used
                .saturating_sub(delta.unsigned_abs());
        } else {
            account.validations_used += delta as u32;
        }
        Ok(())
    }
}

/// Process-local append-only submissions log
#[derive(Default)]
pub struct InMemorySubmissionStore {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("submission store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().expect("submission store poisoned").clone()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn append(&self, record: SubmissionRecord) -> Result<(), VaasError> {
        let mut records = self.records.lock().expect("submission store poisoned");
        records.push(record);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<SubmissionRecord>, VaasError> {
        Ok(self.records())
    }
}
