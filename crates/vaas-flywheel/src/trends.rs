//! Read-side analytics over the submissions log
//!
//! Aggregates for the public trends endpoint and the anonymized idea
//! showcase. Both degrade to an empty payload when the store read
//! fails; analytics never surface an error to the caller.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vaas_core::{SubmissionRecord, SubmissionStore, Verdict};

/// Confidence floor for the "high confidence" trend counter
pub const HIGH_CONFIDENCE_FLOOR: u8 = 70;
/// Confidence floor for the recent high-scoring list
pub const RECENT_HIGH_FLOOR: u8 = 65;
/// Confidence floor for the anonymized idea showcase
pub const SHOWCASE_FLOOR: u8 = 60;

const TOP_CATEGORIES: usize = 10;
const TOP_ECOSYSTEMS: usize = 6;
const RECENT_LIMIT: usize = 10;
const SHOWCASE_LIMIT: usize = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsSummary {
    pub total_submissions: usize,
    pub avg_confidence: u8,
    pub high_confidence_count: usize,
    pub top_categories: Vec<CategoryTrend>,
    pub top_ecosystems: Vec<EcosystemTrend>,
    pub recent_high_scoring: Vec<RecentIdea>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTrend {
    pub category: String,
    pub count: usize,
    pub avg_confidence: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemTrend {
    pub ecosystem: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentIdea {
    pub idea: String,
    pub confidence: u8,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl TrendsSummary {
    pub fn empty() -> Self {
        Self {
            total_submissions: 0,
            avg_confidence: 0,
            high_confidence_count: 0,
            top_categories: Vec::new(),
            top_ecosystems: Vec::new(),
            recent_high_scoring: Vec::new(),
        }
    }
}

/// One showcased submission, stripped of everything that could identify
/// the submitter. No email, no fingerprint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDigest {
    pub idea: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_model: Option<String>,
    pub confidence: u8,
    pub verdict: Verdict,
    pub headline: &'static str,
    pub category: String,
    pub ecosystem: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate the whole log into the trends payload
pub async fn trends_summary(store: &dyn SubmissionStore) -> TrendsSummary {
    match store.all().await {
        Ok(records) => summarize(&records),
        Err(err) => {
            tracing::warn!(error = %err, "trends read failed");
            TrendsSummary::empty()
        }
    }
}

/// Anonymized high-scorers, best first, newest breaking ties
pub async fn showcase(store: &dyn SubmissionStore) -> Vec<IdeaDigest> {
    let records = match store.all().await {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(error = %err, "showcase read failed");
            return Vec::new();
        }
    };

    let mut picked: Vec<&SubmissionRecord> = records
        .iter()
        .filter(|r| r.confidence >= SHOWCASE_FLOOR)
        .collect();
    picked.sort_by(|a, b| {
        b.confidence
            .cmp(&a.confidence)
            .then(b.created_at.cmp(&a.created_at))
    });
    picked.truncate(SHOWCASE_LIMIT);

    picked
        .into_iter()
        .map(|r| IdeaDigest {
            idea: r.idea.clone(),
            audience: r.audience.clone(),
            revenue_model: r.revenue_model.clone(),
            confidence: r.confidence,
            verdict: r.verdict,
            headline: r.verdict.headline(),
            category: r.category.clone(),
            ecosystem: r.ecosystem.clone(),
            created_at: r.created_at,
        })
        .collect()
}

fn summarize(records: &[SubmissionRecord]) -> TrendsSummary {
    if records.is_empty() {
        return TrendsSummary::empty();
    }

    let total_submissions = records.len();
    let confidence_sum: u32 = records.iter().map(|r| r.confidence as u32).sum();
    let avg_confidence = (confidence_sum as f64 / total_submissions as f64).round() as u8;
    let high_confidence_count = records
        .iter()
        .filter(|r| r.confidence >= HIGH_CONFIDENCE_FLOOR)
        .count();

    let mut by_category: HashMap<&str, (usize, u32)> = HashMap::new();
    let mut by_ecosystem: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let entry = by_category.entry(record.category.as_str()).or_default();
        entry.0 += 1;
        entry.1 += record.confidence as u32;
        *by_ecosystem.entry(record.ecosystem.as_str()).or_default() += 1;
    }

    let mut top_categories: Vec<CategoryTrend> = by_category
        .into_iter()
        .map(|(category, (count, sum))| CategoryTrend {
            category: category.to_string(),
            count,
            avg_confidence: (sum as f64 / count as f64).round() as u8,
        })
        .collect();
    top_categories.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));
    top_categories.truncate(TOP_CATEGORIES);

    let mut top_ecosystems: Vec<EcosystemTrend> = by_ecosystem
        .into_iter()
        .map(|(ecosystem, count)| EcosystemTrend {
            ecosystem: ecosystem.to_string(),
            count,
        })
        .collect();
    top_ecosystems.sort_by(|a, b| b.count.cmp(&a.count).then(a.ecosystem.cmp(&b.ecosystem)));
    top_ecosystems.truncate(TOP_ECOSYSTEMS);

    let mut recent: Vec<&SubmissionRecord> = records
        .iter()
        .filter(|r| r.confidence >= RECENT_HIGH_FLOOR)
        .collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(RECENT_LIMIT);
    let recent_high_scoring = recent
        .into_iter()
        .map(|r| RecentIdea {
            idea: r.idea.clone(),
            confidence: r.confidence,
            category: r.category.clone(),
            created_at: r.created_at,
        })
        .collect();

    TrendsSummary {
        total_submissions,
        avg_confidence,
        high_confidence_count,
        top_categories,
        top_ecosystems,
        recent_high_scoring,
    }
}
