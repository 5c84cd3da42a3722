//! Wire types for the validate endpoint
//!
//! The response is the score plus a timestamp, an optional build call
//! to action for viable ideas, and the deep-validation status for
//! subscribers.

use serde::Serialize;
use vaas_core::ScoreResult;
use vaas_gate::{DeepAnalysisOutcome, LimitScope};

/// Confidence at which the build CTA appears
const BUILD_CTA_CONFIDENCE: u8 = 50;
/// Confidence at which the CTA tier upgrades to strong
const BUILD_CTA_STRONG_CONFIDENCE: u8 = 75;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    #[serde(flatten)]
    pub score: ScoreResult,
    pub validated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_cta: Option<BuildCta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_validation: Option<DeepValidation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCta {
    pub message: &'static str,
    pub url: &'static str,
    pub tier: &'static str,
}

impl BuildCta {
    /// Tease the build offering for viable ideas only
    pub fn for_confidence(confidence: u8) -> Option<Self> {
        if confidence < BUILD_CTA_CONFIDENCE {
            return None;
        }
        let tier = if confidence >= BUILD_CTA_STRONG_CONFIDENCE {
            "strong_candidate"
        } else {
            "moderate_candidate"
        };
        Some(Self {
            message: "Want us to build this for you? Our AI factory produces \
                      production-grade apps in days, not months.",
            url: "/build",
            tier,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepValidation {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub message: &'static str,
}

impl DeepValidation {
    /// Map a terminal outcome onto the wire. Free-tier requests omit
    /// the field entirely.
    pub fn from_outcome(outcome: &DeepAnalysisOutcome) -> Option<Self> {
        match outcome {
            DeepAnalysisOutcome::NotEligible => None,
            DeepAnalysisOutcome::TriggerSent { job_id } => Some(Self {
                status: "running",
                job_id: Some(job_id.clone()),
                message: "Guardian debate is running. Results will be emailed in 5-7 minutes.",
            }),
            DeepAnalysisOutcome::RolledBack => Some(Self {
                status: "error",
                job_id: None,
                message: "Guardian debate service unavailable right now. \
                          Your instant results are shown above.",
            }),
            DeepAnalysisOutcome::LimitReached { scope } => Some(Self {
                status: "limit_reached",
                job_id: None,
                message: match scope {
                    LimitScope::Daily => {
                        "Daily deep-validation limit reached. Your quota resets tomorrow."
                    }
                    LimitScope::Monthly => {
                        "Monthly deep-validation limit reached for this billing period."
                    }
                },
            }),
        }
    }
}
