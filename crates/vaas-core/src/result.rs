//! Scoring output types
//!
//! A [`ScoreResult`] is created fresh per request and only ever appended
//! to the submissions log. The verdict is a pure function of confidence.

use serde::{Deserialize, Serialize};

/// Lower clamp for confidence
pub const MIN_CONFIDENCE: u8 = 5;
/// Upper clamp for confidence
pub const MAX_CONFIDENCE: u8 = 95;

/// Viability tier derived from confidence via fixed thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    HighRisk = 0,
    Weak = 1,
    Moderate = 2,
    Strong = 3,
}

impl Verdict {
    /// Map a clamped confidence to its tier: >=75 strong, >=55 moderate,
    /// >=35 weak, else high_risk.
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            75..=u8::MAX => Verdict::Strong,
            55..=74 => Verdict::Moderate,
            35..=54 => Verdict::Weak,
            _ => Verdict::HighRisk,
        }
    }

    /// Confidence range covered by this tier (within the clamp bounds)
    pub fn confidence_range(&self) -> (u8, u8) {
        match self {
            Verdict::HighRisk => (MIN_CONFIDENCE, 34),
            Verdict::Weak => (35, 54),
            Verdict::Moderate => (55, 74),
            Verdict::Strong => (75, MAX_CONFIDENCE),
        }
    }

    /// One-line reading of the signal, used in UI copy
    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::Strong => "Strong signal — worth building an MVP",
            Verdict::Moderate => "Moderate signal — validate assumptions before building",
            Verdict::Weak => "Weak signal — significant risks identified",
            Verdict::HighRisk => "High risk — major concerns found",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let token = match self {
            Verdict::Strong => "strong",
            Verdict::Moderate => "moderate",
            Verdict::Weak => "weak",
            Verdict::HighRisk => "high_risk",
        };
        write!(f, "{}", token)
    }
}

/// Full structured verdict for one submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Heuristic viability, clamped to [5, 95]
    pub confidence: u8,

    /// Tier derived from confidence
    pub verdict: Verdict,

    /// Templated one-sentence reading of the result
    pub summary: String,

    /// Matched risk statements (pattern hits plus injected fallbacks)
    pub risks: Vec<String>,

    /// Matched strength statements
    pub strengths: Vec<String>,

    /// Ordered, fixed-rule-set recommendations
    pub recommendations: Vec<String>,

    /// Always equals risks.len() + strengths.len()
    pub patterns_matched: usize,

    /// Detected category label, `other` when nothing matched
    pub category: String,

    /// Detected ecosystem label, `standalone` when nothing matched
    pub ecosystem: String,
}
