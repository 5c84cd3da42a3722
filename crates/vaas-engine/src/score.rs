//! Confidence scoring pipeline
//!
//! `score` is a total, pure function: validation happens upstream, and
//! once input is accepted nothing in here can fail. The arithmetic runs
//! over pattern hits only; fallback and thin-input risks are injected
//! into the output lists as advisory entries and never move the score,
//! so a sparse idea is not double-punished for being sparse.

use vaas_core::{IdeaSubmission, RevenueModel, ScoreResult, Verdict};

use crate::classify::classify;
use crate::patterns::{
    self, fallback_risk, fallback_strength, MatchedRisk, NO_AUDIENCE_RISK, THIN_IDEA_RISK,
};

/// Starting confidence before penalties and bonuses
pub const BASE_CONFIDENCE: f64 = 60.0;
/// Penalty points per unit of risk weight
pub const RISK_PENALTY_STEP: f64 = 15.0;
/// Total risk penalty cap
pub const MAX_RISK_PENALTY: f64 = 40.0;
/// Bonus per matched strength, uncapped
pub const STRENGTH_BONUS: f64 = 5.0;

/// Idea length under which an unmatched idea is flagged as too vague
const THIN_IDEA_CHARS: usize = 100;
/// Audience length under which the no-audience risk is injected
const THIN_AUDIENCE_CHARS: usize = 5;
/// Audience length under which the define-audience recommendation fires
const WEAK_AUDIENCE_CHARS: usize = 10;

/// Score a validated submission into a structured verdict.
pub fn score(submission: &IdeaSubmission) -> ScoreResult {
    let idea = submission.idea.trim();
    let audience = submission.audience_text().trim();
    let model = submission.revenue_model;

    // Labels come from the idea text alone; the risk/strength buffer
    // additionally carries the audience and the revenue model token
    let idea_lower = idea.to_lowercase();
    let buffer = format!(
        "{} {} {}",
        idea_lower,
        audience.to_lowercase(),
        model.map(|m| m.as_str()).unwrap_or("")
    );

    let (category, ecosystem) = classify(&idea_lower);
    let matched_risks = patterns::match_failures(&buffer);
    let matched_strengths = patterns::match_strengths(&buffer);

    let idea_chars = idea.chars().count();
    let audience_chars = audience.chars().count();

    let confidence = compute_confidence(
        &matched_risks,
        matched_strengths.len(),
        idea_chars,
        audience_chars,
        model,
    );
    let verdict = Verdict::from_confidence(confidence);

    let advisory = advisory_risks(&matched_risks, category, idea_chars, audience_chars);
    let risks: Vec<String> = matched_risks
        .iter()
        .chain(advisory.iter())
        .map(|r| r.risk.clone())
        .collect();
    let mut strengths = matched_strengths.clone();
    if strengths.is_empty() {
        strengths.push(fallback_strength(category).to_string());
    }

    let recommendations = build_recommendations(
        &matched_risks,
        &matched_strengths,
        confidence,
        audience_chars,
        model,
    );
    let summary = build_summary(confidence, &matched_risks, &matched_strengths);
    let patterns_matched = risks.len() + strengths.len();

    ScoreResult {
        confidence,
        verdict,
        summary,
        risks,
        strengths,
        recommendations,
        patterns_matched,
        category: category.to_string(),
        ecosystem: ecosystem.to_string(),
    }
}

fn compute_confidence(
    matched_risks: &[MatchedRisk],
    strength_count: usize,
    idea_chars: usize,
    audience_chars: usize,
    model: Option<RevenueModel>,
) -> u8 {
    let mut confidence = BASE_CONFIDENCE;

    let risk_penalty: f64 = matched_risks
        .iter()
        .map(|r| r.weight * RISK_PENALTY_STEP)
        .sum();
    confidence -= risk_penalty.min(MAX_RISK_PENALTY);

    confidence += strength_count as f64 * STRENGTH_BONUS;

    // Specificity: longer, more detailed descriptions score higher
    if idea_chars > 200 {
        confidence += 5.0;
    }
    if idea_chars > 500 {
        confidence += 3.0;
    }
    if audience_chars > 20 {
        confidence += 5.0;
    }

    match model {
        Some(RevenueModel::MarketplaceApp) => confidence += 3.0, // built-in distribution
        Some(RevenueModel::UsageBased) => confidence += 2.0,     // cost tracks value
        _ => {}
    }

    confidence.round().clamp(5.0, 95.0) as u8
}

/// Risks injected alongside the pattern hits. Their weights stay below
/// every pattern weight and are excluded from the confidence penalty.
fn advisory_risks(
    matched_risks: &[MatchedRisk],
    category: &str,
    idea_chars: usize,
    audience_chars: usize,
) -> Vec<MatchedRisk> {
    let mut advisory = Vec::new();
    if matched_risks.is_empty() {
        advisory.push(MatchedRisk {
            risk: fallback_risk(category).to_string(),
            weight: patterns::FALLBACK_RISK_WEIGHT,
        });
        if idea_chars < THIN_IDEA_CHARS {
            advisory.push(MatchedRisk {
                risk: THIN_IDEA_RISK.to_string(),
                weight: patterns::THIN_IDEA_WEIGHT,
            });
        }
    }
    if audience_chars < THIN_AUDIENCE_CHARS {
        advisory.push(MatchedRisk {
            risk: NO_AUDIENCE_RISK.to_string(),
            weight: patterns::NO_AUDIENCE_WEIGHT,
        });
    }
    advisory
}

/// Fixed rule set; order is significant and must not change.
fn build_recommendations(
    matched_risks: &[MatchedRisk],
    matched_strengths: &[String],
    confidence: u8,
    audience_chars: usize,
    model: Option<RevenueModel>,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if !matched_risks.is_empty() {
        recommendations.push(
            "Research competitors deeply — find the specific gap they're NOT solving".to_string(),
        );
    }
    if audience_chars < WEAK_AUDIENCE_CHARS {
        recommendations.push(
            "Define your target audience more specifically (role, company size, pain frequency)"
                .to_string(),
        );
    }
    if confidence < 50 {
        recommendations
            .push("Talk to 10 potential customers before writing any code".to_string());
        recommendations
            .push("Consider a different angle or niche within this space".to_string());
    }
    if matched_strengths.is_empty() {
        recommendations.push(
            "Add a defensible moat: compliance, integrations, vertical focus, or data network effects"
                .to_string(),
        );
    }
    if model == Some(RevenueModel::OneTime) {
        recommendations.push(
            "Consider switching to subscription for predictable recurring revenue".to_string(),
        );
    }
    recommendations.push("Build the smallest possible version and charge from day one".to_string());
    recommendations
}

fn build_summary(
    confidence: u8,
    matched_risks: &[MatchedRisk],
    matched_strengths: &[String],
) -> String {
    if confidence >= 55 {
        let strengths_part = matched_strengths
            .first()
            .map(|s| format!("Key strengths: {}. ", s.to_lowercase()))
            .unwrap_or_default();
        let risks_part = matched_risks
            .first()
            .map(|r| {
                let first_sentence = r.risk.split('.').next().unwrap_or(&r.risk);
                format!("Watch out for: {}. ", first_sentence.to_lowercase())
            })
            .unwrap_or_default();
        format!(
            "Your idea shows promise. {}{}Focus on validating your core assumption with real users.",
            strengths_part, risks_part
        )
    } else {
        let headwind = matched_risks
            .first()
            .map(|r| r.risk.clone())
            .unwrap_or_else(|| "The market is highly competitive.".to_string());
        format!(
            "This space has significant headwinds. {} That doesn't mean it's impossible — but you'll need a very specific angle to succeed.",
            headwind
        )
    }
}
