//! Cross-cutting properties of the scoring engine over a small corpus.

use vaas_core::{IdeaSubmission, RevenueModel, Verdict, MAX_CONFIDENCE, MIN_CONFIDENCE};
use vaas_engine::{classify, score};

const CORPUS: &[&str] = &[
    "A todo app for teams",
    "A social media scheduler for dentists",
    "An invoice reconciliation api for accountants at mid-size firms",
    "A HIPAA compliance monitor for small clinics",
    "artisanal pottery subscriptions delivered monthly",
    "A chrome extension that tracks shopify cart abandonment",
    "An AI writing assistant for legal contract review",
    "A vpn with a built-in password manager",
    "A migration tool that converts wordpress sites before the php sunset deadline",
    "short pitch",
];

#[test]
fn confidence_clamped_and_verdict_consistent_for_all_inputs() {
    for idea in CORPUS {
        for model in [
            None,
            Some(RevenueModel::Subscription),
            Some(RevenueModel::OneTime),
            Some(RevenueModel::MarketplaceApp),
        ] {
            let result = score(&IdeaSubmission::new(*idea, None, model));
            assert!(
                result.confidence >= MIN_CONFIDENCE && result.confidence <= MAX_CONFIDENCE,
                "confidence out of range for {:?}",
                idea
            );
            assert_eq!(
                result.verdict,
                Verdict::from_confidence(result.confidence),
                "verdict drifted from threshold table for {:?}",
                idea
            );
        }
    }
}

#[test]
fn patterns_matched_equals_list_lengths() {
    for idea in CORPUS {
        let result = score(&IdeaSubmission::new(
            *idea,
            Some("founders of small agencies".to_string()),
            None,
        ));
        assert_eq!(
            result.patterns_matched,
            result.risks.len() + result.strengths.len()
        );
        assert!(!result.risks.is_empty(), "every idea gets at least one risk");
        assert!(!result.strengths.is_empty());
    }
}

#[test]
fn classification_is_stable_and_closed_vocabulary() {
    let categories = [
        "ecommerce", "fintech", "healthtech", "edtech", "devtools", "marketing", "hr",
        "realestate", "foodtech", "legaltech", "productivity", "analytics", "security",
        "ai-native", "other",
    ];
    for idea in CORPUS {
        let lower = idea.to_lowercase();
        let (category, _) = classify(&lower);
        assert_eq!(classify(&lower), classify(&lower));
        assert!(categories.contains(&category), "unknown label {}", category);
    }
}

#[test]
fn scoring_never_panics_on_odd_unicode() {
    for idea in [
        "una aplicación de facturación para pymes en españa",
        "日本の中小企業向けの在庫管理ツールです",
        "an idea with emoji 🚀🔥 and ünïcödé that is long enough",
    ] {
        let result = score(&IdeaSubmission::new(idea, None, None));
        assert!(result.confidence >= MIN_CONFIDENCE);
    }
}
