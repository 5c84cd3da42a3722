//! Category and ecosystem classification
//!
//! Ordered first-match-wins rule lists over the idea text. Rule order is
//! load-bearing: an idea mentioning both "email marketing" and "AI" is
//! marketing, not ai-native, because the marketing rule is declared
//! first. Do not reorder.

use once_cell::sync::Lazy;
use regex::Regex;

/// Label returned when no category rule matches
pub const FALLBACK_CATEGORY: &str = "other";
/// Label returned when no ecosystem rule matches
pub const FALLBACK_ECOSYSTEM: &str = "standalone";

fn re(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("classifier regex must compile")
}

static CATEGORY_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (re("e.?commerce|shop|store|cart|merchant|retail"), "ecommerce"),
        (re("fintech|payment|banking|trading|invest|crypto"), "fintech"),
        (re("health|medical|patient|clinic|wellness"), "healthtech"),
        (re("education|learn|course|student|tutor"), "edtech"),
        (re("developer|code|api|devtool|ci.?cd|deploy"), "devtools"),
        (re("market|seo|social|content|email.*market|growth"), "marketing"),
        (re("hr|recruit|hiring|employee|team|workforce"), "hr"),
        (re("real.?estate|property|rent|mortgage"), "realestate"),
        (re("restaurant|food|delivery|kitchen|menu"), "foodtech"),
        (re("legal|compliance|contract|law"), "legaltech"),
        (re("productiv|task|project|workflow|automat"), "productivity"),
        (re("data|analytics|dashboard|report|insight"), "analytics"),
        (re("security|auth|identity|access|encrypt"), "security"),
        (re("ai|machine.?learn|llm|gpt|model"), "ai-native"),
    ]
});

static ECOSYSTEM_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (re("shopify"), "shopify"),
        (re("bigcommerce"), "bigcommerce"),
        (re("chrome.*ext|browser.*ext"), "chrome"),
        (re("vs.?code|visual studio"), "vscode"),
        (re("wordpress|wp"), "wordpress"),
        (re("slack"), "slack"),
        (re("salesforce"), "salesforce"),
        (re("hubspot"), "hubspot"),
        (re("jira|atlassian|confluence"), "atlassian"),
    ]
});

fn first_match(rules: &[(Regex, &'static str)], text: &str, fallback: &'static str) -> &'static str {
    rules
        .iter()
        .find(|(matcher, _)| matcher.is_match(text))
        .map(|&(_, label)| label)
        .unwrap_or(fallback)
}

/// Map free text to one category label and one ecosystem label.
///
/// Pure and stateless; any input string is valid.
pub fn classify(text: &str) -> (&'static str, &'static str) {
    (
        first_match(&CATEGORY_RULES, text, FALLBACK_CATEGORY),
        first_match(&ECOSYSTEM_RULES, text, FALLBACK_ECOSYSTEM),
    )
}
