//! Failure and strength pattern library
//!
//! Versioned, process-wide constant tables mapping textual patterns to
//! risk/strength statements. Compiled once at first use and never
//! mutated. The matching buffer is always lowercased by the scorer, but
//! every pattern is compiled case-insensitive anyway so the tables are
//! safe to use against raw text too.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern library revision, bumped whenever the tables change
pub const PATTERN_LIBRARY_VERSION: &str = "2026.08";

/// Weight attached to category fallback risks. Advisory only: injected
/// risks are shown and counted, never fed into the confidence penalty.
pub const FALLBACK_RISK_WEIGHT: f64 = 0.25;
/// Weight attached to the "too vague" thin-input risk
pub const THIN_IDEA_WEIGHT: f64 = 0.3;
/// Weight attached to the "no clear audience" thin-input risk
pub const NO_AUDIENCE_WEIGHT: f64 = 0.3;

/// A textual matcher tied to a known failure mode
pub struct FailurePattern {
    pub matcher: Regex,
    pub risk: &'static str,
    /// Penalty weight in (0, 1]
    pub weight: f64,
}

/// A textual matcher tied to a defensibility signal
pub struct StrengthIndicator {
    pub matcher: Regex,
    pub strength: &'static str,
}

/// One risk hit against the matching buffer
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRisk {
    pub risk: String,
    pub weight: f64,
}

fn re(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("pattern table regex must compile")
}

static FAILURE_PATTERNS: Lazy<Vec<FailurePattern>> = Lazy::new(|| {
    let table: &[(&str, &str, f64)] = &[
        (
            "social media scheduler",
            "Extreme saturation (Buffer, Hootsuite, Later, etc.)",
            0.9,
        ),
        (
            "todo|task manager",
            "Over-saturated market with strong incumbents (Todoist, Things, TickTick)",
            0.8,
        ),
        (
            "crm|customer relationship",
            "Enterprise-dominated market (Salesforce, HubSpot). SMB CRMs have high churn.",
            0.7,
        ),
        (
            "email marketing",
            "Commoditized market (Mailchimp, ConvertKit). Margins compress toward zero.",
            0.8,
        ),
        (
            "project management",
            "Red ocean (Asana, Monday, Linear, Notion). New entrants die within 18 months.",
            0.85,
        ),
        (
            "note taking|notes app",
            "Feature of existing platforms. Hard to monetize. Apple Notes is free.",
            0.75,
        ),
        (
            "chat|messaging|slack alternative",
            "Network effects make switching nearly impossible. Teams/Slack/Discord lock-in.",
            0.9,
        ),
        (
            "ai writing|ai content",
            "Race to bottom. OpenAI/Anthropic APIs commoditize. No defensible moat.",
            0.8,
        ),
        (
            "landing page builder",
            "Saturated (Carrd, Framer, Webflow). Differentiation is temporary.",
            0.7,
        ),
        (
            "invoice|invoicing",
            "Embedded in accounting tools (QuickBooks, Wave, FreshBooks). Hard to unbundle.",
            0.65,
        ),
        (
            "time tracking",
            "Feature, not product. Built into every project management tool.",
            0.7,
        ),
        (
            "password manager",
            "Security-critical + trust requirements + Apple/Google building it natively.",
            0.85,
        ),
        (
            "vpn",
            "Race to bottom pricing. Privacy trust is hard to establish.",
            0.8,
        ),
        (
            "link shortener",
            "Bit.ly won. Free alternatives everywhere. Zero switching cost.",
            0.9,
        ),
        (
            "analytics|website analytics",
            "Google Analytics is free. Plausible/Fathom have privacy niche. Margins thin.",
            0.65,
        ),
    ];
    table
        .iter()
        .map(|&(pattern, risk, weight)| FailurePattern {
            matcher: re(pattern),
            risk,
            weight,
        })
        .collect()
});

static STRENGTH_INDICATORS: Lazy<Vec<StrengthIndicator>> = Lazy::new(|| {
    let table: &[(&str, &str)] = &[
        (
            "compliance|regulation|gdpr|hipaa|sox",
            "Regulatory requirements create switching costs and justify pricing",
        ),
        (
            "api|integration|webhook|middleware",
            "Integration products have high switching costs (infrastructure lock-in)",
        ),
        (
            "vertical|niche|specific industry",
            "Vertical SaaS has higher retention and willingness to pay",
        ),
        (
            "migration|switch|convert|transition",
            "Migration tools have clear deadline-driven urgency",
        ),
        (
            "deprecat|sunset|deadline|end.of.life",
            "Platform deprecation creates time-sensitive demand",
        ),
        (
            "enterprise|b2b|team|organization",
            "B2B has higher LTV and lower churn than B2C",
        ),
        (
            "plugin|extension|app store|marketplace",
            "Platform ecosystems provide built-in distribution",
        ),
        (
            "workflow|automat|orchestrat",
            "Automation tools save measurable time — easy ROI calculation",
        ),
        (
            "monitor|alert|watchdog|detect",
            "Monitoring tools are \"insurance\" — high retention, low churn",
        ),
        (
            "data|report|dashboard|insight",
            "Data products compound value over time (more data = more useful)",
        ),
    ];
    table
        .iter()
        .map(|&(pattern, strength)| StrengthIndicator {
            matcher: re(pattern),
            strength,
        })
        .collect()
});

/// Test every failure pattern against the buffer; collect all hits
pub fn match_failures(buffer: &str) -> Vec<MatchedRisk> {
    FAILURE_PATTERNS
        .iter()
        .filter(|fp| fp.matcher.is_match(buffer))
        .map(|fp| MatchedRisk {
            risk: fp.risk.to_string(),
            weight: fp.weight,
        })
        .collect()
}

/// Test every strength indicator against the buffer; collect all hits
pub fn match_strengths(buffer: &str) -> Vec<String> {
    STRENGTH_INDICATORS
        .iter()
        .filter(|si| si.matcher.is_match(buffer))
        .map(|si| si.strength.to_string())
        .collect()
}

/// Generic risk injected when no failure pattern matched, so every idea
/// gets at least one actionable risk back.
pub fn fallback_risk(category: &str) -> &'static str {
    match category {
        "ecommerce" => "Commerce margins are thin; distribution and logistics usually decide winners",
        "fintech" => "Fintech requires licensing, trust, and long sales cycles before revenue",
        "healthtech" => "Healthcare sales cycles are long and buyers are risk-averse",
        "edtech" => "Education budgets are small and seasonal; retention is notoriously low",
        "devtools" => "Developers expect generous free tiers; converting them to paid is hard",
        "marketing" => "Marketing tools churn fast when campaigns end or budgets shift",
        "hr" => "HR purchases route through procurement; pilots stall without a champion",
        "realestate" => "Real estate is relationship-driven; software adoption lags badly",
        "foodtech" => "Food and delivery margins are brutal and operations-heavy",
        "legaltech" => "Lawyers adopt slowly and demand airtight confidentiality guarantees",
        "productivity" => "Productivity is a crowded default category; switching costs favor incumbents",
        "analytics" => "Analytics buyers compare against free incumbents before paying",
        "security" => "Security products must earn trust before anyone grants them access",
        "ai-native" => "Model APIs commoditize quickly; the moat must live outside the model",
        _ => "No specific failure pattern matched; competition research is still essential",
    }
}

/// Generic strength injected when no strength indicator matched
pub fn fallback_strength(category: &str) -> &'static str {
    match category {
        "ecommerce" => "Commerce buyers pay readily when a tool moves revenue directly",
        "fintech" => "Financial workflows have high willingness to pay once trust is earned",
        "healthtech" => "Healthcare contracts are sticky once a clinic is onboarded",
        "edtech" => "Education products spread by word of mouth inside institutions",
        "devtools" => "Developer tools grow bottom-up without a sales team",
        "marketing" => "Marketing spend is measurable, so ROI arguments land quickly",
        "hr" => "HR tools embed into payroll and review cycles, raising switching costs",
        "realestate" => "Transaction-sized deals support meaningful per-seat pricing",
        "foodtech" => "Daily-use operational tools become hard to rip out",
        "legaltech" => "Legal work bills by the hour, so time saved is easy to price",
        "productivity" => "A sharp niche inside productivity can still out-serve generic incumbents",
        "analytics" => "Decision-driving data earns renewals year after year",
        "security" => "Security spend is mandated, not discretionary",
        "ai-native" => "Proprietary data or distribution can outlast model commoditization",
        _ => "A focused first wedge beats broad platforms on depth",
    }
}

/// Thin-input risk text for ideas under 100 chars with no matched risks
pub const THIN_IDEA_RISK: &str =
    "Idea description is too vague to assess; specifics surface the real risks";

/// Thin-input risk text for a missing or near-empty audience
pub const NO_AUDIENCE_RISK: &str =
    "No clear target audience; products for everyone reach no one";
