//! Idea submission input types
//!
//! An [`IdeaSubmission`] lives for the duration of one request and is
//! never mutated. Validation happens here, before the scorer runs.

use serde::{Deserialize, Serialize};

use crate::error::VaasError;

/// Minimum idea length after trimming
pub const MIN_IDEA_CHARS: usize = 10;
/// Maximum idea length
pub const MAX_IDEA_CHARS: usize = 5000;
/// Maximum audience length
pub const MAX_AUDIENCE_CHARS: usize = 500;

/// How the founder plans to charge for the idea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueModel {
    Subscription,
    Freemium,
    OneTime,
    UsageBased,
    MarketplaceApp,
}

impl RevenueModel {
    /// Wire token for this model, also used in the scorer's matching buffer
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueModel::Subscription => "subscription",
            RevenueModel::Freemium => "freemium",
            RevenueModel::OneTime => "one_time",
            RevenueModel::UsageBased => "usage_based",
            RevenueModel::MarketplaceApp => "marketplace_app",
        }
    }
}

impl std::fmt::Display for RevenueModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One idea as submitted for validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaSubmission {
    /// Free-text idea description (10 to 5000 chars)
    pub idea: String,

    /// Optional audience description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// Optional revenue model, sent as `model` on the wire
    #[serde(default, rename = "model", skip_serializing_if = "Option::is_none")]
    pub revenue_model: Option<RevenueModel>,
}

impl IdeaSubmission {
    /// Create a submission from its parts
    pub fn new(
        idea: impl Into<String>,
        audience: Option<String>,
        revenue_model: Option<RevenueModel>,
    ) -> Self {
        Self {
            idea: idea.into(),
            audience,
            revenue_model,
        }
    }

    /// Audience text, empty string when absent
    pub fn audience_text(&self) -> &str {
        self.audience.as_deref().unwrap_or("")
    }

    /// Reject out-of-range input before it reaches the scorer
    pub fn validate(&self) -> Result<(), VaasError> {
        if self.idea.trim().chars().count() < MIN_IDEA_CHARS {
            return Err(VaasError::Validation(
                "Please describe your idea in at least 10 characters.".to_string(),
            ));
        }
        if self.idea.chars().count() > MAX_IDEA_CHARS {
            return Err(VaasError::Validation(
                "Idea description must be under 5,000 characters.".to_string(),
            ));
        }
        if self.audience_text().chars().count() > MAX_AUDIENCE_CHARS {
            return Err(VaasError::Validation(
                "Audience description must be under 500 characters.".to_string(),
            ));
        }
        Ok(())
    }
}
