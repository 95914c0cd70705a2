//! Closed enumerations for mapping provenance, review status and widget
//! compatibility.
//!
//! The collaborators exchange these as lowercase snake_case strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Provenance of a column-to-field assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Column header matched a field name exactly.
    Exact,
    /// Column header matched a field name approximately.
    Fuzzy,
    /// Assignment proposed by the AI matcher.
    AiSuggested,
    /// Assignment chosen or corrected by the user.
    Manual,
    /// No assignment was found.
    Unmatched,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Fuzzy => "fuzzy",
            MatchTier::AiSuggested => "ai_suggested",
            MatchTier::Manual => "manual",
            MatchTier::Unmatched => "unmatched",
        }
    }

    /// Exact and manual assignments are trusted without review.
    pub fn is_trusted(&self) -> bool {
        matches!(self, MatchTier::Exact | MatchTier::Manual)
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "exact" => Ok(MatchTier::Exact),
            "fuzzy" => Ok(MatchTier::Fuzzy),
            "ai_suggested" | "ai" => Ok(MatchTier::AiSuggested),
            "manual" => Ok(MatchTier::Manual),
            "unmatched" | "none" => Ok(MatchTier::Unmatched),
            _ => Err(format!("Unknown match tier: {s}")),
        }
    }
}

/// Review status of a single mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    /// Mapped with a trusted tier; nothing to do.
    AutoMapped,
    /// Mapped, but the tier warrants a second look. Does not block confirmation.
    NeedsReview,
    /// Not mapped and not ignored. Blocks confirmation.
    NeedsAttention,
}

impl MappingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingStatus::AutoMapped => "auto_mapped",
            MappingStatus::NeedsReview => "needs_review",
            MappingStatus::NeedsAttention => "needs_attention",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MappingStatus::AutoMapped => "Auto-mapped",
            MappingStatus::NeedsReview => "Needs review",
            MappingStatus::NeedsAttention => "Needs attention",
        }
    }
}

impl fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "auto_mapped" => Ok(MappingStatus::AutoMapped),
            "needs_review" => Ok(MappingStatus::NeedsReview),
            "needs_attention" => Ok(MappingStatus::NeedsAttention),
            _ => Err(format!("Unknown mapping status: {s}")),
        }
    }
}

/// How well a widget's data requirements are met by the active fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityStatus {
    Supported,
    NearMiss,
    Unsupported,
}

impl CompatibilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityStatus::Supported => "supported",
            CompatibilityStatus::NearMiss => "near_miss",
            CompatibilityStatus::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for CompatibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
