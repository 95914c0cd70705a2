//! Confidence bands for display grouping.

use serde::{Deserialize, Serialize};

/// Confidence band of a mapping score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceBand {
    /// Below the medium threshold (and at or above the low one).
    Low,
    /// At or above the medium threshold.
    Medium,
    /// At or above the high threshold.
    High,
}

impl ConfidenceBand {
    /// Returns a human-readable description of the band.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// Configurable thresholds for banding confidence scores.
///
/// - Below `low`: no band
/// - `low` to `medium`: [`ConfidenceBand::Low`]
/// - `medium` to `high`: [`ConfidenceBand::Medium`]
/// - At or above `high`: [`ConfidenceBand::High`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for the high band (default: 0.95).
    pub high: f32,
    /// Minimum confidence for the medium band (default: 0.80).
    pub medium: f32,
    /// Minimum confidence for any band (default: 0.60).
    pub low: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.80,
            low: 0.60,
        }
    }
}

impl ConfidenceThresholds {
    /// Strict boundaries.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            high: 0.98,
            medium: 0.90,
            low: 0.75,
        }
    }

    /// Relaxed boundaries.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            high: 0.90,
            medium: 0.70,
            low: 0.50,
        }
    }

    /// True when every threshold is in `[0, 1]` and `low <= medium <= high`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f32| (0.0..=1.0).contains(&v);
        in_range(self.low)
            && in_range(self.medium)
            && in_range(self.high)
            && self.low <= self.medium
            && self.medium <= self.high
    }

    /// Returns `None` if the score is below the low threshold.
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> Option<ConfidenceBand> {
        if confidence >= self.high {
            Some(ConfidenceBand::High)
        } else if confidence >= self.medium {
            Some(ConfidenceBand::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceBand::Low)
        } else {
            None
        }
    }
}
