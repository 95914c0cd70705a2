//! Column mapping types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{MappingStatus, MatchTier, ModelError, Result};

/// A preview value from the source file. Never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for SampleValue {
    fn from(value: &str) -> Self {
        SampleValue::Text(value.to_string())
    }
}

impl From<i64> for SampleValue {
    fn from(value: i64) -> Self {
        SampleValue::Int(value)
    }
}

impl From<f64> for SampleValue {
    fn from(value: f64) -> Self {
        SampleValue::Float(value)
    }
}

/// A target field offered by the ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableField {
    pub field: String,
    #[serde(default)]
    pub description: String,
}

impl AvailableField {
    pub fn new(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
        }
    }
}

/// One source column and its target-field assignment.
///
/// `source_column` is the identity key and is unique within a mapping set.
/// An ignored mapping keeps its target, tier and confidence so it can be
/// restored later, but it takes no part in status or conflict computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub source_column: String,
    #[serde(default)]
    pub target_field: Option<String>,
    pub tier: MatchTier,
    pub confidence: f32,
    #[serde(default)]
    pub sample_data: Vec<SampleValue>,
    #[serde(default)]
    pub ignored: bool,
    pub status: MappingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ColumnMapping {
    /// A column the matcher could not assign.
    pub fn unmatched(source_column: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target_field: None,
            tier: MatchTier::Unmatched,
            confidence: 0.0,
            sample_data: Vec::new(),
            ignored: false,
            status: MappingStatus::NeedsAttention,
            reasoning: None,
        }
    }

    /// A column assigned to `target_field` with the given provenance.
    pub fn matched(
        source_column: impl Into<String>,
        target_field: impl Into<String>,
        tier: MatchTier,
        confidence: f32,
    ) -> Self {
        let status = if tier.is_trusted() {
            MappingStatus::AutoMapped
        } else {
            MappingStatus::NeedsReview
        };
        Self {
            source_column: source_column.into(),
            target_field: Some(target_field.into()),
            tier,
            confidence,
            sample_data: Vec::new(),
            ignored: false,
            status,
            reasoning: None,
        }
    }

    #[must_use]
    pub fn with_samples(mut self, samples: Vec<SampleValue>) -> Self {
        self.sample_data = samples;
        self
    }

    #[must_use]
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    #[must_use]
    pub fn with_ignored(mut self, ignored: bool) -> Self {
        self.ignored = ignored;
        self
    }

    pub fn target(&self) -> Option<&str> {
        self.target_field.as_deref()
    }

    pub fn is_mapped(&self) -> bool {
        self.target_field.is_some()
    }

    /// True when the mapping takes part in status and conflict computations.
    pub fn is_active(&self) -> bool {
        !self.ignored
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_column.trim().is_empty() {
            return Err(ModelError::BlankSourceColumn);
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ModelError::ConfidenceOutOfRange {
                column: self.source_column.clone(),
                value: self.confidence,
            });
        }
        Ok(())
    }
}

/// Checks every mapping and the uniqueness of source columns.
pub fn validate_mapping_set(mappings: &[ColumnMapping]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for mapping in mappings {
        mapping.validate()?;
        if !seen.insert(mapping.source_column.as_str()) {
            return Err(ModelError::DuplicateSourceColumn(
                mapping.source_column.clone(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_derives_initial_status_from_tier() {
        let exact = ColumnMapping::matched("Qty", "actual_qty", MatchTier::Exact, 1.0);
        assert_eq!(exact.status, MappingStatus::AutoMapped);
        let fuzzy = ColumnMapping::matched("Qty", "actual_qty", MatchTier::Fuzzy, 0.7);
        assert_eq!(fuzzy.status, MappingStatus::NeedsReview);
    }

    #[test]
    fn validate_rejects_out_of_range_confidence() {
        let mapping = ColumnMapping::matched("Qty", "actual_qty", MatchTier::Fuzzy, 1.5);
        assert!(matches!(
            mapping.validate(),
            Err(ModelError::ConfidenceOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_set_rejects_duplicate_columns() {
        let set = vec![
            ColumnMapping::unmatched("Qty"),
            ColumnMapping::unmatched("Qty"),
        ];
        assert_eq!(
            validate_mapping_set(&set),
            Err(ModelError::DuplicateSourceColumn("Qty".to_string()))
        );
    }

    #[test]
    fn sample_values_deserialize_untagged() {
        let values: Vec<SampleValue> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                SampleValue::Null,
                SampleValue::Bool(true),
                SampleValue::Int(3),
                SampleValue::Float(2.5),
                SampleValue::Text("x".to_string()),
            ]
        );
    }
}
