//! Mapping edit session.
//!
//! Holds the draft produced by the matcher together with the field catalog
//! and applies the user's edits. Once finalized the draft is read-only.

use std::collections::BTreeMap;

use onboard_model::{AvailableField, ColumnMapping, MappingStatus, MatchTier};

use crate::confidence::{ConfidenceBand, ConfidenceThresholds};
use crate::error::MappingError;
use crate::resolve::{ConfirmGate, MappingResolution, confirm_gate, resolve};

#[derive(Debug, Clone, PartialEq)]
pub struct MappingState {
    mappings: Vec<ColumnMapping>,
    fields: Vec<AvailableField>,
    finalized: bool,
}

impl MappingState {
    pub fn new(mappings: Vec<ColumnMapping>, fields: Vec<AvailableField>) -> Self {
        Self {
            mappings,
            fields,
            finalized: false,
        }
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn fields(&self) -> &[AvailableField] {
        &self.fields
    }

    /// Replaces the field catalog, e.g. when it finishes loading after the
    /// draft arrived.
    pub fn set_fields(&mut self, fields: Vec<AvailableField>) {
        self.fields = fields;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn get(&self, source_column: &str) -> Option<&ColumnMapping> {
        self.mappings
            .iter()
            .find(|m| m.source_column == source_column)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    fn editable(&mut self, source_column: &str) -> Result<&mut ColumnMapping, MappingError> {
        if self.finalized {
            return Err(MappingError::Finalized);
        }
        self.mappings
            .iter_mut()
            .find(|m| m.source_column == source_column)
            .ok_or_else(|| MappingError::ColumnNotFound(source_column.to_string()))
    }

    /// Assigns `field` to the column. Always yields tier `Manual`,
    /// confidence 1.0 and status `AutoMapped`. The ignore flag is untouched.
    pub fn reassign(&mut self, source_column: &str, field: &str) -> Result<(), MappingError> {
        if !self.finalized && !self.has_field(field) {
            return Err(MappingError::UnknownField {
                column: source_column.to_string(),
                field: field.to_string(),
            });
        }
        let mapping = self.editable(source_column)?;
        mapping.target_field = Some(field.to_string());
        mapping.tier = MatchTier::Manual;
        mapping.confidence = 1.0;
        mapping.status = MappingStatus::AutoMapped;
        tracing::debug!(column = source_column, field, "reassigned target field");
        Ok(())
    }

    /// Removes the column's target.
    pub fn clear(&mut self, source_column: &str) -> Result<(), MappingError> {
        let mapping = self.editable(source_column)?;
        mapping.target_field = None;
        mapping.tier = MatchTier::Unmatched;
        mapping.confidence = 0.0;
        mapping.status = MappingStatus::NeedsAttention;
        tracing::debug!(column = source_column, "cleared target field");
        Ok(())
    }

    /// Sets the ignore flag. Target, tier and confidence are preserved so
    /// an ignored column can be restored as it was.
    pub fn set_ignored(&mut self, source_column: &str, ignored: bool) -> Result<(), MappingError> {
        let mapping = self.editable(source_column)?;
        mapping.ignored = ignored;
        Ok(())
    }

    /// Flips the ignore flag and returns the new value.
    pub fn toggle_ignored(&mut self, source_column: &str) -> Result<bool, MappingError> {
        let mapping = self.editable(source_column)?;
        mapping.ignored = !mapping.ignored;
        Ok(mapping.ignored)
    }

    pub fn restore(&mut self, source_column: &str) -> Result<(), MappingError> {
        self.set_ignored(source_column, false)
    }

    pub fn resolution(&self) -> MappingResolution {
        resolve(&self.mappings, &self.fields)
    }

    pub fn gate(&self) -> ConfirmGate {
        confirm_gate(&self.mappings)
    }

    /// Locks the draft and returns the finalized mapping set.
    ///
    /// Fails with [`MappingError::GateBlocked`] while conflicts or
    /// unattended columns remain. Finalizing twice returns the same set.
    pub fn finalize(&mut self) -> Result<Vec<ColumnMapping>, MappingError> {
        if !self.finalized {
            if let ConfirmGate::Blocked {
                conflicts,
                needs_attention,
            } = self.gate()
            {
                return Err(MappingError::GateBlocked {
                    conflicts: conflicts.len(),
                    needs_attention: needs_attention.len(),
                });
            }
            self.finalized = true;
        }
        Ok(self.mappings.clone())
    }

    /// Target fields of active, mapped columns, in draft order.
    pub fn active_field_names(&self) -> Vec<String> {
        self.mappings
            .iter()
            .filter(|m| m.is_active())
            .filter_map(|m| m.target_field.clone())
            .collect()
    }

    /// Active mappings per confidence band.
    pub fn count_by_band(
        &self,
        thresholds: &ConfidenceThresholds,
    ) -> BTreeMap<ConfidenceBand, usize> {
        let mut counts = BTreeMap::new();
        for mapping in self.mappings.iter().filter(|m| m.is_active() && m.is_mapped()) {
            if let Some(band) = thresholds.categorize(mapping.confidence) {
                *counts.entry(band).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn summary(&self) -> MappingSummary {
        let resolution = self.resolution();
        MappingSummary {
            total_columns: self.mappings.len(),
            mapped: self
                .mappings
                .iter()
                .filter(|m| m.is_active() && m.is_mapped())
                .count(),
            ignored: resolution.counts.ignored,
            needs_review: resolution.counts.needs_review,
            needs_attention: resolution.counts.unmapped,
            conflicts: resolution.counts.conflicts,
            can_confirm: resolution.gate.is_open(),
        }
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    /// Total number of source columns.
    pub total_columns: usize,
    /// Active columns with a target.
    pub mapped: usize,
    pub ignored: usize,
    pub needs_review: usize,
    /// Active columns without a target.
    pub needs_attention: usize,
    /// Conflicting target fields.
    pub conflicts: usize,
    pub can_confirm: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<AvailableField> {
        vec![
            AvailableField::new("actual_qty", "Quantity delivered"),
            AvailableField::new("planned_qty", "Quantity planned"),
        ]
    }

    fn state() -> MappingState {
        MappingState::new(
            vec![
                ColumnMapping::matched("Qty", "actual_qty", MatchTier::Fuzzy, 0.7),
                ColumnMapping::matched("Qty2", "actual_qty", MatchTier::AiSuggested, 0.6),
                ColumnMapping::unmatched("Notes"),
            ],
            fields(),
        )
    }

    #[test]
    fn reassign_sets_manual_tier() {
        let mut state = state();
        state.reassign("Qty2", "planned_qty").unwrap();
        let mapping = state.get("Qty2").unwrap();
        assert_eq!(mapping.tier, MatchTier::Manual);
        assert_eq!(mapping.confidence, 1.0);
        assert_eq!(mapping.status, MappingStatus::AutoMapped);
        assert_eq!(mapping.target(), Some("planned_qty"));
    }

    #[test]
    fn reassign_rejects_unknown_field() {
        let mut state = state();
        let err = state.reassign("Qty", "made_up").unwrap_err();
        assert_eq!(err.column(), Some("Qty"));
        assert!(matches!(err, MappingError::UnknownField { .. }));
        assert_eq!(state.get("Qty").unwrap().tier, MatchTier::Fuzzy);
    }

    #[test]
    fn edits_on_missing_column_fail() {
        let mut state = state();
        assert_eq!(
            state.toggle_ignored("Nope"),
            Err(MappingError::ColumnNotFound("Nope".to_string()))
        );
    }

    #[test]
    fn ignore_then_restore_preserves_assignment() {
        let mut state = state();
        assert!(state.toggle_ignored("Qty2").unwrap());
        let ignored = state.get("Qty2").unwrap().clone();
        assert_eq!(ignored.tier, MatchTier::AiSuggested);
        assert_eq!(ignored.target(), Some("actual_qty"));

        state.restore("Qty2").unwrap();
        let restored = state.get("Qty2").unwrap();
        assert!(!restored.ignored);
        assert_eq!(restored.tier, MatchTier::AiSuggested);
        assert_eq!(restored.confidence, 0.6);
    }

    #[test]
    fn finalize_requires_open_gate() {
        let mut state = state();
        assert_eq!(
            state.finalize(),
            Err(MappingError::GateBlocked {
                conflicts: 1,
                needs_attention: 1,
            })
        );
        state.reassign("Qty2", "planned_qty").unwrap();
        state.set_ignored("Notes", true).unwrap();
        let finalized = state.finalize().unwrap();
        assert_eq!(finalized.len(), 3);
        assert!(state.is_finalized());
        assert_eq!(state.clear("Qty"), Err(MappingError::Finalized));
        assert_eq!(state.reassign("Qty", "planned_qty"), Err(MappingError::Finalized));
    }

    #[test]
    fn summary_counts() {
        let summary = state().summary();
        assert_eq!(summary.total_columns, 3);
        assert_eq!(summary.mapped, 2);
        assert_eq!(summary.needs_review, 2);
        assert_eq!(summary.needs_attention, 1);
        assert_eq!(summary.conflicts, 1);
        assert!(!summary.can_confirm);
    }

    #[test]
    fn bands_count_active_mapped_only() {
        let mut state = state();
        state.set_ignored("Qty", true).unwrap();
        let counts = state.count_by_band(&ConfidenceThresholds::default());
        assert_eq!(counts.get(&ConfidenceBand::Low), Some(&1));
        assert_eq!(counts.get(&ConfidenceBand::Medium), None);
    }
}
