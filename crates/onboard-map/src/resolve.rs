//! Pure resolution functions over a mapping draft.
//!
//! None of these functions mutate their inputs. Ignored mappings are
//! skipped by every computation except the `all` and `ignored` counts.

use std::collections::{BTreeMap, BTreeSet};

use onboard_model::{AvailableField, ColumnMapping, MappingStatus};

/// Re-derives the review status of a mapping from its target and tier.
///
/// Unmapped and active is `NeedsAttention`; mapped with an untrusted tier
/// is `NeedsReview`; everything else is `AutoMapped`.
pub fn derive_status(mapping: &ColumnMapping) -> MappingStatus {
    match mapping.target() {
        None if mapping.is_active() => MappingStatus::NeedsAttention,
        Some(_) if !mapping.tier.is_trusted() => MappingStatus::NeedsReview,
        _ => MappingStatus::AutoMapped,
    }
}

/// Target field to the source columns assigned to it, active mappings only.
pub fn conflict_map(mappings: &[ColumnMapping]) -> BTreeMap<&str, Vec<&str>> {
    let mut by_target: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for mapping in mappings.iter().filter(|m| m.is_active()) {
        if let Some(target) = mapping.target() {
            by_target
                .entry(target)
                .or_default()
                .push(mapping.source_column.as_str());
        }
    }
    by_target
}

/// Target fields referenced by two or more active mappings.
pub fn conflict_set(mappings: &[ColumnMapping]) -> BTreeSet<String> {
    conflict_map(mappings)
        .into_iter()
        .filter(|(_, sources)| sources.len() >= 2)
        .map(|(target, _)| target.to_string())
        .collect()
}

/// Whether the draft may be confirmed, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmGate {
    Open,
    Blocked {
        /// Conflicting target fields, sorted.
        conflicts: Vec<String>,
        /// Active source columns without a target, in draft order.
        needs_attention: Vec<String>,
    },
}

impl ConfirmGate {
    pub fn is_open(&self) -> bool {
        matches!(self, ConfirmGate::Open)
    }

    pub fn is_blocked(&self) -> bool {
        !self.is_open()
    }

    fn from_parts(conflicts: &BTreeSet<String>, needs_attention: Vec<String>) -> Self {
        if conflicts.is_empty() && needs_attention.is_empty() {
            ConfirmGate::Open
        } else {
            ConfirmGate::Blocked {
                conflicts: conflicts.iter().cloned().collect(),
                needs_attention,
            }
        }
    }
}

fn needs_attention_columns(mappings: &[ColumnMapping]) -> Vec<String> {
    mappings
        .iter()
        .filter(|m| m.is_active() && derive_status(m) == MappingStatus::NeedsAttention)
        .map(|m| m.source_column.clone())
        .collect()
}

/// Confirmation is blocked by any conflict or any active `NeedsAttention`
/// mapping. `NeedsReview` never blocks.
pub fn confirm_gate(mappings: &[ColumnMapping]) -> ConfirmGate {
    ConfirmGate::from_parts(&conflict_set(mappings), needs_attention_columns(mappings))
}

/// Counts behind the filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    /// Every mapping, ignored or not.
    pub all: usize,
    /// Active mappings without a target.
    pub unmapped: usize,
    /// Conflicting target fields (not source columns).
    pub conflicts: usize,
    /// Active mappings whose derived status is `NeedsReview`.
    pub needs_review: usize,
    /// Ignored mappings.
    pub ignored: usize,
}

pub fn filter_counts(mappings: &[ColumnMapping]) -> FilterCounts {
    counts_with(mappings, &conflict_set(mappings))
}

fn counts_with(mappings: &[ColumnMapping], conflicts: &BTreeSet<String>) -> FilterCounts {
    let active = || mappings.iter().filter(|m| m.is_active());
    FilterCounts {
        all: mappings.len(),
        unmapped: active().filter(|m| !m.is_mapped()).count(),
        conflicts: conflicts.len(),
        needs_review: active()
            .filter(|m| derive_status(m) == MappingStatus::NeedsReview)
            .count(),
        ignored: mappings.iter().filter(|m| m.ignored).count(),
    }
}

/// Snapshot of everything derived from a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingResolution {
    /// Derived status per mapping, parallel to the input slice.
    pub statuses: Vec<MappingStatus>,
    /// Conflicting target fields.
    pub conflicts: BTreeSet<String>,
    /// Source columns of active mappings whose target is conflicting.
    pub conflicting_columns: BTreeSet<String>,
    /// Source columns whose target is absent from a non-empty field catalog.
    pub unknown_targets: Vec<String>,
    pub counts: FilterCounts,
    pub gate: ConfirmGate,
}

impl MappingResolution {
    pub fn is_conflicting(&self, mapping: &ColumnMapping) -> bool {
        mapping.is_active()
            && mapping
                .target()
                .is_some_and(|target| self.conflicts.contains(target))
    }
}

/// Resolves a draft against the field catalog.
///
/// An empty catalog means "not loaded" and disables the unknown-target
/// check rather than flagging every mapping.
pub fn resolve(mappings: &[ColumnMapping], fields: &[AvailableField]) -> MappingResolution {
    let conflicts = conflict_set(mappings);
    let conflicting_columns = mappings
        .iter()
        .filter(|m| m.is_active() && m.target().is_some_and(|t| conflicts.contains(t)))
        .map(|m| m.source_column.clone())
        .collect();

    let known: BTreeSet<&str> = fields.iter().map(|f| f.field.as_str()).collect();
    let unknown_targets = if known.is_empty() {
        Vec::new()
    } else {
        mappings
            .iter()
            .filter(|m| m.target().is_some_and(|t| !known.contains(t)))
            .map(|m| m.source_column.clone())
            .collect()
    };

    let counts = counts_with(mappings, &conflicts);
    let gate = ConfirmGate::from_parts(&conflicts, needs_attention_columns(mappings));
    tracing::debug!(
        total = counts.all,
        unmapped = counts.unmapped,
        conflicts = counts.conflicts,
        blocked = gate.is_blocked(),
        "resolved mapping draft"
    );

    MappingResolution {
        statuses: mappings.iter().map(derive_status).collect(),
        conflicts,
        conflicting_columns,
        unknown_targets,
        counts,
        gate,
    }
}

/// Filter tabs of the mapping screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingFilter {
    #[default]
    All,
    Unmapped,
    Conflicts,
    NeedsReview,
    Ignored,
}

impl MappingFilter {
    pub const ALL: [MappingFilter; 5] = [
        MappingFilter::All,
        MappingFilter::Unmapped,
        MappingFilter::Conflicts,
        MappingFilter::NeedsReview,
        MappingFilter::Ignored,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unmapped => "Unmapped",
            Self::Conflicts => "Conflicts",
            Self::NeedsReview => "Needs review",
            Self::Ignored => "Ignored",
        }
    }

    /// Badge count for this tab.
    pub fn count(&self, counts: &FilterCounts) -> usize {
        match self {
            Self::All => counts.all,
            Self::Unmapped => counts.unmapped,
            Self::Conflicts => counts.conflicts,
            Self::NeedsReview => counts.needs_review,
            Self::Ignored => counts.ignored,
        }
    }

    pub fn matches(&self, mapping: &ColumnMapping, resolution: &MappingResolution) -> bool {
        match self {
            Self::All => true,
            Self::Unmapped => mapping.is_active() && !mapping.is_mapped(),
            Self::Conflicts => resolution.is_conflicting(mapping),
            Self::NeedsReview => {
                mapping.is_active() && derive_status(mapping) == MappingStatus::NeedsReview
            }
            Self::Ignored => mapping.ignored,
        }
    }

    /// Mappings shown under this tab, in draft order.
    pub fn apply<'a>(
        &self,
        mappings: &'a [ColumnMapping],
        resolution: &MappingResolution,
    ) -> Vec<&'a ColumnMapping> {
        mappings
            .iter()
            .filter(|m| self.matches(m, resolution))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use onboard_model::MatchTier;

    use super::*;

    #[test]
    fn ignored_unmapped_is_not_attention() {
        let mapping = ColumnMapping::unmatched("Notes").with_ignored(true);
        assert_eq!(derive_status(&mapping), MappingStatus::AutoMapped);
    }

    #[test]
    fn untrusted_tiers_need_review() {
        for tier in [MatchTier::Fuzzy, MatchTier::AiSuggested, MatchTier::Unmatched] {
            let mapping = ColumnMapping::matched("Qty", "actual_qty", tier, 0.5);
            assert_eq!(derive_status(&mapping), MappingStatus::NeedsReview);
        }
        let manual = ColumnMapping::matched("Qty", "actual_qty", MatchTier::Manual, 1.0);
        assert_eq!(derive_status(&manual), MappingStatus::AutoMapped);
    }

    #[test]
    fn derive_status_ignores_stored_status() {
        let mut mapping = ColumnMapping::matched("Qty", "actual_qty", MatchTier::Exact, 1.0);
        mapping.status = MappingStatus::NeedsAttention;
        assert_eq!(derive_status(&mapping), MappingStatus::AutoMapped);
    }

    #[test]
    fn conflict_map_lists_sources_in_draft_order() {
        let mappings = vec![
            ColumnMapping::matched("B", "qty", MatchTier::Exact, 1.0),
            ColumnMapping::matched("A", "qty", MatchTier::Fuzzy, 0.7),
            ColumnMapping::matched("C", "price", MatchTier::Exact, 1.0),
        ];
        let map = conflict_map(&mappings);
        assert_eq!(map.get("qty"), Some(&vec!["B", "A"]));
        assert_eq!(map.get("price"), Some(&vec!["C"]));
    }
}
