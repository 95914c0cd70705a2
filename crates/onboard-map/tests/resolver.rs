//! Integration tests for mapping resolution.

use onboard_map::{
    ConfirmGate, MappingFilter, MappingState, confirm_gate, conflict_set, derive_status,
    filter_counts, resolve,
};
use onboard_model::{AvailableField, ColumnMapping, MappingStatus, MatchTier};
use proptest::prelude::*;

fn fields() -> Vec<AvailableField> {
    ["actual_qty", "planned_qty", "price", "region"]
        .into_iter()
        .map(|f| AvailableField::new(f, ""))
        .collect()
}

#[test]
fn duplicate_target_blocks_confirmation() {
    let mappings = vec![
        ColumnMapping::matched("Qty", "actual_qty", MatchTier::Exact, 1.0),
        ColumnMapping::matched("Qty2", "actual_qty", MatchTier::Fuzzy, 0.8),
    ];
    let conflicts = conflict_set(&mappings);
    assert_eq!(conflicts.into_iter().collect::<Vec<_>>(), vec!["actual_qty"]);
    assert_eq!(
        confirm_gate(&mappings),
        ConfirmGate::Blocked {
            conflicts: vec!["actual_qty".to_string()],
            needs_attention: vec![],
        }
    );
}

#[test]
fn ignoring_the_duplicate_opens_the_gate() {
    let mappings = vec![
        ColumnMapping::matched("Qty", "actual_qty", MatchTier::Exact, 1.0),
        ColumnMapping::matched("Qty2", "actual_qty", MatchTier::Fuzzy, 0.8).with_ignored(true),
    ];
    assert!(conflict_set(&mappings).is_empty());
    assert!(confirm_gate(&mappings).is_open());
}

#[test]
fn needs_review_does_not_block() {
    let mappings = vec![
        ColumnMapping::matched("Qty", "actual_qty", MatchTier::AiSuggested, 0.55),
        ColumnMapping::matched("Cost", "price", MatchTier::Fuzzy, 0.7),
    ];
    let resolution = resolve(&mappings, &fields());
    assert_eq!(
        resolution.statuses,
        vec![MappingStatus::NeedsReview, MappingStatus::NeedsReview]
    );
    assert!(resolution.gate.is_open());
}

#[test]
fn filter_counts_count_targets_not_columns() {
    let mappings = vec![
        ColumnMapping::matched("A", "actual_qty", MatchTier::Exact, 1.0),
        ColumnMapping::matched("B", "actual_qty", MatchTier::Exact, 1.0),
        ColumnMapping::matched("C", "actual_qty", MatchTier::Fuzzy, 0.7),
        ColumnMapping::matched("D", "price", MatchTier::Exact, 1.0),
        ColumnMapping::matched("E", "price", MatchTier::Exact, 1.0),
        ColumnMapping::unmatched("F"),
        ColumnMapping::unmatched("G").with_ignored(true),
    ];
    let counts = filter_counts(&mappings);
    assert_eq!(counts.all, 7);
    assert_eq!(counts.unmapped, 1);
    assert_eq!(counts.conflicts, 2);
    assert_eq!(counts.needs_review, 1);
    assert_eq!(counts.ignored, 1);
}

#[test]
fn resolution_reports_conflicting_columns_and_unknown_targets() {
    let mappings = vec![
        ColumnMapping::matched("A", "actual_qty", MatchTier::Exact, 1.0),
        ColumnMapping::matched("B", "actual_qty", MatchTier::Exact, 1.0),
        ColumnMapping::matched("C", "actual_qty", MatchTier::Exact, 1.0).with_ignored(true),
        ColumnMapping::matched("D", "legacy_code", MatchTier::Fuzzy, 0.9),
    ];
    let resolution = resolve(&mappings, &fields());
    assert_eq!(
        resolution.conflicting_columns.iter().collect::<Vec<_>>(),
        vec!["A", "B"]
    );
    assert!(!resolution.is_conflicting(&mappings[2]));
    assert_eq!(resolution.unknown_targets, vec!["D".to_string()]);

    let without_catalog = resolve(&mappings, &[]);
    assert!(without_catalog.unknown_targets.is_empty());
}

#[test]
fn draft_from_the_ingestion_payload_is_rederived() {
    let mappings: Vec<ColumnMapping> = serde_json::from_str(
        r#"[
            {
                "sourceColumn": "Qty",
                "targetField": "actual_qty",
                "tier": "exact",
                "confidence": 1.0,
                "status": "auto_mapped",
                "sampleData": [12, "n/a"]
            },
            {
                "sourceColumn": "Price",
                "targetField": "price",
                "tier": "fuzzy",
                "confidence": 0.82,
                "status": "auto_mapped"
            },
            {
                "sourceColumn": "Notes",
                "tier": "unmatched",
                "confidence": 0.0,
                "status": "needs_attention",
                "ignored": true
            }
        ]"#,
    )
    .unwrap();

    let resolution = resolve(&mappings, &fields());
    assert_eq!(
        resolution.statuses,
        vec![
            MappingStatus::AutoMapped,
            MappingStatus::NeedsReview,
            MappingStatus::AutoMapped,
        ]
    );
    assert_eq!(resolution.counts.all, 3);
    assert_eq!(resolution.counts.unmapped, 0);
    assert_eq!(resolution.counts.needs_review, 1);
    assert_eq!(resolution.counts.ignored, 1);
    assert!(resolution.unknown_targets.is_empty());
    assert_eq!(resolution.gate, ConfirmGate::Open);
}

#[test]
fn filters_select_expected_rows() {
    let mappings = vec![
        ColumnMapping::matched("A", "actual_qty", MatchTier::Exact, 1.0),
        ColumnMapping::matched("B", "actual_qty", MatchTier::Fuzzy, 0.7),
        ColumnMapping::unmatched("C"),
        ColumnMapping::unmatched("D").with_ignored(true),
    ];
    let resolution = resolve(&mappings, &fields());
    let names = |filter: MappingFilter| {
        filter
            .apply(&mappings, &resolution)
            .into_iter()
            .map(|m| m.source_column.as_str())
            .collect::<Vec<_>>()
    };
    assert_eq!(names(MappingFilter::All), vec!["A", "B", "C", "D"]);
    assert_eq!(names(MappingFilter::Unmapped), vec!["C"]);
    assert_eq!(names(MappingFilter::Conflicts), vec!["A", "B"]);
    assert_eq!(names(MappingFilter::NeedsReview), vec!["B"]);
    assert_eq!(names(MappingFilter::Ignored), vec!["D"]);
    assert_eq!(MappingFilter::Conflicts.count(&resolution.counts), 1);
}

#[test]
fn reassigning_resolves_a_conflict() {
    let mut state = MappingState::new(
        vec![
            ColumnMapping::matched("Qty", "actual_qty", MatchTier::Exact, 1.0),
            ColumnMapping::matched("Qty2", "actual_qty", MatchTier::Fuzzy, 0.8),
        ],
        fields(),
    );
    assert!(state.gate().is_blocked());
    state.reassign("Qty2", "planned_qty").unwrap();
    assert!(state.gate().is_open());
    assert!(state.resolution().conflicts.is_empty());
}

const POOL: [&str; 4] = ["actual_qty", "planned_qty", "price", "region"];

fn tier_strategy() -> impl Strategy<Value = MatchTier> {
    prop_oneof![
        Just(MatchTier::Exact),
        Just(MatchTier::Fuzzy),
        Just(MatchTier::AiSuggested),
        Just(MatchTier::Manual),
        Just(MatchTier::Unmatched),
    ]
}

fn draft_strategy() -> impl Strategy<Value = Vec<ColumnMapping>> {
    prop::collection::vec(
        (
            prop::option::of(0..POOL.len()),
            tier_strategy(),
            0.0f32..=1.0,
            any::<bool>(),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (target, tier, confidence, ignored))| {
                let column = format!("col_{index}");
                let mapping = match target {
                    Some(t) => ColumnMapping::matched(column, POOL[t], tier, confidence),
                    None => ColumnMapping::unmatched(column),
                };
                mapping.with_ignored(ignored)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn conflict_iff_two_active_references(draft in draft_strategy()) {
        let conflicts = conflict_set(&draft);
        for target in POOL {
            let references = draft
                .iter()
                .filter(|m| !m.ignored && m.target() == Some(target))
                .count();
            prop_assert_eq!(conflicts.contains(target), references >= 2);
        }
    }

    #[test]
    fn gate_open_iff_no_conflict_and_no_attention(draft in draft_strategy()) {
        let attention = draft
            .iter()
            .any(|m| !m.ignored && derive_status(m) == MappingStatus::NeedsAttention);
        let expected_open = conflict_set(&draft).is_empty() && !attention;
        prop_assert_eq!(confirm_gate(&draft).is_open(), expected_open);
        prop_assert_eq!(resolve(&draft, &fields()).gate.is_open(), expected_open);
    }

    #[test]
    fn resolve_leaves_input_untouched(draft in draft_strategy()) {
        let before = draft.clone();
        let _ = resolve(&draft, &fields());
        prop_assert_eq!(before, draft);
    }

    #[test]
    fn reassign_twice_equals_once(draft in draft_strategy(), pick in 0..POOL.len()) {
        prop_assume!(!draft.is_empty());
        let column = draft[0].source_column.clone();
        let mut once = MappingState::new(draft.clone(), fields());
        once.reassign(&column, POOL[pick]).unwrap();
        let mut twice = MappingState::new(draft, fields());
        twice.reassign(&column, POOL[pick]).unwrap();
        twice.reassign(&column, POOL[pick]).unwrap();
        prop_assert_eq!(once.get(&column), twice.get(&column));
        let mapping = twice.get(&column).unwrap();
        prop_assert_eq!(mapping.tier, MatchTier::Manual);
        prop_assert_eq!(mapping.confidence, 1.0);
    }
}
