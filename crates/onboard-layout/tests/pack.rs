use onboard_layout::{Layout, LayoutError, PackOptions, pack};
use onboard_model::{LayoutEntry, WidgetCategory, WidgetId, WidgetItem};
use proptest::prelude::*;

fn id(value: &str) -> WidgetId {
    WidgetId::new(value).unwrap()
}

fn item(name: &str, w: u32, h: u32) -> WidgetItem {
    WidgetItem::new(id(name), w, h, WidgetCategory::Chart)
}

/// One character per cell: the first letter of the owning widget, `.` if free.
fn render(layout: &Layout) -> String {
    (0..layout.height())
        .map(|y| {
            (0..layout.cols)
                .map(|x| {
                    layout
                        .cell_owner(x, y)
                        .and_then(|owner| owner.as_str().chars().next())
                        .unwrap_or('.')
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn tallest_first_then_first_free_origin() {
    let layout = pack(
        &[item("a", 6, 4), item("b", 6, 2), item("c", 12, 1)],
        PackOptions::default(),
    )
    .unwrap();

    assert_eq!(
        layout.entries(),
        vec![
            LayoutEntry { widget_id: id("a"), x: 0, y: 0, w: 6, h: 4 },
            LayoutEntry { widget_id: id("b"), x: 6, y: 0, w: 6, h: 2 },
            LayoutEntry { widget_id: id("c"), x: 0, y: 4, w: 12, h: 1 },
        ]
    );
    assert_eq!(layout.height(), 5);
}

#[test]
fn mixed_library_renders_compactly() {
    let layout = pack(
        &[
            item("c", 12, 1),
            item("a", 6, 4),
            item("d", 3, 2),
            item("b", 6, 2),
            item("e", 3, 2),
        ],
        PackOptions::default(),
    )
    .unwrap();

    insta::assert_snapshot!(render(&layout), @r"
    aaaaaabbbbbb
    aaaaaabbbbbb
    aaaaaadddeee
    aaaaaadddeee
    cccccccccccc
    ");
}

#[test]
fn narrow_grid_stacks_items() {
    let layout = pack(&[item("a", 2, 1), item("b", 2, 1)], PackOptions::with_cols(3)).unwrap();
    assert_eq!(layout.get(&id("a")).map(|p| (p.x, p.y)), Some((0, 0)));
    assert_eq!(layout.get(&id("b")).map(|p| (p.x, p.y)), Some((0, 1)));
}

#[test]
fn wider_than_grid_is_rejected() {
    let err = pack(&[item("wide", 13, 1)], PackOptions::default()).unwrap_err();
    assert_eq!(
        err,
        LayoutError::TooWide {
            id: id("wide"),
            w: 13,
            cols: 12
        }
    );
}

#[test]
fn zero_sized_item_is_rejected() {
    let err = pack(&[item("flat", 4, 0)], PackOptions::default()).unwrap_err();
    assert_eq!(err, LayoutError::ZeroSize { id: id("flat") });
}

#[test]
fn exhausting_the_row_bound_is_an_error() {
    let options = PackOptions {
        cols: 4,
        max_rows: 2,
    };
    let items = [item("r1", 4, 1), item("r2", 4, 1), item("r3", 4, 1)];
    let err = pack(&items, options).unwrap_err();
    assert_eq!(
        err,
        LayoutError::RowBoundExceeded {
            id: id("r3"),
            max_rows: 2
        }
    );
}

fn items_strategy() -> impl Strategy<Value = Vec<WidgetItem>> {
    prop::collection::vec((1u32..=12, 1u32..=6), 0..16).prop_map(|sizes| {
        sizes
            .into_iter()
            .enumerate()
            .map(|(i, (w, h))| item(&format!("w{i}"), w, h))
            .collect()
    })
}

proptest! {
    #[test]
    fn placements_stay_in_bounds_and_never_overlap(items in items_strategy()) {
        let layout = pack(&items, PackOptions::default()).unwrap();
        prop_assert_eq!(layout.placements.len(), items.len());
        for (i, placed) in layout.placements.iter().enumerate() {
            prop_assert!(placed.x + placed.item.w <= layout.cols);
            for other in &layout.placements[i + 1..] {
                prop_assert!(
                    !placed.overlaps(other),
                    "{} overlaps {}",
                    placed.id(),
                    other.id()
                );
            }
        }
    }

    #[test]
    fn every_item_is_placed_once_with_its_size(items in items_strategy()) {
        let layout = pack(&items, PackOptions::default()).unwrap();
        for original in &items {
            let placed = layout.get(&original.id).unwrap();
            prop_assert_eq!(&placed.item, original);
        }
    }

    #[test]
    fn packing_is_deterministic(items in items_strategy()) {
        let first = pack(&items, PackOptions::default()).unwrap();
        let second = pack(&items, PackOptions::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn placement_order_is_height_then_width_descending(items in items_strategy()) {
        let layout = pack(&items, PackOptions::default()).unwrap();
        for pair in layout.placements.windows(2) {
            let (a, b) = (&pair[0].item, &pair[1].item);
            prop_assert!(a.h > b.h || (a.h == b.h && a.w >= b.w));
        }
    }
}
