//! Text rendering of a packed grid.

use onboard_layout::{Layout, PlacedWidget};

const MARKS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Marker for the placement at `index`; `#` once the alphabet runs out.
pub fn mark(index: usize) -> char {
    MARKS.get(index).map_or('#', |byte| char::from(*byte))
}

/// One line per grid row, one character per cell, `.` for free cells.
///
/// Placements are marked in packing order, so the legend from [`legend`]
/// lines up with the marks.
pub fn render_grid(layout: &Layout) -> String {
    let mut out = String::new();
    for y in 0..layout.height() {
        for x in 0..layout.cols {
            let cell = layout
                .placements
                .iter()
                .position(|placed| placed.covers(x, y))
                .map_or('.', mark);
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

pub fn legend(layout: &Layout) -> Vec<(char, &PlacedWidget)> {
    layout
        .placements
        .iter()
        .enumerate()
        .map(|(index, placed)| (mark(index), placed))
        .collect()
}

#[cfg(test)]
mod tests {
    use onboard_layout::{PackOptions, pack};
    use onboard_model::{WidgetCategory, WidgetId, WidgetItem};

    use super::*;

    fn item(name: &str, w: u32, h: u32) -> WidgetItem {
        WidgetItem::new(WidgetId::new(name).unwrap(), w, h, WidgetCategory::Kpi)
    }

    #[test]
    fn marks_run_out_to_hash() {
        assert_eq!(mark(0), 'A');
        assert_eq!(mark(26), 'a');
        assert_eq!(mark(52), '#');
    }

    #[test]
    fn renders_free_cells_as_dots() {
        let layout = pack(&[item("kpi", 4, 2)], PackOptions::with_cols(6)).unwrap();
        insta::assert_snapshot!(render_grid(&layout), @r"
        AAAA..
        AAAA..
        ");
    }

    #[test]
    fn legend_follows_packing_order() {
        let layout = pack(
            &[item("small", 2, 1), item("tall", 2, 3)],
            PackOptions::with_cols(4),
        )
        .unwrap();
        let ids: Vec<(char, &str)> = legend(&layout)
            .into_iter()
            .map(|(mark, placed)| (mark, placed.id().as_str()))
            .collect();
        assert_eq!(ids, vec![('A', "tall"), ('B', "small")]);
    }
}
