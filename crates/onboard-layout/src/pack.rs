use serde::{Deserialize, Serialize};

use onboard_model::{LayoutEntry, WidgetId, WidgetItem};

use crate::LayoutError;

pub const DEFAULT_COLS: u32 = 12;
pub const DEFAULT_MAX_ROWS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackOptions {
    /// Grid width in cells.
    pub cols: u32,
    /// Candidate origin rows scanned per widget before giving up.
    pub max_rows: u32,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl PackOptions {
    pub fn with_cols(cols: u32) -> Self {
        Self {
            cols,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.cols == 0 {
            return Err(LayoutError::InvalidOptions("cols must be at least 1"));
        }
        if self.max_rows == 0 {
            return Err(LayoutError::InvalidOptions("max_rows must be at least 1"));
        }
        Ok(())
    }
}

/// A widget with its computed origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedWidget {
    pub item: WidgetItem,
    pub x: u32,
    pub y: u32,
}

impl PlacedWidget {
    pub fn id(&self) -> &WidgetId {
        &self.item.id
    }

    pub fn covers(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.item.w && y >= self.y && y < self.y + self.item.h
    }

    pub fn overlaps(&self, other: &PlacedWidget) -> bool {
        self.x < other.x + other.item.w
            && other.x < self.x + self.item.w
            && self.y < other.y + other.item.h
            && other.y < self.y + self.item.h
    }

    pub fn entry(&self) -> LayoutEntry {
        LayoutEntry {
            widget_id: self.item.id.clone(),
            x: self.x,
            y: self.y,
            w: self.item.w,
            h: self.item.h,
        }
    }
}

/// Result of a packing run, in placement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub cols: u32,
    pub placements: Vec<PlacedWidget>,
}

impl Layout {
    /// Number of rows spanned by the placed widgets.
    pub fn height(&self) -> u32 {
        self.placements
            .iter()
            .map(|p| p.y.saturating_add(p.item.h))
            .max()
            .unwrap_or(0)
    }

    pub fn get(&self, id: &WidgetId) -> Option<&PlacedWidget> {
        self.placements.iter().find(|p| &p.item.id == id)
    }

    pub fn cell_owner(&self, x: u32, y: u32) -> Option<&WidgetId> {
        self.placements
            .iter()
            .find(|p| p.covers(x, y))
            .map(PlacedWidget::id)
    }

    pub fn entries(&self) -> Vec<LayoutEntry> {
        self.placements.iter().map(PlacedWidget::entry).collect()
    }
}

/// Row-major occupancy grid that grows downwards on demand.
struct Occupancy {
    cols: usize,
    rows: Vec<Vec<bool>>,
}

impl Occupancy {
    fn new(cols: u32) -> Self {
        Self {
            cols: cols as usize,
            rows: Vec::new(),
        }
    }

    fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let Some(bottom) = y.checked_add(h) else {
            return false;
        };
        let (x, w) = (x as usize, w as usize);
        // Rows not allocated yet are empty.
        let end = (bottom as usize).min(self.rows.len());
        self.rows[..end]
            .iter()
            .skip(y as usize)
            .all(|cells| cells[x..x + w].iter().all(|taken| !taken))
    }

    /// Only called for a footprint `is_free` accepted.
    fn mark(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let bottom = y.saturating_add(h) as usize;
        if self.rows.len() < bottom {
            self.rows.resize_with(bottom, || vec![false; self.cols]);
        }
        for row in &mut self.rows[y as usize..bottom] {
            row[x as usize..(x + w) as usize].fill(true);
        }
    }
}

fn validate_item(item: &WidgetItem, options: PackOptions) -> Result<(), LayoutError> {
    let PackOptions { cols, max_rows } = options;
    if item.w == 0 || item.h == 0 {
        return Err(LayoutError::ZeroSize {
            id: item.id.clone(),
        });
    }
    if item.w > cols {
        return Err(LayoutError::TooWide {
            id: item.id.clone(),
            w: item.w,
            cols,
        });
    }
    if item.h > max_rows {
        return Err(LayoutError::TooTall {
            id: item.id.clone(),
            h: item.h,
            max_rows,
        });
    }
    Ok(())
}

/// Packs `items` onto a grid `options.cols` wide.
///
/// Items are placed tallest first, wider first among equal heights; the sort
/// is stable so equal items keep their input order. Each item takes the
/// first origin, scanning rows top to bottom and columns left to right,
/// where its whole footprint is free. An item taller than `options.max_rows`
/// is rejected up front, and one that finds no origin within
/// `options.max_rows` rows fails the whole run rather than overlapping.
pub fn pack(items: &[WidgetItem], options: PackOptions) -> Result<Layout, LayoutError> {
    options.validate()?;
    for item in items {
        validate_item(item, options)?;
    }

    let mut order: Vec<&WidgetItem> = items.iter().collect();
    order.sort_by(|a, b| b.h.cmp(&a.h).then_with(|| b.w.cmp(&a.w)));

    let mut occupancy = Occupancy::new(options.cols);
    let mut placements = Vec::with_capacity(order.len());
    for item in order {
        let origin = (0..options.max_rows).find_map(|y| {
            (0..=options.cols - item.w)
                .find(|&x| occupancy.is_free(x, y, item.w, item.h))
                .map(|x| (x, y))
        });
        let Some((x, y)) = origin else {
            tracing::error!(
                widget = %item.id,
                max_rows = options.max_rows,
                "row-scan bound exceeded while packing"
            );
            return Err(LayoutError::RowBoundExceeded {
                id: item.id.clone(),
                max_rows: options.max_rows,
            });
        };
        occupancy.mark(x, y, item.w, item.h);
        placements.push(PlacedWidget {
            item: item.clone(),
            x,
            y,
        });
    }

    let layout = Layout {
        cols: options.cols,
        placements,
    };
    tracing::debug!(
        widgets = layout.placements.len(),
        height = layout.height(),
        "packed layout"
    );
    Ok(layout)
}
