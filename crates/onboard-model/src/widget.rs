//! Widget library items.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::WidgetId;

/// Widget category.
///
/// Categories arrive as free-form string keys. [`WidgetCategory::from_key`]
/// never fails: unrecognised keys resolve to [`WidgetCategory::Other`], so
/// label and icon lookups always have a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetCategory {
    Kpi,
    Chart,
    Table,
    Map,
    Text,
    Other,
}

impl WidgetCategory {
    pub const ALL: [WidgetCategory; 6] = [
        WidgetCategory::Kpi,
        WidgetCategory::Chart,
        WidgetCategory::Table,
        WidgetCategory::Map,
        WidgetCategory::Text,
        WidgetCategory::Other,
    ];

    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "kpi" | "metric" | "stat" => WidgetCategory::Kpi,
            "chart" | "graph" | "trend" => WidgetCategory::Chart,
            "table" | "grid" | "list" => WidgetCategory::Table,
            "map" | "geo" => WidgetCategory::Map,
            "text" | "note" | "markdown" => WidgetCategory::Text,
            _ => WidgetCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetCategory::Kpi => "kpi",
            WidgetCategory::Chart => "chart",
            WidgetCategory::Table => "table",
            WidgetCategory::Map => "map",
            WidgetCategory::Text => "text",
            WidgetCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WidgetCategory::Kpi => "Key metrics",
            WidgetCategory::Chart => "Charts",
            WidgetCategory::Table => "Tables",
            WidgetCategory::Map => "Maps",
            WidgetCategory::Text => "Text",
            WidgetCategory::Other => "Other",
        }
    }

    /// Icon token for the category.
    pub fn icon(&self) -> &'static str {
        match self {
            WidgetCategory::Kpi => "gauge",
            WidgetCategory::Chart => "chart-line",
            WidgetCategory::Table => "table",
            WidgetCategory::Map => "map",
            WidgetCategory::Text => "type",
            WidgetCategory::Other => "layout-grid",
        }
    }
}

impl From<String> for WidgetCategory {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<WidgetCategory> for String {
    fn from(value: WidgetCategory) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A widget as offered by the widget library.
///
/// `w`/`h` are grid cells. `min_w`/`min_h` bound interactive resizing and
/// are carried through packing untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetItem {
    pub id: WidgetId,
    pub w: u32,
    pub h: u32,
    pub category: WidgetCategory,
    #[serde(default = "one")]
    pub min_w: u32,
    #[serde(default = "one")]
    pub min_h: u32,
}

fn one() -> u32 {
    1
}

impl WidgetItem {
    pub fn new(id: WidgetId, w: u32, h: u32, category: WidgetCategory) -> Self {
        Self {
            id,
            w,
            h,
            category,
            min_w: 1,
            min_h: 1,
        }
    }

    #[must_use]
    pub fn with_min_size(mut self, min_w: u32, min_h: u32) -> Self {
        self.min_w = min_w;
        self.min_h = min_h;
        self
    }

    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }
}
