use onboard_model::WidgetId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid pack options: {0}")]
    InvalidOptions(&'static str),
    #[error("widget '{id}' has a zero width or height")]
    ZeroSize { id: WidgetId },
    #[error("widget '{id}' is {w} cells wide but the grid has {cols} columns")]
    TooWide { id: WidgetId, w: u32, cols: u32 },
    #[error("widget '{id}' is {h} cells tall but at most {max_rows} rows are packed")]
    TooTall { id: WidgetId, h: u32, max_rows: u32 },
    /// No free origin was found within the row-scan bound.
    #[error("no free position for widget '{id}' within the first {max_rows} rows")]
    RowBoundExceeded { id: WidgetId, max_rows: u32 },
}
