//! Grid packing for dashboard widgets.
//!
//! [`pack`] places widgets on a fixed-width grid with a deterministic
//! first-fit-decreasing scan. The same function backs the live preview and
//! the persisted layout, so identical selections always produce identical
//! placements.

#![deny(unsafe_code)]

mod error;
mod pack;

pub use error::LayoutError;
pub use pack::{DEFAULT_COLS, DEFAULT_MAX_ROWS, Layout, PackOptions, PlacedWidget, pack};
