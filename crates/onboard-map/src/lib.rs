//! Column mapping resolution.
//!
//! Given the current mapping draft and the catalog of available target
//! fields, this crate classifies each mapping, detects many-to-one
//! conflicts and decides whether the draft may be confirmed.
//!
//! # Example
//!
//! ```ignore
//! use onboard_map::{MappingState, resolve};
//!
//! let mut state = MappingState::new(draft, fields);
//! state.reassign("Qty2", "planned_qty")?;
//!
//! let resolution = state.resolution();
//! if resolution.gate.is_open() {
//!     let finalized = state.finalize()?;
//! }
//! ```

#![deny(unsafe_code)]

mod confidence;
mod error;
mod resolve;
mod state;

pub use confidence::{ConfidenceBand, ConfidenceThresholds};
pub use error::MappingError;
pub use resolve::{
    ConfirmGate, FilterCounts, MappingFilter, MappingResolution, confirm_gate, conflict_map,
    conflict_set, derive_status, filter_counts, resolve,
};
pub use state::{MappingState, MappingSummary};
