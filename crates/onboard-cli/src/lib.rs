//! Library side of the `dashboard-onboard` CLI.
//!
//! Scenario replay, JSON input loading and the grid preview live here so
//! they can be exercised by integration tests.

pub mod input;
pub mod logging;
pub mod preview;
pub mod replay;
