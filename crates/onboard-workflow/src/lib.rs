//! Onboarding workflow: stage machine, collaborator effects and driver.
//!
//! The wizard moves through `Upload`, `Mapping` and `Widgets`. All state
//! lives in [`WorkflowState`] and changes only through [`reduce`], which
//! returns the collaborator calls to make as [`Effect`]s.
//! [`WorkflowController`] runs those calls against an [`OnboardingService`]
//! and feeds the results back.
//!
//! # Example
//!
//! ```ignore
//! let mut controller = WorkflowController::new(service, WorkflowContext::new(library, settings));
//! controller.open().await?;
//! controller.select_source(source_id).await?;
//! controller.upload(import_id).await?;
//! controller.continue_to_mapping()?;
//! controller.confirm_mapping().await?;
//! let dashboard = controller.submit_dashboard(None).await?;
//! ```

#![deny(unsafe_code)]

mod controller;
mod error;
mod event;
mod loadable;
pub mod memory;
mod reducer;
mod service;
mod settings;
mod state;

pub use controller::{ConfirmOutcome, WorkflowController};
pub use error::{ErrorCategory, ServiceError, ServiceOperation, WorkflowError};
pub use event::{Effect, EffectKind, WorkflowEvent};
pub use loadable::Loadable;
pub use reducer::{WorkflowContext, preview_layout, reduce};
pub use service::OnboardingService;
pub use settings::{DashboardSettings, OnboardSettings, SettingsError, WidgetSettings};
pub use state::{ConfirmedImport, Pending, Requests, Stage, WorkflowState};
